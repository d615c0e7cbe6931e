use crate::history::HistoryStack;
use crate::message::*;
use crate::traits::{Canvas, SnapshotSource};
use crate::types::*;
use std::collections::HashMap;

pub const DEFAULT_COLOR: &str = "#000000";
pub const DEFAULT_BRUSH_SIZE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawState {
    Idle,
    Drawing { last: CanvasPoint },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Pen,
    Eraser,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    pub tool: Tool,
    pub color: String,
    pub size: f64,
}

impl Brush {
    pub fn op(&self) -> CompositeOp {
        match self.tool {
            Tool::Pen => CompositeOp::Draw,
            Tool::Eraser => CompositeOp::Erase,
        }
    }
}

impl std::default::Default for Brush {
    fn default() -> Self {
        Self {
            tool: Tool::Pen,
            color: DEFAULT_COLOR.to_owned(),
            size: DEFAULT_BRUSH_SIZE,
        }
    }
}

/// Overlay entry for another participant. `position` stays `None` until
/// their first cursor event arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCursor {
    pub name: String,
    pub position: Option<ViewportPoint>,
}

/// Client side of the relay protocol.
///
/// Local actions are applied to the canvas immediately and return the event
/// to send. Relay events go through [`ClientAgent::handle_server_event`] and
/// are never echoed back.
pub struct ClientAgent<C: Canvas + SnapshotSource> {
    canvas: C,
    history: HistoryStack<C::Snapshot>,
    state: DrawState,
    brush: Brush,
    name: String,
    own_id: Option<ConnectionId>,
    cursors: HashMap<ConnectionId, RemoteCursor>,
    chat_log: Vec<ChatLine>,
}

impl<C: Canvas + SnapshotSource> ClientAgent<C> {
    pub fn new(canvas: C, name: Option<&str>) -> Self {
        Self::with_history(canvas, name, HistoryStack::new())
    }

    /// Like [`ClientAgent::new`] with a caller-provided (e.g. bounded) history.
    pub fn with_history(
        canvas: C,
        name: Option<&str>,
        mut history: HistoryStack<C::Snapshot>,
    ) -> Self {
        // the blank canvas is the oldest undo target
        history.push(canvas.capture_full_canvas());
        Self {
            canvas,
            history,
            state: DrawState::Idle,
            brush: Brush::default(),
            name: display_name(name),
            own_id: None,
            cursors: HashMap::new(),
            chat_log: Vec::new(),
        }
    }

    pub fn press(&mut self, at: CanvasPoint) {
        self.state = DrawState::Drawing { last: at };
    }

    pub fn move_to(&mut self, to: CanvasPoint) -> Option<ClientEvent> {
        let from = match self.state {
            DrawState::Drawing { last } => last,
            DrawState::Idle => return None,
        };
        let op = self.brush.op();
        self.canvas.stroke_segment(
            from,
            to,
            Some(self.brush.color.as_str()),
            Some(self.brush.size),
            op,
        );
        self.state = DrawState::Drawing { last: to };
        Some(ClientEvent::Drawing(Segment::between(
            from,
            to,
            self.canvas.size(),
            Some(self.brush.color.clone()),
            Some(self.brush.size),
            op,
        )))
    }

    pub fn release(&mut self) {
        if let DrawState::Drawing { .. } = self.state {
            self.state = DrawState::Idle;
            self.save_snapshot();
        }
    }

    /// Pointer left the canvas mid-stroke; finishes the stroke like a release.
    pub fn leave(&mut self) {
        self.release();
    }

    pub fn stamp(&mut self, at: CanvasPoint, glyph: &str) -> ClientEvent {
        self.canvas.stamp_glyph(
            at,
            Some(glyph),
            Some(self.brush.color.as_str()),
            Some(self.brush.size),
        );
        self.save_snapshot();
        ClientEvent::Doodle(Stamp::at(
            at,
            self.canvas.size(),
            Some(glyph.to_owned()),
            Some(self.brush.color.clone()),
            Some(self.brush.size),
        ))
    }

    pub fn clear(&mut self) -> ClientEvent {
        self.canvas.clear();
        self.save_snapshot();
        ClientEvent::Clear
    }

    /// Returns the signal for peers only when the local history actually moved.
    pub fn undo(&mut self) -> Option<ClientEvent> {
        if self.apply_undo() {
            Some(ClientEvent::Undo)
        } else {
            None
        }
    }

    pub fn redo(&mut self) -> Option<ClientEvent> {
        if self.apply_redo() {
            Some(ClientEvent::Redo)
        } else {
            None
        }
    }

    pub fn cursor_moved(&self, at: ViewportPoint) -> ClientEvent {
        ClientEvent::CursorMove(CursorMove { x: at.x, y: at.y })
    }

    pub fn send_chat(&mut self, text: &str) -> Option<ClientEvent> {
        if text.trim().is_empty() {
            return None;
        }
        self.chat_log.push(ChatLine {
            name: self.name.clone(),
            message: text.to_owned(),
        });
        Some(ClientEvent::ChatMessage(text.to_owned()))
    }

    pub fn announce(&self) -> ClientEvent {
        ClientEvent::UserConnected(Some(self.name.clone()))
    }

    pub fn handle_server_event(&mut self, event: ServerEvent) -> Vec<ClientEvent> {
        log::debug!("Handle server event: {:?}", event);
        match event {
            ServerEvent::Connected { id } => {
                self.own_id = Some(id);
                self.cursors.remove(&id);
                return vec![self.announce()];
            }
            ServerEvent::UpdateUsers(users) => self.reconcile_cursors(&users),
            ServerEvent::UserDisconnected(id) => {
                self.cursors.remove(&id);
            }
            ServerEvent::CursorMoved(moved) => {
                if let Some(cursor) = self.cursors.get_mut(&moved.id) {
                    cursor.position = Some(euclid::point2(moved.x, moved.y));
                }
            }
            ServerEvent::Drawing(segment) => {
                let (from, to) = segment.endpoints(self.canvas.size());
                self.canvas.stroke_segment(
                    from,
                    to,
                    segment.color.as_deref(),
                    segment.size,
                    segment.op,
                );
            }
            ServerEvent::Doodle(stamp) => {
                let at = stamp.position(self.canvas.size());
                self.canvas.stamp_glyph(
                    at,
                    stamp.doodle.as_deref(),
                    stamp.color.as_deref(),
                    stamp.size,
                );
            }
            ServerEvent::Clear => {
                self.canvas.clear();
                self.save_snapshot();
            }
            ServerEvent::Undo => {
                self.apply_undo();
            }
            ServerEvent::Redo => {
                self.apply_redo();
            }
            ServerEvent::ChatMessage(line) => self.chat_log.push(line),
        }
        Vec::new()
    }

    fn reconcile_cursors(&mut self, users: &UserDirectory) {
        self.cursors.retain(|id, _| users.contains_key(id));
        for (id, presence) in users {
            if Some(*id) == self.own_id {
                continue;
            }
            let cursor = self.cursors.entry(*id).or_insert_with(|| RemoteCursor {
                name: String::new(),
                position: None,
            });
            cursor.name = presence.name.clone();
        }
    }

    fn save_snapshot(&mut self) {
        self.history.push(self.canvas.capture_full_canvas());
    }

    fn apply_undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.canvas.restore_full_canvas(snapshot);
                true
            }
            None => false,
        }
    }

    fn apply_redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.canvas.restore_full_canvas(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn select_pen(&mut self) {
        self.brush.tool = Tool::Pen;
    }

    pub fn select_eraser(&mut self) {
        self.brush.tool = Tool::Eraser;
    }

    /// Picking a colour switches back to the pen.
    pub fn set_color(&mut self, color: &str) {
        self.brush.color = color.to_owned();
        self.select_pen();
    }

    pub fn set_brush_size(&mut self, size: f64) {
        self.brush.size = size;
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn own_id(&self) -> Option<ConnectionId> {
        self.own_id
    }

    pub fn cursors(&self) -> &HashMap<ConnectionId, RemoteCursor> {
        &self.cursors
    }

    pub fn chat_log(&self) -> &[ChatLine] {
        &self.chat_log
    }

    pub fn history(&self) -> &HistoryStack<C::Snapshot> {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }
}

use std::collections::HashMap;
use system::euclid::size2;
use system::uuid::Uuid;
use whiteboard_server::relay::{Outbound, Relay};
use system::{
    Canvas, CanvasPoint, CanvasSize, ClientAgent, ClientEvent, CompositeOp, ConnectionId,
    ServerEvent, SnapshotSource,
};

/// Canvas double: painted marks stand in for pixels.
pub struct MarkCanvas {
    pub size: CanvasSize,
    pub marks: Vec<String>,
}

impl Canvas for MarkCanvas {
    fn size(&self) -> CanvasSize {
        self.size
    }

    fn stroke_segment(
        &mut self,
        from: CanvasPoint,
        to: CanvasPoint,
        _color: Option<&str>,
        _width: Option<f64>,
        op: CompositeOp,
    ) {
        self.marks
            .push(format!("{:?} {},{}-{},{}", op, from.x, from.y, to.x, to.y));
    }

    fn stamp_glyph(
        &mut self,
        at: CanvasPoint,
        glyph: Option<&str>,
        _color: Option<&str>,
        _size: Option<f64>,
    ) {
        self.marks
            .push(format!("{} {},{}", glyph.unwrap_or("?"), at.x, at.y));
    }

    fn clear(&mut self) {
        self.marks.clear();
    }
}

impl SnapshotSource for MarkCanvas {
    type Snapshot = Vec<String>;

    fn capture_full_canvas(&self) -> Vec<String> {
        self.marks.clone()
    }

    fn restore_full_canvas(&mut self, snapshot: &Vec<String>) {
        self.marks = snapshot.clone();
    }
}

/// A relay and its clients wired together without a transport. Every event
/// goes through its JSON encoding, as on the wire.
pub struct Board {
    pub relay: Relay,
    pub clients: HashMap<ConnectionId, ClientAgent<MarkCanvas>>,
    pub received: HashMap<ConnectionId, Vec<ServerEvent>>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            relay: Relay::new(),
            clients: HashMap::new(),
            received: HashMap::new(),
        }
    }

    pub fn join(&mut self, name: Option<&str>, width: f64, height: f64) -> ConnectionId {
        let id = Uuid::new_v4();
        let canvas = MarkCanvas {
            size: size2(width, height),
            marks: Vec::new(),
        };
        self.clients.insert(id, ClientAgent::new(canvas, name));
        let outbound = self.relay.connect(id);
        self.deliver(outbound);
        id
    }

    pub fn leave(&mut self, id: &ConnectionId) {
        self.clients.remove(id);
        let outbound = self.relay.disconnect(id);
        self.deliver(outbound);
    }

    pub fn send(&mut self, from: ConnectionId, event: ClientEvent) {
        let wire = event.to_json().expect("encodable");
        self.send_raw(from, &wire);
    }

    /// Feeds a frame as a browser would have written it.
    pub fn send_raw(&mut self, from: ConnectionId, wire: &str) {
        let event = ClientEvent::from_json(wire).expect("decodable");
        let outbound = self.relay.handle(&from, event);
        self.deliver(outbound);
    }

    pub fn client(&self, id: &ConnectionId) -> &ClientAgent<MarkCanvas> {
        &self.clients[id]
    }

    pub fn client_mut(&mut self, id: &ConnectionId) -> &mut ClientAgent<MarkCanvas> {
        self.clients.get_mut(id).expect("client must exist")
    }

    pub fn received(&self, id: &ConnectionId) -> &[ServerEvent] {
        self.received.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    fn deliver(&mut self, outbound: Vec<Outbound>) {
        for Outbound { to, event } in outbound {
            let wire = event.to_json().expect("encodable");
            let event = ServerEvent::from_json(&wire).expect("decodable");
            self.received.entry(to).or_default().push(event.clone());
            let replies = match self.clients.get_mut(&to) {
                Some(client) => client.handle_server_event(event),
                None => continue,
            };
            for reply in replies {
                self.send(to, reply);
            }
        }
    }
}

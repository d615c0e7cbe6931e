use std::collections::VecDeque;

/// Undo/redo log of full-canvas snapshots owned by one client.
///
/// Once a snapshot has been pushed, `index` always points at an existing
/// entry. Pushing while not at the tail drops the redo branch first.
#[derive(Debug, Clone)]
pub struct HistoryStack<S> {
    snapshots: VecDeque<S>,
    index: usize,
    capacity: Option<usize>,
}

impl<S> HistoryStack<S> {
    pub fn new() -> Self {
        Self {
            snapshots: VecDeque::new(),
            index: 0,
            capacity: None,
        }
    }

    /// Keeps at most `capacity` snapshots, evicting the oldest first.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity.max(1)),
            index: 0,
            capacity: Some(capacity.max(1)),
        }
    }

    pub fn push(&mut self, snapshot: S) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.index + 1);
        }
        self.snapshots.push_back(snapshot);
        if let Some(capacity) = self.capacity {
            while self.snapshots.len() > capacity {
                self.snapshots.pop_front();
            }
        }
        self.index = self.snapshots.len() - 1;
    }

    /// Steps back and returns the snapshot to restore, or `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&S> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.snapshots.get(self.index)
    }

    /// Steps forward and returns the snapshot to restore, or `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&S> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.snapshots.get(self.index)
    }

    pub fn current(&self) -> Option<&S> {
        self.snapshots.get(self.index)
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.snapshots.iter()
    }
}

impl<S> std::default::Default for HistoryStack<S> {
    fn default() -> Self {
        Self::new()
    }
}

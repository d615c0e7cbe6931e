use std::collections::HashMap;
use system::{display_name, ConnectionId, Presence, UserDirectory, ANONYMOUS};

/// Presence records of connections that announced themselves.
pub struct SessionRegistry {
    presences: HashMap<ConnectionId, Presence>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            presences: HashMap::new(),
        }
    }

    /// Inserts or overwrites the record. Blank names become "Anonymous".
    pub fn register(&mut self, connection_id: ConnectionId, name: Option<&str>) -> &Presence {
        let presence = Presence {
            name: display_name(name),
        };
        log::info!("Connection {} registered as {:?}", connection_id, presence.name);
        self.presences.insert(connection_id, presence);
        &self.presences[&connection_id]
    }

    pub fn unregister(&mut self, connection_id: &ConnectionId) -> Option<Presence> {
        self.presences.remove(connection_id)
    }

    pub fn name_of(&self, connection_id: &ConnectionId) -> &str {
        self.presences
            .get(connection_id)
            .map(|p| p.name.as_str())
            .unwrap_or(ANONYMOUS)
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.presences.contains_key(connection_id)
    }

    pub fn snapshot(&self) -> UserDirectory {
        self.presences.clone()
    }

    pub fn len(&self) -> usize {
        self.presences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presences.is_empty()
    }
}

impl std::default::Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

use crate::session_registry::SessionRegistry;
use system::{ChatLine, ClientEvent, ConnectionId, CursorMoved, ServerEvent};

/// An event addressed to one connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub to: ConnectionId,
    pub event: ServerEvent,
}

/// Decides who receives what. Holds no canvas content: a late joiner only
/// sees what is drawn after it connected.
pub struct Relay {
    // connect order; fan-out follows it
    connections: Vec<ConnectionId>,
    registry: SessionRegistry,
}

impl Relay {
    pub fn new() -> Self {
        Self {
            connections: Vec::new(),
            registry: SessionRegistry::new(),
        }
    }

    pub fn connect(&mut self, connection_id: ConnectionId) -> Vec<Outbound> {
        if !self.connections.contains(&connection_id) {
            self.connections.push(connection_id);
            log::info!(
                "Connection {} connected ({} live)",
                connection_id,
                self.connections.len()
            );
        }
        vec![Outbound {
            to: connection_id,
            event: ServerEvent::Connected { id: connection_id },
        }]
    }

    /// Forgets the connection and tells everyone left. Unknown ids produce nothing,
    /// so a repeated disconnect is announced only once.
    pub fn disconnect(&mut self, connection_id: &ConnectionId) -> Vec<Outbound> {
        let position = match self.connections.iter().position(|c| c == connection_id) {
            Some(position) => position,
            None => return Vec::new(),
        };
        self.connections.remove(position);
        self.registry.unregister(connection_id);
        log::info!(
            "Connection {} disconnected ({} live)",
            connection_id,
            self.connections.len()
        );
        self.broadcast(
            ServerEvent::UserDisconnected(*connection_id),
            Some(connection_id),
        )
    }

    pub fn handle(&mut self, from: &ConnectionId, event: ClientEvent) -> Vec<Outbound> {
        if !self.connections.contains(from) {
            log::warn!("Dropping event from unknown connection {}", from);
            return Vec::new();
        }
        match event {
            ClientEvent::UserConnected(name) => {
                self.registry.register(*from, name.as_deref());
                self.broadcast(ServerEvent::UpdateUsers(self.registry.snapshot()), None)
            }
            ClientEvent::CursorMove(position) => self.broadcast(
                ServerEvent::CursorMoved(CursorMoved {
                    id: *from,
                    x: position.x,
                    y: position.y,
                }),
                Some(from),
            ),
            ClientEvent::Drawing(segment) => {
                self.broadcast(ServerEvent::Drawing(segment), Some(from))
            }
            ClientEvent::Doodle(stamp) => self.broadcast(ServerEvent::Doodle(stamp), Some(from)),
            ClientEvent::Clear => self.broadcast(ServerEvent::Clear, Some(from)),
            ClientEvent::Undo => self.broadcast(ServerEvent::Undo, Some(from)),
            ClientEvent::Redo => self.broadcast(ServerEvent::Redo, Some(from)),
            ClientEvent::ChatMessage(message) => {
                let name = self.registry.name_of(from).to_owned();
                self.broadcast(
                    ServerEvent::ChatMessage(ChatLine { name, message }),
                    Some(from),
                )
            }
        }
    }

    fn broadcast(&self, event: ServerEvent, without: Option<&ConnectionId>) -> Vec<Outbound> {
        self.connections
            .iter()
            .filter(|connection_id| without.map_or(true, |w| w != *connection_id))
            .map(|connection_id| Outbound {
                to: *connection_id,
                event: event.clone(),
            })
            .collect()
    }

    pub fn connection_ids(&self) -> &[ConnectionId] {
        &self.connections
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }
}

impl std::default::Default for Relay {
    fn default() -> Self {
        Self::new()
    }
}

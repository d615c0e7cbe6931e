use std::collections::HashMap;
use system::{ConnectionId, ServerEvent};
use tokio::sync::mpsc::error::TrySendError;

pub type ConnectionTx = tokio::sync::mpsc::Sender<ServerEvent>;

pub struct ConnectionTxStorage {
    connection_txs: HashMap<ConnectionId, ConnectionTx>,
}

impl ConnectionTxStorage {
    pub fn new() -> Self {
        Self {
            connection_txs: HashMap::new(),
        }
    }

    pub fn insert(&mut self, connection_id: ConnectionId, tx: ConnectionTx) {
        self.connection_txs.insert(connection_id, tx);
    }

    /// Never waits: a connection whose buffer is full misses this event.
    pub fn send(&self, to: &ConnectionId, message: ServerEvent) {
        if let Some(tx) = self.connection_txs.get(to) {
            match tx.try_send(message) {
                Ok(()) => {}
                Err(TrySendError::Full(message)) => {
                    log::warn!("Connection {} is lagging, dropped {:?}", to, message);
                }
                Err(TrySendError::Closed(_)) => {
                    log::debug!("Connection {} already closed", to);
                }
            }
        } else {
            log::warn!("No egress channel for connection {}", to);
        }
    }

    pub fn remove(&mut self, connection_id: &ConnectionId) -> Option<ConnectionTx> {
        self.connection_txs.remove(connection_id)
    }

    pub fn len(&self) -> usize {
        self.connection_txs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connection_txs.is_empty()
    }
}

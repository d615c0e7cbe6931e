use tokio::sync::mpsc::{channel, Sender};

use crate::connection::ConnectionCommand;
use crate::connection_tx_storage::ConnectionTxStorage;
use crate::relay::{Outbound, Relay};

pub type ServerTx = Sender<ConnectionCommand>;

/// Owns all relay state. Runs on a single task, one command at a time.
struct Server {
    relay: Relay,
    connections: ConnectionTxStorage,
}

impl Server {
    fn new() -> Self {
        Self {
            relay: Relay::new(),
            connections: ConnectionTxStorage::new(),
        }
    }

    fn handle_connection_command(&mut self, command: ConnectionCommand) {
        match command {
            ConnectionCommand::Connect { connection_id, tx } => {
                self.connections.insert(connection_id, tx);
                log::info!(
                    "Connected {} ({} open)",
                    connection_id,
                    self.connections.len()
                );
                let outbound = self.relay.connect(connection_id);
                self.deliver(outbound);
            }
            ConnectionCommand::Disconnect { from } => {
                self.connections.remove(&from);
                log::info!("Disconnected {} ({} open)", from, self.connections.len());
                if self.connections.is_empty() {
                    log::debug!("Board is empty");
                }
                let outbound = self.relay.disconnect(&from);
                self.deliver(outbound);
            }
            ConnectionCommand::ClientEvent { from, event } => {
                let outbound = self.relay.handle(&from, event);
                self.deliver(outbound);
            }
        }
    }

    fn deliver(&self, outbound: Vec<Outbound>) {
        for Outbound { to, event } in outbound {
            self.connections.send(&to, event);
        }
    }
}

pub fn spawn_server(capacity: usize) -> ServerTx {
    let (srv_tx, mut srv_rx) = channel::<ConnectionCommand>(capacity);

    tokio::spawn(async move {
        let mut server = Server::new();

        while let Some(command) = srv_rx.recv().await {
            server.handle_connection_command(command);
        }
        log::info!("Server loop terminated");
    });

    srv_tx
}

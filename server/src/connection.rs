use actix::{
    Actor, ActorContext, ActorFutureExt, AsyncContext, Handler, Message, Running, StreamHandler,
    WrapFuture,
};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;

use system::uuid::Uuid;
use system::{ClientEvent, ConnectionId, ServerEvent};

use crate::connection_tx_storage::ConnectionTx;
use crate::server::ServerTx;

const EGRESS_BUFFER: usize = 32;

#[derive(Debug)]
pub enum ConnectionCommand {
    Connect {
        connection_id: ConnectionId,
        tx: ConnectionTx,
    },
    Disconnect {
        from: ConnectionId,
    },
    ClientEvent {
        from: ConnectionId,
        event: ClientEvent,
    },
}

#[derive(Message)]
#[rtype(result = "()")]
struct ConnectionActorMessage(ServerEvent);

enum ConnectionState {
    Idle,
    Connecting,
    Registered,
    Closed,
}

struct ConnectionActor {
    connection_id: ConnectionId,
    state: ConnectionState,
    srv_tx: ServerTx,
}

impl ConnectionActor {
    /// Hands a decoded frame to the server loop. The actor waits for room in
    /// the channel before reading the next frame, so a busy server slows the
    /// socket down instead of losing events.
    fn forward(&mut self, text: &str, ctx: &mut ws::WebsocketContext<Self>) {
        let from = self.connection_id;
        let event = match ClientEvent::from_json(text) {
            Ok(event) => event,
            Err(err) => {
                log::warn!("Undecodable frame from {}: {}", from, err);
                return;
            }
        };
        log::debug!("Ingress {} {:?}", from, event);
        let srv_tx = self.srv_tx.clone();
        ctx.wait(
            async move {
                srv_tx
                    .send(ConnectionCommand::ClientEvent { from, event })
                    .await
            }
            .into_actor(self)
            .map(move |res, _act, ctx| {
                if res.is_err() {
                    log::error!("Server is gone, closing connection {}", from);
                    ctx.stop();
                }
            }),
        );
    }
}

impl Actor for ConnectionActor {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let (tx, mut rx) = tokio::sync::mpsc::channel::<ServerEvent>(EGRESS_BUFFER);

        let connection_id = self.connection_id;
        let srv_tx = self.srv_tx.clone();
        self.state = ConnectionState::Connecting;
        // frames that arrive meanwhile are held until the server knows us
        ctx.wait(
            async move {
                srv_tx
                    .send(ConnectionCommand::Connect { connection_id, tx })
                    .await
            }
            .into_actor(self)
            .map(move |res, act, ctx| match res {
                Ok(()) => act.state = ConnectionState::Registered,
                Err(_) => {
                    log::error!("Cannot register connection {}", connection_id);
                    act.state = ConnectionState::Closed;
                    ctx.stop();
                }
            }),
        );

        let addr = ctx.address().recipient();

        actix::spawn(async move {
            log::debug!("connection egress task - started");
            while let Some(event) = rx.recv().await {
                addr.do_send(ConnectionActorMessage(event));
            }
            log::debug!("connection egress task - terminated");
        });
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        if let ConnectionState::Connecting | ConnectionState::Registered = self.state {
            // the server loop must hear about every disconnect, so wait for room
            let srv_tx = self.srv_tx.clone();
            let from = self.connection_id;
            actix::spawn(async move {
                if srv_tx
                    .send(ConnectionCommand::Disconnect { from })
                    .await
                    .is_err()
                {
                    log::warn!("Server is gone before disconnect of {}", from);
                }
            });
        }
        self.state = ConnectionState::Closed;

        Running::Stop
    }
}

/// Ingress
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ConnectionActor {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Text(text)) => self.forward(&text, ctx),
            Ok(ws::Message::Binary(bin)) => match std::str::from_utf8(&bin) {
                Ok(text) => self.forward(text, ctx),
                Err(_) => log::warn!("Ignoring non UTF-8 binary frame"),
            },
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(_) => (),
            Err(err) => {
                log::warn!("WebSocket protocol error: {}", err);
                ctx.stop();
            }
        }
    }
}

/// Egress
impl Handler<ConnectionActorMessage> for ConnectionActor {
    type Result = ();

    fn handle(
        &mut self,
        msg: ConnectionActorMessage,
        ctx: &mut ws::WebsocketContext<Self>,
    ) -> Self::Result {
        let event = msg.0;
        log::debug!("Egress {} {:?}", self.connection_id, event);
        match event.to_json() {
            Ok(json) => ctx.text(json),
            Err(err) => log::error!("Cannot encode {:?}: {}", event, err),
        }
    }
}

pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    srv_tx: web::Data<ServerTx>,
) -> Result<HttpResponse, Error> {
    ws::start(
        ConnectionActor {
            connection_id: Uuid::new_v4(),
            state: ConnectionState::Idle,
            srv_tx: srv_tx.get_ref().clone(),
        },
        &req,
        stream,
    )
}

//! WebSocket session actor bound to one admitted connection

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::{Actor, ActorContext, AsyncContext, StreamHandler};
use actix_web_actors::ws;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use sk_core::{ChannelBroadcaster, ClientCommand, ConnectionHandle, ServerEvent};

/// Relays client commands to the broadcaster and broadcaster events to the
/// client. The account identity is fixed at the handshake.
pub struct TaskChannelSession {
    handle: ConnectionHandle,
    broadcaster: Arc<ChannelBroadcaster>,
    outbound: Option<UnboundedReceiver<ServerEvent>>,
    heartbeat_interval: Duration,
    client_timeout: Duration,
    last_heartbeat: Instant,
}

impl TaskChannelSession {
    pub fn new(
        handle: ConnectionHandle,
        broadcaster: Arc<ChannelBroadcaster>,
        outbound: UnboundedReceiver<ServerEvent>,
        heartbeat_interval: Duration,
        client_timeout: Duration,
    ) -> Self {
        Self {
            handle,
            broadcaster,
            outbound: Some(outbound),
            heartbeat_interval,
            client_timeout,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_event(&self, ctx: &mut ws::WebsocketContext<Self>, event: &ServerEvent) {
        match serde_json::to_string(event) {
            Ok(json) => ctx.text(json),
            Err(e) => warn!(connection_id = %self.handle.id, "Failed to serialize event: {}", e),
        }
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(self.heartbeat_interval, |act, ctx| {
            if Instant::now().duration_since(act.last_heartbeat) > act.client_timeout {
                info!(
                    connection_id = %act.handle.id,
                    event = "ws_heartbeat_timeout",
                    "Client heartbeat timed out, disconnecting"
                );
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }

    fn handle_command(&mut self, command: ClientCommand, ctx: &mut ws::WebsocketContext<Self>) {
        let reply = match command {
            ClientCommand::JoinTask { task_id } => self
                .broadcaster
                .join(&self.handle, &task_id)
                .map(|_| Some(ServerEvent::JoinedTask { task_id })),
            ClientCommand::LeaveTask { task_id } => self
                .broadcaster
                .leave(&self.handle, &task_id)
                .map(|_| Some(ServerEvent::LeftTask { task_id })),
            ClientCommand::SendMessage { task_id, payload } => self
                .broadcaster
                .publish_message(&self.handle, &task_id, payload)
                .map(|delivered| {
                    debug!(
                        connection_id = %self.handle.id,
                        task_id = %task_id,
                        delivered,
                        "Message published"
                    );
                    None
                }),
            ClientCommand::Ping => Ok(Some(ServerEvent::Pong)),
        };

        match reply {
            Ok(Some(event)) => self.send_event(ctx, &event),
            Ok(None) => {}
            Err(e) => self.send_event(ctx, &ServerEvent::error(e.to_string())),
        }
    }

    fn handle_text(&mut self, text: &str, ctx: &mut ws::WebsocketContext<Self>) {
        match serde_json::from_str::<ClientCommand>(text) {
            Ok(command) => self.handle_command(command, ctx),
            Err(e) => {
                debug!(connection_id = %self.handle.id, "Unparseable client frame: {}", e);
                self.send_event(ctx, &ServerEvent::error("Invalid message format"));
            }
        }
    }
}

impl Actor for TaskChannelSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.start_heartbeat(ctx);

        if let Some(receiver) = self.outbound.take() {
            let events = futures_util::stream::unfold(receiver, |mut receiver| async move {
                receiver.recv().await.map(|event| (event, receiver))
            });
            ctx.add_stream(events);
        }
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.broadcaster.disconnect(&self.handle);
        info!(
            connection_id = %self.handle.id,
            account_id = %self.handle.account_id,
            event = "ws_disconnected",
            "WebSocket connection closed"
        );
    }
}

/// Events fanned out by the broadcaster
impl StreamHandler<ServerEvent> for TaskChannelSession {
    fn handle(&mut self, event: ServerEvent, ctx: &mut Self::Context) {
        self.send_event(ctx, &event);
    }

    fn finished(&mut self, ctx: &mut Self::Context) {
        // the broadcaster dropped this connection
        ctx.stop();
    }
}

/// Frames from the client
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for TaskChannelSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(bytes)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&bytes);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                self.handle_text(&text, ctx);
            }
            Ok(ws::Message::Binary(_)) => {
                self.send_event(ctx, &ServerEvent::error("Binary frames are not supported"));
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(_) => {}
            Err(e) => {
                warn!(connection_id = %self.handle.id, "WebSocket protocol error: {}", e);
                ctx.stop();
            }
        }
    }
}

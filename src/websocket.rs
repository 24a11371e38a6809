/// WebSocket endpoint for interactive dashboard sessions.
///
/// Each connection owns one `Session`: the client sends filter interactions,
/// the server recomputes the dashboard and replies with the full result.
use actix::prelude::*;
use actix_web_actors::ws;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::dataset::Dataset;
use crate::messages::{ClientMessage, ServerMessage};
use crate::session::Session;

/// How often heartbeat pings are sent
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
/// How long before lack of client response causes a timeout
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared state for all connections: the read-only dataset.
pub struct AppState {
    pub dataset: Arc<Dataset>,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }
}

/// WebSocket connection actor
pub struct DashboardWebSocket {
    hb: Instant,
    session: Session,
}

impl DashboardWebSocket {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            hb: Instant::now(),
            session: Session::new(dataset),
        }
    }

    fn hb(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |act, ctx| {
            if Instant::now().duration_since(act.hb) > CLIENT_TIMEOUT {
                info!("WebSocket client heartbeat failed, disconnecting");
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }

    fn dashboard_message(&self) -> ServerMessage {
        ServerMessage::Dashboard {
            selection: self.session.selection().clone(),
            dashboard: self.session.dashboard(),
        }
    }

    /// Apply one client message to the session and build the reply.
    pub fn handle_client_message(&mut self, msg: ClientMessage) -> ServerMessage {
        debug!("Client message: {:?}", msg);
        match msg {
            ClientMessage::Options => ServerMessage::Options {
                options: self.session.options(),
                selection: self.session.selection().clone(),
            },
            ClientMessage::Query => self.dashboard_message(),
            ClientMessage::SetSelection { selection } => {
                self.session.set_selection(selection);
                self.dashboard_message()
            }
            ClientMessage::SetFacet { facet, values } => {
                self.session.set_facet(facet, &values);
                self.dashboard_message()
            }
            ClientMessage::Toggle { facet, value } => {
                self.session.toggle(facet, &value);
                self.dashboard_message()
            }
            ClientMessage::SelectAll { facet } => {
                self.session.select_all(facet);
                self.dashboard_message()
            }
            ClientMessage::Clear { facet } => {
                self.session.clear(facet);
                self.dashboard_message()
            }
            ClientMessage::Reset => {
                self.session.reset();
                self.dashboard_message()
            }
        }
    }

    /// Parse a text frame and build the reply. Malformed messages get an
    /// `Error` reply and leave the session untouched.
    pub fn reply_to_text(&mut self, text: &str) -> ServerMessage {
        match serde_json::from_str::<ClientMessage>(text) {
            Ok(client_msg) => self.handle_client_message(client_msg),
            Err(e) => {
                warn!("Rejected client message: {}", e);
                ServerMessage::Error {
                    message: format!("Invalid message format: {}", e),
                }
            }
        }
    }

    fn send(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMessage) {
        match serde_json::to_string(msg) {
            Ok(text) => ctx.text(text),
            Err(e) => warn!("Failed to serialize server message: {}", e),
        }
    }
}

impl Actor for DashboardWebSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.hb(ctx);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for DashboardWebSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                self.hb = Instant::now();
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {
                self.hb = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                let reply = self.reply_to_text(&text);
                Self::send(ctx, &reply);
            }
            Ok(ws::Message::Binary(_)) => {
                warn!("Unexpected binary message");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            _ => ctx.stop(),
        }
    }
}

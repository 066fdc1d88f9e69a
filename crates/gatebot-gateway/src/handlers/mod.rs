//! Inbound frame handlers
//!
//! Routes decoded gateway frames to the handshake, liveness and interaction
//! handlers.

mod error;
mod heartbeat;
mod hello;
mod interaction;

pub use error::{HandlerError, HandlerResult};
pub use heartbeat::HeartbeatHandler;
pub use hello::HelloHandler;
pub use interaction::InteractionHandler;

use crate::commands::CommandRegistry;
use crate::events::{GatewayEventType, ReadyEvent};
use crate::protocol::{GatewayMessage, OpCode};
use crate::rest::RestApi;
use crate::session::SessionState;
use crate::transport::FrameSink;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// What a frame led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// HELLO processed and IDENTIFY sent
    Identified,
    /// Heartbeat ACK recorded; `None` if no heartbeat was outstanding
    HeartbeatAck { latency: Option<Duration> },
    /// Command handler ran and its reply was posted
    Replied { command: String },
    /// Interaction for an unknown command or a handler that returned nothing
    Unanswered,
    /// Frame intentionally not acted on
    Ignored,
    /// Frame could not be decoded
    Dropped,
}

/// Routes inbound frames for one bot session
pub struct EventDispatcher {
    session: Arc<SessionState>,
    registry: Arc<CommandRegistry>,
    rest: RestApi,
}

impl EventDispatcher {
    #[must_use]
    pub fn new(session: Arc<SessionState>, registry: Arc<CommandRegistry>, rest: RestApi) -> Self {
        Self {
            session,
            registry,
            rest,
        }
    }

    /// Decode and handle one text frame
    ///
    /// Undecodable frames are logged and reported as [`Dispatched::Dropped`].
    pub async fn dispatch_text(
        &self,
        text: &str,
        sink: &mut dyn FrameSink,
        now: Instant,
    ) -> HandlerResult<Dispatched> {
        match GatewayMessage::from_json(text) {
            Ok(message) => self.dispatch(message, sink, now).await,
            Err(e) => {
                tracing::warn!(error = %e, len = text.len(), "Dropping malformed gateway frame");
                Ok(Dispatched::Dropped)
            }
        }
    }

    /// Handle one decoded frame
    pub async fn dispatch(
        &self,
        message: GatewayMessage,
        sink: &mut dyn FrameSink,
        now: Instant,
    ) -> HandlerResult<Dispatched> {
        if message.op == OpCode::Hello {
            let payload = message
                .as_hello()
                .ok_or_else(|| HandlerError::InvalidPayload("Invalid Hello payload".to_string()))?;
            return HelloHandler::handle(&self.session, payload, sink, now).await;
        }

        if !self.session.is_ready() {
            tracing::debug!(op = %message.op, "Ignoring frame before HELLO");
            return Ok(Dispatched::Ignored);
        }

        match message.op {
            OpCode::HeartbeatAck => Ok(HeartbeatHandler::on_ack(&self.session, now)),
            OpCode::Dispatch => self.dispatch_event(message).await,
            OpCode::Reconnect => {
                tracing::info!("Gateway requested reconnect; session stays on this connection");
                Ok(Dispatched::Ignored)
            }
            OpCode::InvalidSession => {
                tracing::warn!(resumable = ?message.d, "Gateway reported an invalid session");
                Ok(Dispatched::Ignored)
            }
            OpCode::Unknown(code) => {
                tracing::debug!(code, "Ignoring unknown op code");
                Ok(Dispatched::Ignored)
            }
            op => {
                tracing::debug!(op = %op, "Ignoring unhandled op code");
                Ok(Dispatched::Ignored)
            }
        }
    }

    async fn dispatch_event(&self, message: GatewayMessage) -> HandlerResult<Dispatched> {
        let Some(name) = message.t.as_deref() else {
            return Err(HandlerError::InvalidPayload("Dispatch without event name".to_string()));
        };

        match GatewayEventType::from_str(name) {
            Some(GatewayEventType::InteractionCreate) => {
                InteractionHandler::handle(&self.session, &self.registry, &self.rest, message.d)
                    .await
            }
            Some(GatewayEventType::Ready) => {
                self.on_ready(message.d);
                Ok(Dispatched::Ignored)
            }
            _ => {
                tracing::debug!(event = %name, seq = ?message.s, "Ignoring dispatch");
                Ok(Dispatched::Ignored)
            }
        }
    }

    fn on_ready(&self, data: Option<serde_json::Value>) {
        let ready = match data.map(serde_json::from_value::<ReadyEvent>) {
            Some(Ok(ready)) => ready,
            _ => {
                tracing::info!("Gateway session ready");
                return;
            }
        };

        if self.session.application_id().is_none() {
            if let Some(application) = &ready.application {
                self.session.set_application_id(application.id.clone());
            }
        }
        tracing::info!(
            user = %ready.user.username,
            user_id = %ready.user.id,
            version = ready.v,
            "Gateway session ready"
        );
    }

    /// Give the liveness protocol a chance to send
    ///
    /// Returns whether a heartbeat was written.
    pub async fn on_ready_to_send(&self, sink: &mut dyn FrameSink, now: Instant) -> HandlerResult<bool> {
        HeartbeatHandler::tick(&self.session, sink, now).await
    }

    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }
}

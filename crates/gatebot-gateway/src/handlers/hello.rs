//! Hello handler (op 10)

use super::{Dispatched, HandlerResult};
use crate::protocol::{GatewayMessage, HelloPayload};
use crate::session::{HandshakeState, SessionState};
use crate::transport::FrameSink;
use std::time::{Duration, Instant};

/// Handles the HELLO that opens every connection
pub struct HelloHandler;

impl HelloHandler {
    /// Arm heartbeats and answer with IDENTIFY
    ///
    /// Only the first HELLO on a connection is honoured.
    pub async fn handle(
        session: &SessionState,
        payload: HelloPayload,
        sink: &mut dyn FrameSink,
        now: Instant,
    ) -> HandlerResult<Dispatched> {
        if !session.advance(HandshakeState::AwaitingHello, HandshakeState::Identifying) {
            tracing::debug!(
                state = %session.handshake_state(),
                "Ignoring HELLO outside of handshake"
            );
            return Ok(Dispatched::Ignored);
        }

        let interval = Duration::from_millis(payload.heartbeat_interval);
        session.liveness().start(interval, now);

        let identify = GatewayMessage::identify(&session.identify_payload())?;
        sink.send_frame(&identify).await?;
        session.advance(HandshakeState::Identifying, HandshakeState::Ready);

        tracing::info!(
            heartbeat_interval_ms = payload.heartbeat_interval,
            intents = %session.intents(),
            "Sent IDENTIFY"
        );

        Ok(Dispatched::Identified)
    }
}

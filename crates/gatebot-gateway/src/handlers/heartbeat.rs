//! Heartbeat handling (op 1 out, op 11 in)

use super::{Dispatched, HandlerResult};
use crate::protocol::GatewayMessage;
use crate::session::{HeartbeatDue, SessionState};
use crate::transport::FrameSink;
use std::time::Instant;

/// Sends heartbeats when due and records their ACKs
pub struct HeartbeatHandler;

impl HeartbeatHandler {
    /// Send a heartbeat if one is due; returns whether one was sent
    pub async fn tick(
        session: &SessionState,
        sink: &mut dyn FrameSink,
        now: Instant,
    ) -> HandlerResult<bool> {
        if !session.is_ready() {
            return Ok(false);
        }

        match session.liveness().poll_heartbeat(now) {
            HeartbeatDue::NotDue => Ok(false),
            HeartbeatDue::Due { previous_unacked } => {
                if previous_unacked {
                    tracing::warn!("Previous heartbeat was never acknowledged; connection may be zombied");
                }
                sink.send_frame(&GatewayMessage::heartbeat()).await?;
                tracing::trace!("Heartbeat sent");
                Ok(true)
            }
        }
    }

    /// Record a heartbeat ACK
    pub fn on_ack(session: &SessionState, now: Instant) -> Dispatched {
        let latency = session.liveness().record_ack(now);
        match latency {
            Some(latency) => {
                tracing::debug!(latency_ms = latency.as_millis() as u64, "Heartbeat acknowledged");
            }
            None => tracing::debug!("Ignoring heartbeat ACK with no heartbeat outstanding"),
        }
        Dispatched::HeartbeatAck { latency }
    }
}

//! Session state
//!
//! Everything the driver task and the host share: credentials, resolved
//! addresses, handshake progress and heartbeat timing.

mod liveness;
mod state;

pub use liveness::{HeartbeatDue, LivenessSnapshot, LivenessTracker};
pub use state::{HandshakeState, SessionState};

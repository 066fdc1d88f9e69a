//! Gateway event types
//!
//! Event names carried in the `t` field of dispatch messages.

use std::fmt;

/// Gateway event types the client acts on
///
/// Anything else is logged at debug and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayEventType {
    /// Sent after successful Identify
    Ready,
    /// User invoked a slash command or component
    InteractionCreate,
}

impl GatewayEventType {
    /// Get the string representation of the event type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::InteractionCreate => "INTERACTION_CREATE",
        }
    }

    /// Parse an event type from a string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "READY" => Some(Self::Ready),
            "INTERACTION_CREATE" => Some(Self::InteractionCreate),
            _ => None,
        }
    }
}

impl fmt::Display for GatewayEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Gateway message format
//!
//! Defines the envelope shared by every frame on the WebSocket connection.

use super::{HelloPayload, IdentifyPayload, OpCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Gateway message format
///
/// All frames sent or received over the WebSocket connection follow this format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayMessage {
    /// Operation code
    pub op: OpCode,

    /// Event name (only for op=0 Dispatch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<String>,

    /// Sequence number (only for op=0 Dispatch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<u64>,

    /// Event data payload, always present on the wire (`null` when empty)
    #[serde(default)]
    pub d: Option<Value>,
}

impl GatewayMessage {
    // === Outgoing Messages ===

    /// Create a Heartbeat message (op=1)
    ///
    /// Serializes as `{"op":1,"d":null}`; sequence tracking is not used.
    #[must_use]
    pub fn heartbeat() -> Self {
        Self {
            op: OpCode::Heartbeat,
            t: None,
            s: None,
            d: None,
        }
    }

    /// Create an Identify message (op=2)
    pub fn identify(payload: &IdentifyPayload) -> Result<Self, serde_json::Error> {
        Ok(Self {
            op: OpCode::Identify,
            t: None,
            s: None,
            d: Some(serde_json::to_value(payload)?),
        })
    }

    // === Parsing ===

    /// Try to parse as a Hello payload (op=10)
    pub fn as_hello(&self) -> Option<HelloPayload> {
        if self.op != OpCode::Hello {
            return None;
        }
        self.d.as_ref().and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    // === Utilities ===

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl std::fmt::Display for GatewayMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(t) = &self.t {
            write!(f, "GatewayMessage(op={}, t={}", self.op, t)?;
            if let Some(s) = self.s {
                write!(f, ", s={s}")?;
            }
            write!(f, ")")
        } else {
            write!(f, "GatewayMessage(op={})", self.op)
        }
    }
}

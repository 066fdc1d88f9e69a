//! Handshake payload definitions

use serde::{Deserialize, Serialize};

/// Payload for op 10 (Hello)
///
/// Sent by the server immediately after connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloPayload {
    /// Heartbeat interval in milliseconds
    pub heartbeat_interval: u64,
}

/// Payload for op 2 (Identify)
///
/// Sent by the client once HELLO arrives to authenticate the session.
#[derive(Clone, Serialize, Deserialize)]
pub struct IdentifyPayload {
    /// Bot token, sent without the `Bot ` prefix
    pub token: String,

    /// Gateway intents bitmask
    pub intents: u64,

    /// Client connection properties
    pub properties: IdentifyProperties,
}

impl IdentifyPayload {
    #[must_use]
    pub fn new(token: impl Into<String>, intents: u64, properties: IdentifyProperties) -> Self {
        Self {
            token: token.into(),
            intents,
            properties,
        }
    }
}

impl std::fmt::Debug for IdentifyPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentifyPayload")
            .field("token", &"***")
            .field("intents", &self.intents)
            .field("properties", &self.properties)
            .finish()
    }
}

/// Client connection properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifyProperties {
    /// Operating system
    pub os: String,

    /// Library name
    pub browser: String,

    /// Device name
    pub device: String,
}

impl IdentifyProperties {
    /// Library name reported in `browser` and `device`
    pub const LIBRARY: &'static str = "gatebot";

    #[must_use]
    pub fn new(os: impl Into<String>, browser: impl Into<String>, device: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            browser: browser.into(),
            device: device.into(),
        }
    }
}

impl Default for IdentifyProperties {
    fn default() -> Self {
        Self::new(std::env::consts::OS, Self::LIBRARY, Self::LIBRARY)
    }
}

//! Shared session state

use super::LivenessTracker;
use crate::protocol::{IdentifyPayload, IdentifyProperties};
use gatebot_common::BotToken;
use gatebot_core::GatewayIntents;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;

/// Handshake progress on the current connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum HandshakeState {
    /// No transport
    #[default]
    Disconnected,
    /// Transport open, nothing sent yet
    AwaitingHello,
    /// HELLO processed, IDENTIFY being written
    Identifying,
    /// IDENTIFY sent; heartbeats and dispatches are processed
    Ready,
}

impl HandshakeState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::AwaitingHello => "awaiting_hello",
            Self::Identifying => "identifying",
            Self::Ready => "ready",
        }
    }
}

impl std::fmt::Display for HandshakeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State shared between the host and the driver task
pub struct SessionState {
    token: BotToken,
    intents: GatewayIntents,
    application_id: RwLock<Option<String>>,
    gateway_url: RwLock<Option<String>>,
    handshake: Mutex<HandshakeState>,
    liveness: LivenessTracker,
}

impl SessionState {
    #[must_use]
    pub fn new(token: BotToken, intents: GatewayIntents) -> Self {
        Self {
            token,
            intents,
            application_id: RwLock::new(None),
            gateway_url: RwLock::new(None),
            handshake: Mutex::new(HandshakeState::Disconnected),
            liveness: LivenessTracker::new(),
        }
    }

    pub fn token(&self) -> &BotToken {
        &self.token
    }

    pub fn intents(&self) -> GatewayIntents {
        self.intents
    }

    pub fn application_id(&self) -> Option<String> {
        self.application_id.read().clone()
    }

    pub fn set_application_id(&self, id: impl Into<String>) {
        *self.application_id.write() = Some(id.into());
    }

    /// Gateway URL used for the most recent connection attempt
    pub fn gateway_url(&self) -> Option<String> {
        self.gateway_url.read().clone()
    }

    pub fn set_gateway_url(&self, url: impl Into<String>) {
        *self.gateway_url.write() = Some(url.into());
    }

    pub fn handshake_state(&self) -> HandshakeState {
        *self.handshake.lock()
    }

    /// Move from `from` to `to`, returning false if the state was elsewhere
    pub fn advance(&self, from: HandshakeState, to: HandshakeState) -> bool {
        let mut state = self.handshake.lock();
        if *state != from {
            return false;
        }
        *state = to;
        true
    }

    /// Check if IDENTIFY has been sent on this connection
    pub fn is_ready(&self) -> bool {
        self.handshake_state() == HandshakeState::Ready
    }

    /// Transport established: wait for HELLO with fresh timing
    pub fn begin_connection(&self) {
        self.liveness.reset();
        *self.handshake.lock() = HandshakeState::AwaitingHello;
    }

    /// Transport closed
    pub fn end_connection(&self) {
        *self.handshake.lock() = HandshakeState::Disconnected;
        self.liveness.reset();
    }

    pub fn liveness(&self) -> &LivenessTracker {
        &self.liveness
    }

    /// Build the IDENTIFY payload for this session
    pub fn identify_payload(&self) -> IdentifyPayload {
        IdentifyPayload::new(
            self.token.expose(),
            self.intents.bits(),
            IdentifyProperties::default(),
        )
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("token", &self.token)
            .field("intents", &self.intents)
            .field("application_id", &self.application_id())
            .field("handshake", &self.handshake_state())
            .finish()
    }
}

//! Invocation context passed to command handlers

use crate::events::InteractionCreateEvent;
use crate::session::{HandshakeState, SessionState};
use std::sync::Arc;
use std::time::Duration;

/// What a handler may read about the invocation and the session
#[derive(Debug, Clone)]
pub struct CommandContext {
    session: Arc<SessionState>,
    command: String,
    interaction_id: Option<String>,
    channel_id: Option<String>,
    guild_id: Option<String>,
    user_id: Option<String>,
    user_name: Option<String>,
}

impl CommandContext {
    /// Context for a command invoked outside an interaction
    #[must_use]
    pub fn new(session: Arc<SessionState>, command: impl Into<String>) -> Self {
        Self {
            session,
            command: command.into(),
            interaction_id: None,
            channel_id: None,
            guild_id: None,
            user_id: None,
            user_name: None,
        }
    }

    /// Context for an INTERACTION_CREATE event, `None` if it names no command
    #[must_use]
    pub fn from_interaction(session: Arc<SessionState>, event: &InteractionCreateEvent) -> Option<Self> {
        let command = event.command_name()?;
        let user = event.invoker();
        Some(Self {
            session,
            command: command.to_string(),
            interaction_id: Some(event.id.clone()),
            channel_id: event.channel_id.clone(),
            guild_id: event.guild_id.clone(),
            user_id: user.map(|u| u.id.clone()),
            user_name: user.map(|u| u.global_name.clone().unwrap_or_else(|| u.username.clone())),
        })
    }

    /// Last measured heartbeat round trip, `None` until the first ACK
    pub fn latency(&self) -> Option<Duration> {
        self.session.liveness().latency()
    }

    pub fn handshake_state(&self) -> HandshakeState {
        self.session.handshake_state()
    }

    pub fn application_id(&self) -> Option<String> {
        self.session.application_id()
    }

    /// Name of the invoked command
    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn interaction_id(&self) -> Option<&str> {
        self.interaction_id.as_deref()
    }

    pub fn channel_id(&self) -> Option<&str> {
        self.channel_id.as_deref()
    }

    pub fn guild_id(&self) -> Option<&str> {
        self.guild_id.as_deref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Display name of the invoking user
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }
}

//! Event payload definitions
//!
//! Only the fields the client reads are modelled; unknown fields are ignored.

use serde::{Deserialize, Serialize};

// === Connection Events ===

/// READY event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyEvent {
    /// Gateway protocol version
    pub v: u8,

    /// The bot user
    pub user: UserPayload,

    /// Session ID (unused, sessions are never resumed)
    pub session_id: String,

    /// Application the bot belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<ReadyApplication>,
}

/// Partial application object in READY
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyApplication {
    pub id: String,
}

// === User Payloads ===

/// User data included in events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPayload {
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
}

/// Guild member wrapper, present on interactions invoked in a guild
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserPayload>,
}

// === Interaction Events ===

/// Interaction kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionType;

impl InteractionType {
    /// Slash command invocation; the only kind this client answers
    pub const APPLICATION_COMMAND: u8 = 2;
}

/// INTERACTION_CREATE event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionCreateEvent {
    /// Interaction ID, first half of the callback path
    pub id: String,

    /// Continuation token, second half of the callback path
    pub token: String,

    /// Interaction kind, see [`InteractionType`]
    #[serde(rename = "type")]
    pub kind: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,

    /// Command data (absent for pings)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,

    /// Invoking member (guild interactions)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<MemberPayload>,

    /// Invoking user (DM interactions)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserPayload>,
}

impl InteractionCreateEvent {
    /// Check if this interaction is a slash command invocation
    #[must_use]
    pub fn is_command(&self) -> bool {
        self.kind == InteractionType::APPLICATION_COMMAND
    }

    /// Name of the invoked command, if any
    #[must_use]
    pub fn command_name(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.name.as_str())
    }

    /// The invoking user, from either the member or the DM user field
    #[must_use]
    pub fn invoker(&self) -> Option<&UserPayload> {
        self.member
            .as_ref()
            .and_then(|m| m.user.as_ref())
            .or(self.user.as_ref())
    }
}

/// Application command data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Command name
    pub name: String,
}

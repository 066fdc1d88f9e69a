//! Gateway intents bitflags
//!
//! Intents select which event groups the gateway pushes to the session.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// Gateway intent flags sent in IDENTIFY
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GatewayIntents: u64 {
        /// Guild create/update/delete, channel and role events
        const GUILDS                   = 1 << 0;
        /// Member join/update/leave (privileged)
        const GUILD_MEMBERS            = 1 << 1;
        /// Ban and audit log events
        const GUILD_MODERATION         = 1 << 2;
        /// Messages in guild channels
        const GUILD_MESSAGES           = 1 << 9;
        /// Reactions in guild channels
        const GUILD_MESSAGE_REACTIONS  = 1 << 10;
        /// Direct messages
        const DIRECT_MESSAGES          = 1 << 12;
        /// Message content visibility (privileged)
        const MESSAGE_CONTENT          = 1 << 15;

        /// Intents requested by the bot session
        const DEFAULT = Self::MESSAGE_CONTENT.bits();
    }
}

impl Default for GatewayIntents {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for GatewayIntents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

// Serialized as a plain integer on the wire
impl Serialize for GatewayIntents {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for GatewayIntents {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Self::from_bits_truncate)
    }
}

impl From<GatewayIntents> for u64 {
    fn from(intents: GatewayIntents) -> Self {
        intents.bits()
    }
}

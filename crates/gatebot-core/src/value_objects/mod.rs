//! Value objects - immutable types that represent protocol concepts

mod intents;
mod message_flags;

pub use intents::GatewayIntents;
pub use message_flags::MessageFlags;

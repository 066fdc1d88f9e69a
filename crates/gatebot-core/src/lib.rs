//! # gatebot-core
//!
//! Domain layer containing the outbound message entities and the protocol value objects.
//! This crate has zero dependencies on infrastructure (transport, HTTP client, etc.).

pub mod entities;
pub mod error;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{CommandSpec, Embed, EmbedFooter, Message};
pub use error::DomainError;
pub use value_objects::{GatewayIntents, MessageFlags};

//! Domain entities - outbound messages and command metadata

mod command;
mod embed;
mod message;

pub use command::CommandSpec;
pub use embed::{Embed, EmbedFooter};
pub use message::Message;

//! Slash commands
//!
//! Handlers, the context they receive, and the bounded registry that routes
//! interactions to them by name.

mod context;
mod handler;
mod registry;

pub use context::CommandContext;
pub use handler::{handler_fn, reply_with, CommandHandler};
pub use registry::{CommandRegistry, RegisteredCommand, RegistryError};

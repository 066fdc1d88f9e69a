//! Command handler trait

use super::CommandContext;
use gatebot_core::Message;

/// Produces the reply for a command invocation
///
/// Runs on the driver task; a slow handler delays heartbeats.
pub trait CommandHandler: Send + Sync {
    /// Build a reply, or `None` to leave the interaction unanswered
    fn invoke(&self, ctx: &CommandContext) -> Option<Message>;
}

impl<F> CommandHandler for F
where
    F: Fn(&CommandContext) -> Option<Message> + Send + Sync,
{
    fn invoke(&self, ctx: &CommandContext) -> Option<Message> {
        self(ctx)
    }
}

/// Pin a closure to the handler signature so its argument type is inferred
pub fn handler_fn<F>(f: F) -> F
where
    F: Fn(&CommandContext) -> Option<Message> + Send + Sync,
{
    f
}

/// Handler that always replies with the same message
pub fn reply_with(message: impl Into<Message>) -> impl CommandHandler {
    let message = message.into();
    handler_fn(move |_| Some(message.clone()))
}

//! Interaction handler (INTERACTION_CREATE dispatch)

use super::{Dispatched, HandlerError, HandlerResult};
use crate::commands::{CommandContext, CommandRegistry};
use crate::events::InteractionCreateEvent;
use crate::rest::RestApi;
use crate::session::SessionState;
use serde_json::Value;
use std::sync::Arc;

/// Runs slash command handlers and posts their replies
pub struct InteractionHandler;

impl InteractionHandler {
    pub async fn handle(
        session: &Arc<SessionState>,
        registry: &CommandRegistry,
        rest: &RestApi,
        data: Option<Value>,
    ) -> HandlerResult<Dispatched> {
        let data = data.ok_or_else(|| {
            HandlerError::InvalidPayload("INTERACTION_CREATE without data".to_string())
        })?;
        let event: InteractionCreateEvent = serde_json::from_value(data)
            .map_err(|e| HandlerError::InvalidPayload(format!("INTERACTION_CREATE: {e}")))?;

        if !event.is_command() {
            tracing::debug!(interaction_id = %event.id, kind = event.kind, "Ignoring non-command interaction");
            return Ok(Dispatched::Ignored);
        }

        let Some(ctx) = CommandContext::from_interaction(Arc::clone(session), &event) else {
            return Err(HandlerError::InvalidPayload(
                "Command interaction without a command name".to_string(),
            ));
        };

        let Some(command) = registry.get(ctx.command()) else {
            tracing::debug!(command = %ctx.command(), "Interaction for unregistered command");
            return Ok(Dispatched::Unanswered);
        };

        let Some(reply) = command.handler().invoke(&ctx) else {
            tracing::debug!(command = %ctx.command(), "Handler produced no reply");
            return Ok(Dispatched::Unanswered);
        };

        rest.create_interaction_response(&event.id, &event.token, &reply)
            .await?;

        tracing::info!(
            command = %ctx.command(),
            interaction_id = %event.id,
            user_id = ctx.user_id().unwrap_or("-"),
            "Replied to command"
        );

        Ok(Dispatched::Replied {
            command: ctx.command().to_string(),
        })
    }
}

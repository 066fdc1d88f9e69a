//! Message entity - an outbound reply or channel message

use super::embed::{check_length, Embed};
use crate::error::DomainError;
use crate::value_objects::MessageFlags;

/// Message entity
///
/// Owns at most one embed. Built by command handlers and consumed by the
/// send/response path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub content: Option<String>,
    pub ephemeral: bool,
    pub embed: Option<Embed>,
}

impl Message {
    pub const MAX_CONTENT_LENGTH: usize = 2000;

    /// Create a message with text content
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ephemeral: false,
            embed: None,
        }
    }

    /// Create a message with no content (typically embed-only)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Mark the message as visible only to the invoking user
    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    /// Attach an embed, replacing any previous one
    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embed = Some(embed);
        self
    }

    /// Replace the attached embed, returning the previous one
    pub fn set_embed(&mut self, embed: Embed) -> Option<Embed> {
        self.embed.replace(embed)
    }

    /// Flags to send alongside an interaction response
    pub fn flags(&self) -> MessageFlags {
        if self.ephemeral {
            MessageFlags::EPHEMERAL
        } else {
            MessageFlags::empty()
        }
    }

    /// Content, if present and not blank
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.trim().is_empty())
    }

    /// Check if the message has nothing to show
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text().is_none() && self.embed.as_ref().map_or(true, Embed::is_empty)
    }

    /// Validate against the remote limits before sending
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::EmptyMessage);
        }
        check_length("content", self.content.as_deref(), Self::MAX_CONTENT_LENGTH)?;
        if let Some(embed) = &self.embed {
            embed.validate()?;
        }
        Ok(())
    }
}

impl From<String> for Message {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}

impl From<&str> for Message {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

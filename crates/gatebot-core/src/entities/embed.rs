//! Embed entity - rich content block attached to a message

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::DomainError;

/// Embed footer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Embed entity
///
/// Serializes directly into the wire shape: unset fields are omitted, and a
/// color of `0` means "no color".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "is_unset_color")]
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

fn is_unset_color(color: &u32) -> bool {
    *color == 0
}

impl Embed {
    pub const MAX_TITLE_LENGTH: usize = 256;
    pub const MAX_DESCRIPTION_LENGTH: usize = 4096;
    pub const MAX_FOOTER_LENGTH: usize = 2048;

    /// Create an embed with a title, description and color (`0` for none)
    pub fn new(title: impl Into<String>, description: impl Into<String>, color: u32) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            footer: None,
            color,
            timestamp: None,
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the footer text
    pub fn with_footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(EmbedFooter { text: text.into() });
        self
    }

    /// Set the sidebar color
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    /// Set the timestamp shown next to the footer
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Check if the embed carries nothing visible
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.footer.is_none()
    }

    /// Check field lengths against the remote limits
    pub fn validate(&self) -> Result<(), DomainError> {
        check_length("embed title", self.title.as_deref(), Self::MAX_TITLE_LENGTH)?;
        check_length(
            "embed description",
            self.description.as_deref(),
            Self::MAX_DESCRIPTION_LENGTH,
        )?;
        check_length(
            "embed footer",
            self.footer.as_ref().map(|f| f.text.as_str()),
            Self::MAX_FOOTER_LENGTH,
        )
    }
}

pub(crate) fn check_length(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), DomainError> {
    match value {
        Some(v) if v.chars().count() > max => Err(DomainError::FieldTooLong { field, max }),
        _ => Ok(()),
    }
}

//! Command metadata - the name and description registered with the remote side

use serde::Serialize;

use crate::error::DomainError;

/// Slash command metadata
///
/// The name doubles as the routing key for incoming interactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    pub name: String,
    pub description: String,
    /// Command type; always 1 (text-input slash command)
    #[serde(rename = "type")]
    pub kind: u8,
}

impl CommandSpec {
    pub const CHAT_INPUT: u8 = 1;
    pub const MAX_NAME_LENGTH: usize = 32;
    pub const MAX_DESCRIPTION_LENGTH: usize = 100;

    /// Create validated command metadata
    ///
    /// Names are 1-32 characters of lowercase letters, digits, `-` or `_`.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let description = description.into();

        if !Self::is_valid_name(&name) {
            return Err(DomainError::InvalidCommandName(name));
        }
        if description.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "command description is required".to_string(),
            ));
        }
        if description.chars().count() > Self::MAX_DESCRIPTION_LENGTH {
            return Err(DomainError::FieldTooLong {
                field: "command description",
                max: Self::MAX_DESCRIPTION_LENGTH,
            });
        }

        Ok(Self {
            name,
            description,
            kind: Self::CHAT_INPUT,
        })
    }

    /// Check a command name against the remote naming rules
    pub fn is_valid_name(name: &str) -> bool {
        let len = name.chars().count();
        (1..=Self::MAX_NAME_LENGTH).contains(&len)
            && name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    }
}

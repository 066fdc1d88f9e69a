//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Message has neither content nor embed")]
    EmptyMessage,

    #[error("{field} too long: max {max} characters")]
    FieldTooLong { field: &'static str, max: usize },

    #[error("Invalid command name: {0}")]
    InvalidCommandName(String),
}

impl DomainError {
    /// Get an error code string for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EmptyMessage => "EMPTY_MESSAGE",
            Self::FieldTooLong { .. } => "FIELD_TOO_LONG",
            Self::InvalidCommandName(_) => "INVALID_COMMAND_NAME",
        }
    }
}

//! REST error types

use gatebot_core::DomainError;
use thiserror::Error;

/// REST call errors
#[derive(Debug, Error)]
pub enum RestError {
    /// Request never produced a response
    #[error("HTTP transport error: {0}")]
    Transport(String),

    /// Non-2xx response
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Outbound payload failed validation
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl RestError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    /// HTTP status, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

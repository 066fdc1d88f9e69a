//! Handler error types

use crate::rest::RestError;
use crate::transport::TransportError;
use thiserror::Error;

/// Handler error type
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Frame decoded but its payload is unusable
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Outbound frame could not be encoded
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Writing to the connection failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Interaction reply failed
    #[error("Reply failed: {0}")]
    Rest(#[from] RestError),
}

impl HandlerError {
    /// Whether the connection can no longer be used
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;

//! Gateway error types

use crate::commands::RegistryError;
use crate::rest::RestError;
use gatebot_common::AppError;
use thiserror::Error;

/// Errors surfaced to the host
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("Invalid gateway address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Bot is already running")]
    AlreadyRunning,

    #[error("No Tokio runtime is available to run the session")]
    NoRuntime,

    #[error("Application id is unknown")]
    MissingApplicationId,

    #[error(transparent)]
    Rest(#[from] RestError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl GatewayError {
    pub fn invalid_address(address: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidAddress {
            address: address.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Rest(e) => AppError::rest(e),
            GatewayError::Registry(RegistryError::Invalid(e)) => AppError::Domain(e),
            other => AppError::gateway(other),
        }
    }
}

/// Gateway result type
pub type GatewayResult<T> = Result<T, GatewayError>;

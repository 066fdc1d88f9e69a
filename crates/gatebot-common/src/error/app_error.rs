//! Application error types
//!
//! Top-level error for hosts embedding the bot (binary entry points, tests).

use crate::config::ConfigError;
use crate::telemetry::TracingError;
use gatebot_core::DomainError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TracingError),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Gateway session errors
    #[error("Gateway error: {0}")]
    Gateway(String),

    // REST API errors
    #[error("REST API error: {0}")]
    Rest(String),

    // Internal errors
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// Get an error code for log fields
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Telemetry(_) => "TELEMETRY_ERROR",
            Self::Domain(e) => e.code(),
            Self::Gateway(_) => "GATEWAY_ERROR",
            Self::Rest(_) => "REST_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if the error is caused by the local setup rather than the remote side
    #[must_use]
    pub fn is_setup_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Telemetry(_) | Self::Domain(_))
    }

    /// Create a gateway error
    pub fn gateway(msg: impl std::fmt::Display) -> Self {
        Self::Gateway(msg.to_string())
    }

    /// Create a REST error
    pub fn rest(msg: impl std::fmt::Display) -> Self {
        Self::Rest(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

//! Bot configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::fmt;
use std::time::Duration;

/// Main bot configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub env: Environment,
    pub token: BotToken,
    pub rest: RestConfig,
    pub gateway: GatewayConfig,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Bot authentication token
///
/// The secret is never printed: `Debug` is redacted and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct BotToken(String);

impl BotToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token, for IDENTIFY payloads
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header of REST calls
    pub fn authorization(&self) -> String {
        format!("Bot {}", self.0)
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BotToken(***)")
    }
}

/// REST API client configuration
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Base URL including the API version, without trailing slash
    pub api_base: String,
    pub timeout: Duration,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout: Duration::from_secs(default_rest_timeout_secs()),
        }
    }
}

/// Gateway session configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Used when `GET /gateway/bot` fails or returns an unusable URL
    pub fallback_url: String,
    /// Upper bound on how long the driver waits for a frame per loop iteration
    pub poll_interval: Duration,
    /// Command registry capacity
    pub max_commands: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            fallback_url: default_gateway_fallback(),
            poll_interval: Duration::from_millis(default_poll_interval_ms()),
            max_commands: default_max_commands(),
        }
    }
}

// Default value functions
fn default_api_base() -> String {
    "https://discord.com/api/v10".to_string()
}

fn default_gateway_fallback() -> String {
    "wss://gateway.discord.gg/?v=10&encoding=json".to_string()
}

fn default_rest_timeout_secs() -> u64 {
    10
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_max_commands() -> usize {
    100
}

impl BotConfig {
    /// Create a configuration with defaults for everything but the token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            env: Environment::default(),
            token: BotToken::new(token),
            rest: RestConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }

    /// Point REST calls at a different base URL
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.rest.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the fallback gateway URL
    #[must_use]
    pub fn with_gateway_fallback(mut self, url: impl Into<String>) -> Self {
        self.gateway.fallback_url = url.into();
        self
    }

    /// Override the driver poll interval
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.gateway.poll_interval = interval;
        self
    }

    /// Override the command registry capacity
    #[must_use]
    pub fn with_max_commands(mut self, max: usize) -> Self {
        self.gateway.max_commands = max;
        self
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if `DISCORD_TOKEN` is missing or a numeric variable is malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingVar("DISCORD_TOKEN"))?;

        Ok(Self {
            env: lookup("APP_ENV")
                .and_then(|s| Environment::parse(&s))
                .unwrap_or_default(),
            token: BotToken::new(token.trim()),
            rest: RestConfig {
                api_base: lookup("DISCORD_API_BASE")
                    .map(|s| s.trim_end_matches('/').to_string())
                    .unwrap_or_else(default_api_base),
                timeout: Duration::from_secs(parse_or(
                    &lookup,
                    "REST_TIMEOUT_SECS",
                    default_rest_timeout_secs(),
                )?),
            },
            gateway: GatewayConfig {
                fallback_url: lookup("DISCORD_GATEWAY_FALLBACK")
                    .unwrap_or_else(default_gateway_fallback),
                poll_interval: Duration::from_millis(parse_or(
                    &lookup,
                    "GATEWAY_POLL_INTERVAL_MS",
                    default_poll_interval_ms(),
                )?),
                max_commands: parse_or(&lookup, "MAX_COMMANDS", default_max_commands())?,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

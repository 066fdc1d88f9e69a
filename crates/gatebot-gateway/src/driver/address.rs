//! Gateway address resolution

use crate::error::GatewayError;
use reqwest::Url;
use std::fmt;

/// Fully resolved gateway connect address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayAddress {
    url: Url,
}

impl GatewayAddress {
    pub const API_VERSION: &'static str = "10";
    pub const ENCODING: &'static str = "json";

    /// Parse a `ws://` or `wss://` URL, adding the version and encoding query
    /// parameters when absent
    pub fn parse(raw: &str) -> Result<Self, GatewayError> {
        let mut url = Url::parse(raw.trim()).map_err(|e| GatewayError::invalid_address(raw, e))?;

        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(GatewayError::invalid_address(raw, "scheme must be ws or wss"));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(GatewayError::invalid_address(raw, "missing host"));
        }
        if url.port_or_known_default().is_none() {
            return Err(GatewayError::invalid_address(raw, "missing port"));
        }

        let has_version = url.query_pairs().any(|(k, _)| k == "v");
        let has_encoding = url.query_pairs().any(|(k, _)| k == "encoding");
        if !has_version || !has_encoding {
            let mut query = url.query_pairs_mut();
            if !has_version {
                query.append_pair("v", Self::API_VERSION);
            }
            if !has_encoding {
                query.append_pair("encoding", Self::ENCODING);
            }
        }

        Ok(Self { url })
    }

    /// Use `discovered` when it parses, otherwise `fallback`
    pub fn resolve(discovered: Option<&str>, fallback: &str) -> Result<Self, GatewayError> {
        if let Some(raw) = discovered {
            match Self::parse(raw) {
                Ok(address) => return Ok(address),
                Err(e) => tracing::warn!(error = %e, "Discovered gateway URL unusable, using fallback"),
            }
        }
        Self::parse(fallback)
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// Explicit port or the scheme default (443 for wss, 80 for ws)
    pub fn port(&self) -> u16 {
        self.url.port_or_known_default().unwrap_or(443)
    }

    /// Path plus query string
    pub fn path(&self) -> String {
        match self.url.query() {
            Some(query) => format!("{}?{query}", self.url.path()),
            None => self.url.path().to_string(),
        }
    }

    pub fn is_secure(&self) -> bool {
        self.url.scheme() == "wss"
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for GatewayAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

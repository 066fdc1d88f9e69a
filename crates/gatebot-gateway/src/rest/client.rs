//! HTTP client seam

use super::RestError;
use async_trait::async_trait;
use gatebot_common::{BotConfig, BotToken};
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// An outbound API call, relative to the API base URL
#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl RestRequest {
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// Raw response: status code and owned body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResponse {
    pub status: u16,
    pub body: String,
}

impl RestResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail on non-2xx
    pub fn error_for_status(self) -> Result<Self, RestError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(RestError::Status {
                status: self.status,
                body: self.body,
            })
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RestError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Performs authenticated API calls
#[async_trait]
pub trait RestClient: Send + Sync {
    async fn execute(&self, request: RestRequest) -> Result<RestResponse, RestError>;
}

/// `reqwest`-backed client sending `Authorization: Bot <token>`
pub struct HttpRestClient {
    http: reqwest::Client,
    api_base: String,
    token: BotToken,
}

impl HttpRestClient {
    const USER_AGENT: &'static str = concat!("gatebot/", env!("CARGO_PKG_VERSION"));

    pub fn new(config: &BotConfig) -> Result<Self, RestError> {
        let http = reqwest::Client::builder()
            .timeout(config.rest.timeout)
            .build()
            .map_err(RestError::transport)?;

        Ok(Self {
            http,
            api_base: config.rest.api_base.clone(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

#[async_trait]
impl RestClient for HttpRestClient {
    async fn execute(&self, request: RestRequest) -> Result<RestResponse, RestError> {
        let mut builder = self
            .http
            .request(request.method.clone(), self.url(&request.path))
            .header(AUTHORIZATION, self.token.authorization())
            .header(USER_AGENT, Self::USER_AGENT);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(RestError::transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(RestError::transport)?;

        tracing::trace!(
            method = %request.method,
            path = %request.path,
            status,
            "REST call completed"
        );

        Ok(RestResponse { status, body })
    }
}

impl std::fmt::Debug for HttpRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRestClient")
            .field("api_base", &self.api_base)
            .finish()
    }
}

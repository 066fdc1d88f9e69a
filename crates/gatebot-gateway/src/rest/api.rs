//! Typed API calls

use super::{InteractionResponse, MessagePayload, RestClient, RestError, RestRequest};
use gatebot_core::{CommandSpec, Message};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct ApplicationInfo {
    id: String,
}

#[derive(Debug, Deserialize)]
struct GatewayInfo {
    url: String,
}

/// The REST calls a bot session needs
#[derive(Clone)]
pub struct RestApi {
    client: Arc<dyn RestClient>,
}

impl RestApi {
    #[must_use]
    pub fn new(client: Arc<dyn RestClient>) -> Self {
        Self { client }
    }

    /// `GET /applications/@me`
    pub async fn current_application_id(&self) -> Result<String, RestError> {
        let response = self
            .client
            .execute(RestRequest::get("/applications/@me"))
            .await?
            .error_for_status()?;
        Ok(response.json::<ApplicationInfo>()?.id)
    }

    /// `GET /gateway/bot`
    pub async fn gateway_url(&self) -> Result<String, RestError> {
        let response = self
            .client
            .execute(RestRequest::get("/gateway/bot"))
            .await?
            .error_for_status()?;
        Ok(response.json::<GatewayInfo>()?.url)
    }

    /// `POST /applications/{id}/commands`
    pub async fn create_command(&self, application_id: &str, spec: &CommandSpec) -> Result<(), RestError> {
        let application_id = path_segment("application id", application_id)?;
        let body = serde_json::to_value(spec)?;
        self.client
            .execute(RestRequest::post(
                format!("/applications/{application_id}/commands"),
                body,
            ))
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// `POST /channels/{id}/messages`
    pub async fn create_message(&self, channel_id: &str, message: &Message) -> Result<(), RestError> {
        let channel_id = path_segment("channel id", channel_id)?;
        message.validate()?;
        let body = serde_json::to_value(MessagePayload::channel(message))?;
        self.client
            .execute(RestRequest::post(format!("/channels/{channel_id}/messages"), body))
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// `POST /interactions/{id}/{token}/callback`
    pub async fn create_interaction_response(
        &self,
        interaction_id: &str,
        interaction_token: &str,
        message: &Message,
    ) -> Result<(), RestError> {
        let interaction_id = path_segment("interaction id", interaction_id)?;
        let interaction_token = path_segment("interaction token", interaction_token)?;
        message.validate()?;
        let body = serde_json::to_value(InteractionResponse::message(message))?;
        self.client
            .execute(RestRequest::post(
                format!("/interactions/{interaction_id}/{interaction_token}/callback"),
                body,
            ))
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl std::fmt::Debug for RestApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestApi").finish_non_exhaustive()
    }
}

fn path_segment<'a>(what: &str, value: &'a str) -> Result<&'a str, RestError> {
    if value.is_empty() || value.contains(['/', '?', '#']) {
        return Err(RestError::InvalidRequest(format!("invalid {what}: {value:?}")));
    }
    Ok(value)
}

//! REST API access
//!
//! A transport seam ([`RestClient`]) and the typed calls built on it ([`RestApi`]).

mod api;
mod client;
mod error;
mod payloads;

pub use api::RestApi;
pub use client::{HttpRestClient, RestClient, RestRequest, RestResponse};
pub use error::RestError;
pub use payloads::{InteractionResponse, MessagePayload};

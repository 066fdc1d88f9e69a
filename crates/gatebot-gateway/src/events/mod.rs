//! Gateway events
//!
//! Dispatch events the client decodes from op 0 frames.

mod event_types;
mod payloads;

pub use event_types::GatewayEventType;
pub use payloads::{
    InteractionCreateEvent, InteractionData, InteractionType, MemberPayload, ReadyApplication,
    ReadyEvent, UserPayload,
};

//! Outbound REST bodies

use gatebot_core::{Embed, Message, MessageFlags};
use serde::Serialize;

/// Message body for channel messages and interaction replies
#[derive(Debug, Clone, Serialize)]
pub struct MessagePayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<&'a str>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<&'a Embed>,

    #[serde(skip_serializing_if = "MessageFlags::is_empty")]
    pub flags: MessageFlags,
}

impl<'a> MessagePayload<'a> {
    /// Body for `POST /channels/{id}/messages`; ephemeral has no meaning there
    #[must_use]
    pub fn channel(message: &'a Message) -> Self {
        Self {
            flags: MessageFlags::empty(),
            ..Self::interaction(message)
        }
    }

    /// Body for an interaction reply, including flags
    #[must_use]
    pub fn interaction(message: &'a Message) -> Self {
        Self {
            content: message.text(),
            embeds: message.embed.iter().filter(|e| !e.is_empty()).collect(),
            flags: message.flags(),
        }
    }
}

/// Interaction callback body
#[derive(Debug, Clone, Serialize)]
pub struct InteractionResponse<'a> {
    #[serde(rename = "type")]
    pub kind: u8,
    pub data: MessagePayload<'a>,
}

impl<'a> InteractionResponse<'a> {
    /// Reply with a message in the invoking channel
    pub const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;

    #[must_use]
    pub fn message(message: &'a Message) -> Self {
        Self {
            kind: Self::CHANNEL_MESSAGE_WITH_SOURCE,
            data: MessagePayload::interaction(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_reply() {
        let message = Message::new("Hi");
        let body = serde_json::to_value(InteractionResponse::message(&message)).unwrap();
        assert_eq!(body, json!({"type": 4, "data": {"content": "Hi"}}));
    }

    #[test]
    fn test_ephemeral_embed_reply() {
        let message = Message::empty()
            .with_embed(Embed::new("Title", "Body", 0x00ff00))
            .ephemeral();
        let body = serde_json::to_value(InteractionResponse::message(&message)).unwrap();
        assert_eq!(
            body,
            json!({
                "type": 4,
                "data": {
                    "embeds": [{"title": "Title", "description": "Body", "color": 65280}],
                    "flags": 64
                }
            })
        );
    }

    #[test]
    fn test_channel_message_drops_flags() {
        let message = Message::new("hello").ephemeral();
        let body = serde_json::to_value(MessagePayload::channel(&message)).unwrap();
        assert_eq!(body, json!({"content": "hello"}));
    }

    #[test]
    fn test_blank_content_omitted() {
        let message = Message::new("   ").with_embed(Embed::default().with_title("T"));
        let body = serde_json::to_value(MessagePayload::channel(&message)).unwrap();
        assert_eq!(body, json!({"embeds": [{"title": "T"}]}));
    }
}

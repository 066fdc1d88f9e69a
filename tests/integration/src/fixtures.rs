//! Test fixtures and data generators
//!
//! Provides reusable credentials and gateway event payloads.

use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

/// Token the mock API accepts
pub const TEST_TOKEN: &str = "test-bot-token";

/// Application id returned by `/applications/@me`
pub const TEST_APPLICATION_ID: &str = "100200300";

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A dispatch event the mock gateway sends after IDENTIFY
#[derive(Debug, Clone)]
pub struct DispatchEvent {
    pub name: String,
    pub data: Value,
}

impl DispatchEvent {
    /// READY for the test application
    pub fn ready() -> Self {
        Self {
            name: "READY".to_string(),
            data: json!({
                "v": 10,
                "user": {"id": "42", "username": "gatebot", "bot": true},
                "guilds": [],
                "session_id": format!("session-{}", unique_suffix()),
                "application": {"id": TEST_APPLICATION_ID, "flags": 0}
            }),
        }
    }

    /// Slash command invocation in a guild channel
    pub fn slash_command(id: &str, token: &str, command: &str) -> Self {
        Self {
            name: "INTERACTION_CREATE".to_string(),
            data: json!({
                "id": id,
                "token": token,
                "type": 2,
                "application_id": TEST_APPLICATION_ID,
                "channel_id": "555",
                "guild_id": "777",
                "data": {"id": "9001", "name": command, "type": 1},
                "member": {"user": {"id": "31337", "username": "tester", "global_name": "Tester"}}
            }),
        }
    }

    /// An event the bot does not act on
    pub fn message_create(content: &str) -> Self {
        Self {
            name: "MESSAGE_CREATE".to_string(),
            data: json!({"id": "1", "channel_id": "555", "content": content}),
        }
    }
}

//! Gateway bot end-to-end tests
//!
//! Each test starts an in-process mock of the REST API and gateway and drives
//! a real `Bot` against it. No external services are needed.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use gatebot_core::{Embed, Message};
use gatebot_gateway::{handler_fn, reply_with, Bot, GatewayError, HandshakeState};
use integration_tests::{eventually, fixtures::*, MockDiscord, MockOptions};
use serde_json::json;

// ============================================================================
// Setup
// ============================================================================

#[tokio::test]
async fn test_init_resolves_application_id() {
    let mock = MockDiscord::start().await.expect("Failed to start mock");
    let bot = Bot::init(mock.bot_config()).await.unwrap();

    assert_eq!(bot.application_id().as_deref(), Some(TEST_APPLICATION_ID));
    assert!(bot.latency().is_none());

    let calls = mock.recorded(|r| r.calls.clone());
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, "/api/v10/applications/@me");
    assert_eq!(
        calls[0].authorization.as_deref(),
        Some(format!("Bot {TEST_TOKEN}").as_str())
    );
}

#[tokio::test]
async fn test_bad_token_is_not_fatal() {
    let mock = MockDiscord::start().await.expect("Failed to start mock");
    let mut bot = Bot::init(mock.bot_config_with_token("wrong-token"))
        .await
        .unwrap();
    assert!(bot.application_id().is_none());

    bot.register_command("ping", "Check bot latency", reply_with("pong"))
        .unwrap();
    let err = bot.register_remote().await.unwrap_err();
    assert!(matches!(err, GatewayError::MissingApplicationId));
}

#[tokio::test]
async fn test_register_remote_posts_every_command() {
    let mock = MockDiscord::start_with(MockOptions {
        rejected_commands: vec!["time".to_string()],
        ..MockOptions::default()
    })
    .await
    .expect("Failed to start mock");

    let mut bot = Bot::init(mock.bot_config()).await.unwrap();
    bot.register_command("ping", "Check bot latency", reply_with("pong"))
        .unwrap();
    bot.register_command("time", "Get current server time", reply_with("now"))
        .unwrap();
    bot.register_command("hello", "Say hello to the bot", reply_with("Hi"))
        .unwrap();

    let report = bot.register_remote().await.unwrap();
    assert_eq!(report.registered, ["ping", "hello"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "time");
    assert_eq!(report.failed[0].1.status(), Some(400));

    let bodies: Vec<_> = mock.recorded(|r| {
        r.calls_to(&format!("/api/v10/applications/{TEST_APPLICATION_ID}/commands"))
            .into_iter()
            .map(|c| c.body.clone())
            .collect()
    });
    assert_eq!(bodies.len(), 3);
    assert_eq!(
        bodies[0],
        Some(json!({"name": "ping", "description": "Check bot latency", "type": 1}))
    );
}

// ============================================================================
// Gateway session
// ============================================================================

#[tokio::test]
async fn test_handshake_and_heartbeat() {
    let mock = MockDiscord::start().await.expect("Failed to start mock");
    let mut bot = Bot::init(mock.bot_config()).await.unwrap();
    bot.start().unwrap();

    assert!(mock.wait_until(|r| !r.identifies().is_empty()).await);
    let identify = mock.recorded(|r| r.identifies()[0].clone());
    assert_eq!(identify["d"]["token"], TEST_TOKEN);
    assert_eq!(identify["d"]["intents"], 32768);
    assert!(identify["d"]["properties"]["os"].is_string());

    // The first frame on the connection is IDENTIFY
    let first = mock.recorded(|r| r.frames[0].clone());
    assert_eq!(first["op"], 2);

    assert!(eventually(|| bot.latency().is_some()).await);
    let heartbeat = mock.recorded(|r| r.heartbeats()[0].clone());
    assert_eq!(heartbeat, json!({"op": 1, "d": null}));

    assert_eq!(bot.handshake_state(), HandshakeState::Ready);
    let url = bot.gateway_url().unwrap();
    assert!(url.starts_with(&mock.gateway_url()));
    assert!(url.ends_with("?v=10&encoding=json"));

    bot.shutdown().await;
}

#[tokio::test]
async fn test_single_identify_per_connection() {
    let mock = MockDiscord::start().await.expect("Failed to start mock");
    let mut bot = Bot::init(mock.bot_config()).await.unwrap();
    bot.start().unwrap();

    assert!(mock.wait_until(|r| r.heartbeats().len() >= 3).await);
    assert_eq!(mock.recorded(|r| r.identifies().len()), 1);

    bot.shutdown().await;
}

#[tokio::test]
async fn test_fallback_gateway_when_lookup_fails() {
    let mock = MockDiscord::start_with(MockOptions {
        advertise_gateway: false,
        ..MockOptions::default()
    })
    .await
    .expect("Failed to start mock");

    let mut bot = Bot::init(mock.bot_config()).await.unwrap();
    bot.start().unwrap();

    assert!(mock.wait_until(|r| !r.identifies().is_empty()).await);
    assert!(mock.recorded(|r| !r.calls_to("/api/v10/gateway/bot").is_empty()));

    bot.shutdown().await;
}

#[tokio::test]
async fn test_latency_unknown_without_acks() {
    let mock = MockDiscord::start_with(MockOptions {
        ack_heartbeats: false,
        ..MockOptions::default()
    })
    .await
    .expect("Failed to start mock");

    let mut bot = Bot::init(mock.bot_config()).await.unwrap();
    bot.start().unwrap();

    // Heartbeats keep flowing even though none are acknowledged
    assert!(mock.wait_until(|r| r.heartbeats().len() >= 2).await);
    assert!(bot.latency().is_none());
    assert!(bot.is_running());

    bot.shutdown().await;
}

// ============================================================================
// Commands
// ============================================================================

#[tokio::test]
async fn test_interaction_gets_callback() {
    let mock = MockDiscord::start_with(MockOptions {
        dispatches: vec![
            DispatchEvent::ready(),
            DispatchEvent::message_create("not a command"),
            DispatchEvent::slash_command("I1", "TK1", "hello"),
        ],
        ..MockOptions::default()
    })
    .await
    .expect("Failed to start mock");

    let mut bot = Bot::init(mock.bot_config()).await.unwrap();
    bot.register_command("hello", "Say hello to the bot", reply_with("Hi"))
        .unwrap();
    bot.start().unwrap();

    assert!(
        mock.wait_until(|r| !r.calls_to("/api/v10/interactions/").is_empty())
            .await
    );
    let call = mock.recorded(|r| r.calls_to("/api/v10/interactions/")[0].clone());
    assert_eq!(call.method, "POST");
    assert_eq!(call.path, "/api/v10/interactions/I1/TK1/callback");
    assert_eq!(call.body, Some(json!({"type": 4, "data": {"content": "Hi"}})));

    bot.shutdown().await;
}

#[tokio::test]
async fn test_handler_sees_invocation_context() {
    let mock = MockDiscord::start_with(MockOptions {
        dispatches: vec![
            DispatchEvent::slash_command("I2", "TK2", "whoami"),
            DispatchEvent::slash_command("I3", "TK3", "unknown"),
            DispatchEvent::slash_command("I4", "TK4", "embed"),
        ],
        ..MockOptions::default()
    })
    .await
    .expect("Failed to start mock");

    let mut bot = Bot::init(mock.bot_config()).await.unwrap();
    bot.register_command(
        "whoami",
        "Who invoked this",
        handler_fn(|ctx| {
            Some(Message::new(format!(
                "{} in {}",
                ctx.user_name()?,
                ctx.channel_id()?
            )))
        }),
    )
    .unwrap();
    bot.register_command(
        "embed",
        "Embed demo",
        handler_fn(|_| {
            Some(
                Message::empty()
                    .with_embed(Embed::new("Embed Demo", "Rich content", 0x00ff00))
                    .ephemeral(),
            )
        }),
    )
    .unwrap();
    bot.start().unwrap();

    assert!(
        mock.wait_until(|r| r.calls_to("/api/v10/interactions/").len() >= 2)
            .await
    );
    let calls = mock.recorded(|r| {
        r.calls_to("/api/v10/interactions/")
            .into_iter()
            .cloned()
            .collect::<Vec<_>>()
    });

    assert_eq!(calls[0].path, "/api/v10/interactions/I2/TK2/callback");
    assert_eq!(
        calls[0].body,
        Some(json!({"type": 4, "data": {"content": "Tester in 555"}}))
    );
    // The unknown command produced no callback
    assert_eq!(calls[1].path, "/api/v10/interactions/I4/TK4/callback");
    assert_eq!(
        calls[1].body,
        Some(json!({
            "type": 4,
            "data": {
                "embeds": [{"title": "Embed Demo", "description": "Rich content", "color": 65280}],
                "flags": 64
            }
        }))
    );

    bot.shutdown().await;
}

#[tokio::test]
async fn test_send_message() {
    let mock = MockDiscord::start().await.expect("Failed to start mock");
    let bot = Bot::init(mock.bot_config()).await.unwrap();

    let message = Message::new("hello channel").with_embed(Embed::new("Title", "Body", 0));
    bot.send_message("555", &message).await.unwrap();

    let call = mock.recorded(|r| r.calls_to("/api/v10/channels/")[0].clone());
    assert_eq!(call.path, "/api/v10/channels/555/messages");
    assert_eq!(
        call.body,
        Some(json!({
            "content": "hello channel",
            "embeds": [{"title": "Title", "description": "Body"}]
        }))
    );
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
async fn test_stop_twice_then_restart() {
    let mock = MockDiscord::start().await.expect("Failed to start mock");
    let mut bot = Bot::init(mock.bot_config()).await.unwrap();
    bot.start().unwrap();
    assert!(matches!(bot.start(), Err(GatewayError::AlreadyRunning)));

    assert!(mock.wait_until(|r| !r.identifies().is_empty()).await);

    bot.stop().await;
    bot.stop().await;
    assert!(!bot.is_running());
    assert_eq!(bot.handshake_state(), HandshakeState::Disconnected);

    bot.start().unwrap();
    assert!(mock.wait_until(|r| r.identifies().len() == 2).await);
    assert_eq!(mock.recorded(|r| r.connections), 2);

    bot.shutdown().await;
}

#[tokio::test]
async fn test_drop_signals_driver() {
    let mock = MockDiscord::start().await.expect("Failed to start mock");
    let mut bot = Bot::init(mock.bot_config()).await.unwrap();
    bot.start().unwrap();
    assert!(mock.wait_until(|r| !r.identifies().is_empty()).await);

    drop(bot);

    // With the driver gone, heartbeats stop arriving
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    let before = mock.recorded(|r| r.heartbeats().len());
    tokio::time::sleep(std::time::Duration::from_millis(300)).await;
    assert_eq!(mock.recorded(|r| r.heartbeats().len()), before);
}

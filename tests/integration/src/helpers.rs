//! Test helpers for integration tests
//!
//! Provides an in-process mock of the REST API and gateway, built on axum,
//! that records every request and frame the bot sends.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures_util::{SinkExt, StreamExt};
use gatebot_common::BotConfig;
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{DispatchEvent, TEST_APPLICATION_ID, TEST_TOKEN};

/// Poll interval used by bots under test
pub const TEST_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Default wait for asynchronous effects
pub const WAIT: Duration = Duration::from_secs(5);

/// A REST request received by the mock
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

/// Everything the mock has seen
#[derive(Debug, Default)]
pub struct Recorded {
    pub calls: Vec<RecordedCall>,
    /// Frames received on the gateway socket, in order
    pub frames: Vec<Value>,
    pub connections: usize,
}

impl Recorded {
    /// IDENTIFY frames
    pub fn identifies(&self) -> Vec<&Value> {
        self.frames_with_op(2)
    }

    /// Heartbeat frames
    pub fn heartbeats(&self) -> Vec<&Value> {
        self.frames_with_op(1)
    }

    fn frames_with_op(&self, op: u64) -> Vec<&Value> {
        self.frames
            .iter()
            .filter(|f| f["op"].as_u64() == Some(op))
            .collect()
    }

    /// Calls whose path starts with `prefix`
    pub fn calls_to(&self, prefix: &str) -> Vec<&RecordedCall> {
        self.calls
            .iter()
            .filter(|c| c.path.starts_with(prefix))
            .collect()
    }
}

/// Mock behaviour
#[derive(Debug, Clone)]
pub struct MockOptions {
    /// Interval announced in HELLO
    pub heartbeat_interval_ms: u64,
    /// Whether `/gateway/bot` answers (otherwise 503)
    pub advertise_gateway: bool,
    /// Whether heartbeats get an op 11 reply
    pub ack_heartbeats: bool,
    /// Events sent after each IDENTIFY
    pub dispatches: Vec<DispatchEvent>,
    /// Command names the API refuses to create
    pub rejected_commands: Vec<String>,
}

impl Default for MockOptions {
    fn default() -> Self {
        Self {
            heartbeat_interval_ms: 50,
            advertise_gateway: true,
            ack_heartbeats: true,
            dispatches: Vec::new(),
            rejected_commands: Vec::new(),
        }
    }
}

struct MockState {
    options: MockOptions,
    addr: SocketAddr,
    recorded: Mutex<Recorded>,
}

impl MockState {
    fn record_call(&self, method: &Method, uri: &Uri, headers: &HeaderMap, body: Option<&str>) {
        let call = RecordedCall {
            method: method.to_string(),
            path: uri.path().to_string(),
            authorization: headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body: body.and_then(|b| serde_json::from_str(b).ok()),
        };
        self.recorded.lock().calls.push(call);
    }
}

/// Mock REST API and gateway on an ephemeral port
pub struct MockDiscord {
    pub addr: SocketAddr,
    state: Arc<MockState>,
    _handle: JoinHandle<()>,
}

impl MockDiscord {
    /// Start a mock with default options
    pub async fn start() -> Result<Self> {
        Self::start_with(MockOptions::default()).await
    }

    /// Start a mock with custom options
    pub async fn start_with(options: MockOptions) -> Result<Self> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let state = Arc::new(MockState {
            options,
            addr,
            recorded: Mutex::new(Recorded::default()),
        });
        let app = router(Arc::clone(&state));

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            state,
            _handle: handle,
        })
    }

    /// REST base URL
    pub fn api_base(&self) -> String {
        format!("http://{}/api/v10", self.addr)
    }

    /// Gateway URL without query parameters
    pub fn gateway_url(&self) -> String {
        format!("ws://{}/gateway", self.addr)
    }

    /// Bot configuration pointing at this mock
    pub fn bot_config(&self) -> BotConfig {
        self.bot_config_with_token(TEST_TOKEN)
    }

    pub fn bot_config_with_token(&self, token: &str) -> BotConfig {
        BotConfig::new(token)
            .with_api_base(self.api_base())
            .with_gateway_fallback(self.gateway_url())
            .with_poll_interval(TEST_POLL_INTERVAL)
    }

    /// Inspect what has been recorded so far
    pub fn recorded<T>(&self, f: impl FnOnce(&Recorded) -> T) -> T {
        f(&self.state.recorded.lock())
    }

    /// Wait until `condition` holds for the recorded data
    pub async fn wait_until(&self, condition: impl Fn(&Recorded) -> bool) -> bool {
        eventually(|| self.recorded(&condition)).await
    }
}

/// Poll `condition` until it holds or [`WAIT`] elapses
pub async fn eventually(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + WAIT;
    loop {
        if condition() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/v10/applications/@me", get(current_application))
        .route("/api/v10/gateway/bot", get(gateway_bot))
        .route("/api/v10/applications/:application_id/commands", post(create_command))
        .route("/api/v10/channels/:channel_id/messages", post(create_message))
        .route(
            "/api/v10/interactions/:interaction_id/:token/callback",
            post(interaction_callback),
        )
        .route("/gateway", get(gateway))
        .with_state(state)
}

fn is_authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bot {TEST_TOKEN}"))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "401: Unauthorized", "code": 0})),
    )
        .into_response()
}

async fn current_application(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.record_call(&method, &uri, &headers, None);
    if !is_authorized(&headers) {
        return unauthorized();
    }
    Json(json!({"id": TEST_APPLICATION_ID, "name": "gatebot", "bot_public": true})).into_response()
}

async fn gateway_bot(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.record_call(&method, &uri, &headers, None);
    if !is_authorized(&headers) {
        return unauthorized();
    }
    if !state.options.advertise_gateway {
        return (StatusCode::SERVICE_UNAVAILABLE, "gateway lookup disabled").into_response();
    }
    Json(json!({
        "url": format!("ws://{}/gateway", state.addr),
        "shards": 1,
        "session_start_limit": {"total": 1000, "remaining": 999, "reset_after": 0, "max_concurrency": 1}
    }))
    .into_response()
}

async fn create_command(
    State(state): State<Arc<MockState>>,
    Path(application_id): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    state.record_call(&method, &uri, &headers, Some(&body));
    if !is_authorized(&headers) {
        return unauthorized();
    }

    let command: Value = serde_json::from_str(&body).unwrap_or_default();
    let name = command["name"].as_str().unwrap_or_default();
    if state.options.rejected_commands.iter().any(|r| r == name) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Invalid Form Body", "code": 50035})),
        )
            .into_response();
    }

    (
        StatusCode::CREATED,
        Json(json!({
            "id": "9001",
            "application_id": application_id,
            "name": name,
            "description": command["description"],
            "type": command["type"]
        })),
    )
        .into_response()
}

async fn create_message(
    State(state): State<Arc<MockState>>,
    Path(channel_id): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    state.record_call(&method, &uri, &headers, Some(&body));
    if !is_authorized(&headers) {
        return unauthorized();
    }
    Json(json!({"id": "8001", "channel_id": channel_id})).into_response()
}

async fn interaction_callback(
    State(state): State<Arc<MockState>>,
    Path((_interaction_id, _token)): Path<(String, String)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    // Interaction callbacks are authenticated by the token in the path
    state.record_call(&method, &uri, &headers, Some(&body));
    StatusCode::NO_CONTENT.into_response()
}

async fn gateway(State(state): State<Arc<MockState>>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_gateway(state, socket))
}

async fn run_gateway(state: Arc<MockState>, socket: WebSocket) {
    state.recorded.lock().connections += 1;
    let (mut tx, mut rx) = socket.split();

    let hello = json!({"op": 10, "d": {"heartbeat_interval": state.options.heartbeat_interval_ms}});
    if tx.send(WsMessage::Text(hello.to_string())).await.is_err() {
        return;
    }

    let mut sequence = 0u64;
    while let Some(Ok(message)) = rx.next().await {
        let text = match message {
            WsMessage::Text(text) => text,
            WsMessage::Close(_) => break,
            _ => continue,
        };
        let Ok(frame) = serde_json::from_str::<Value>(&text) else {
            tracing::warn!(frame = %text, "Mock gateway received invalid JSON");
            continue;
        };
        let op = frame["op"].as_u64();
        state.recorded.lock().frames.push(frame);

        let replies: Vec<Value> = match op {
            Some(1) if state.options.ack_heartbeats => vec![json!({"op": 11})],
            Some(2) => state
                .options
                .dispatches
                .iter()
                .map(|event| {
                    sequence += 1;
                    json!({"op": 0, "t": event.name, "s": sequence, "d": event.data})
                })
                .collect(),
            _ => Vec::new(),
        };

        for reply in replies {
            if tx.send(WsMessage::Text(reply.to_string())).await.is_err() {
                return;
            }
        }
    }
}

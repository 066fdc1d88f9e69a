//! Connection loop

use super::GatewayAddress;
use crate::error::{GatewayError, GatewayResult};
use crate::handlers::{EventDispatcher, HandlerError};
use crate::protocol::CloseCode;
use crate::rest::RestApi;
use crate::session::SessionState;
use crate::transport::{FrameSink, WsSink};
use futures_util::{Stream, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::{Error as WsError, Message as WsMessage};

/// Why the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopExit {
    Stopped,
    Closed,
}

/// Runs one gateway connection until stopped, closed or broken
pub struct SessionDriver {
    session: Arc<SessionState>,
    dispatcher: EventDispatcher,
    rest: RestApi,
    fallback_url: String,
    poll_interval: Duration,
    stop: Arc<AtomicBool>,
}

impl SessionDriver {
    #[must_use]
    pub fn new(
        dispatcher: EventDispatcher,
        rest: RestApi,
        fallback_url: impl Into<String>,
        poll_interval: Duration,
        stop: Arc<AtomicBool>,
    ) -> Self {
        Self {
            session: Arc::clone(dispatcher.session()),
            dispatcher,
            rest,
            fallback_url: fallback_url.into(),
            poll_interval,
            stop,
        }
    }

    /// Resolve, connect and process frames until the session ends
    pub async fn run(self) -> GatewayResult<()> {
        let discovered = match self.rest.gateway_url().await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(error = %e, "Gateway URL lookup failed, using fallback");
                None
            }
        };
        let address = GatewayAddress::resolve(discovered.as_deref(), &self.fallback_url)?;
        self.session.set_gateway_url(address.as_str());

        tracing::info!(
            host = %address.host(),
            port = address.port(),
            path = %address.path(),
            tls = address.is_secure(),
            "Connecting to gateway"
        );

        let (ws, _response) = tokio_tungstenite::connect_async(address.as_str())
            .await
            .map_err(|e| GatewayError::Connect {
                url: address.to_string(),
                reason: e.to_string(),
            })?;
        let (writer, mut reader) = ws.split();
        let mut sink = WsSink::new(writer);

        self.session.begin_connection();
        tracing::info!("Gateway connection established");

        let result = self.process(&mut sink, &mut reader).await;

        if let Err(e) = sink.close().await {
            tracing::debug!(error = %e, "Error closing gateway connection");
        }
        self.session.end_connection();

        match &result {
            Ok(LoopExit::Stopped) => tracing::info!("Gateway session stopped"),
            Ok(LoopExit::Closed) => tracing::info!("Gateway connection closed"),
            Err(e) => tracing::warn!(error = %e, "Gateway session ended with error"),
        }
        result.map(|_| ())
    }

    async fn process<S>(&self, sink: &mut dyn FrameSink, reader: &mut S) -> GatewayResult<LoopExit>
    where
        S: Stream<Item = Result<WsMessage, WsError>> + Unpin + Send,
    {
        loop {
            if self.stop.load(Ordering::Acquire) {
                return Ok(LoopExit::Stopped);
            }

            match tokio::time::timeout(self.poll_interval, reader.next()).await {
                Err(_) => {}
                Ok(None) => return Ok(LoopExit::Closed),
                Ok(Some(Err(e))) => return Err(GatewayError::Transport(e.to_string())),
                Ok(Some(Ok(message))) => match message {
                    WsMessage::Text(text) => {
                        let outcome = self
                            .dispatcher
                            .dispatch_text(&text, sink, Instant::now())
                            .await;
                        if let Some(outcome) = Self::check(outcome)? {
                            tracing::trace!(?outcome, "Frame handled");
                        }
                    }
                    WsMessage::Close(frame) => {
                        log_close(frame.as_ref());
                        return Ok(LoopExit::Closed);
                    }
                    WsMessage::Binary(data) => {
                        tracing::debug!(len = data.len(), "Ignoring binary frame");
                    }
                    WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Frame(_) => {}
                },
            }

            let ticked = self.dispatcher.on_ready_to_send(sink, Instant::now()).await;
            Self::check(ticked)?;
        }
    }

    /// Stop on transport failures; log everything else
    fn check<T>(result: Result<T, HandlerError>) -> GatewayResult<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_fatal() => Err(GatewayError::Transport(e.to_string())),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to handle gateway frame");
                Ok(None)
            }
        }
    }
}

fn log_close(frame: Option<&CloseFrame<'_>>) {
    let Some(frame) = frame else {
        tracing::info!("Gateway sent close without a code");
        return;
    };

    let code = u16::from(frame.code);
    match CloseCode::from_u16(code) {
        Some(close) if !close.is_recoverable() => {
            tracing::error!(code, reason = %frame.reason, "Gateway closed the session: {close}");
        }
        Some(close) => tracing::warn!(code, reason = %frame.reason, "Gateway closed the session: {close}"),
        None => tracing::info!(code, reason = %frame.reason, "Gateway closed the connection"),
    }
}

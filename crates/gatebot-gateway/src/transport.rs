//! Outbound frame transport
//!
//! Handlers write frames through [`FrameSink`]; the driver supplies the
//! WebSocket-backed implementation.

use crate::protocol::GatewayMessage;
use async_trait::async_trait;
use futures_util::stream::SplitSink;
use futures_util::SinkExt;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

/// Failure to write to the connection
#[derive(Debug, Error)]
#[error("Transport error: {0}")]
pub struct TransportError(pub String);

/// Anything gateway frames can be written to
#[async_trait]
pub trait FrameSink: Send {
    async fn send_frame(&mut self, frame: &GatewayMessage) -> Result<(), TransportError>;

    async fn close(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

/// Collects frames in memory
#[async_trait]
impl FrameSink for Vec<GatewayMessage> {
    async fn send_frame(&mut self, frame: &GatewayMessage) -> Result<(), TransportError> {
        self.push(frame.clone());
        Ok(())
    }
}

type WsWriter = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, WsMessage>;

/// Write half of a gateway WebSocket connection
pub struct WsSink {
    inner: WsWriter,
}

impl WsSink {
    #[must_use]
    pub fn new(inner: WsWriter) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl FrameSink for WsSink {
    async fn send_frame(&mut self, frame: &GatewayMessage) -> Result<(), TransportError> {
        let json = frame.to_json().map_err(|e| TransportError(e.to_string()))?;
        self.inner
            .send(WsMessage::Text(json))
            .await
            .map_err(|e| TransportError(e.to_string()))
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.inner
            .close()
            .await
            .map_err(|e| TransportError(e.to_string()))
    }
}

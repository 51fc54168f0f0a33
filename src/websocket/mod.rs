//! Streaming connection to the Binance ticker feed.
//!
//! This module is organized by concern:
//! - [`codec`] - decoding of inbound frames into price records
//! - [`connection`] - the connection lifecycle state machine
//! - [`retry`] - bounded fixed-interval reconnect bookkeeping
//!
//! The manager talks to the network only through [`Connector`] and
//! [`FeedConnection`]; [`WsConnector`] is the tungstenite-backed
//! implementation.

pub mod codec;
pub mod connection;
pub mod retry;

use std::future::Future;
use std::sync::Arc;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, info};
use tungstenite::Message;
use tungstenite::protocol::CloseFrame;
use tungstenite::protocol::frame::coding::CloseCode;

use crate::Result;
use crate::models::Symbol;

pub use connection::{ConnectionCommand, ConnectionManager};

/// Close code for a closure the application asked for.
pub const NORMAL_CLOSURE: u16 = 1000;

/// Close code used when the peer sent a close frame without a status.
pub const NO_STATUS_RECEIVED: u16 = 1005;

/// Close code used when the stream ended without any close frame.
pub const ABNORMAL_CLOSURE: u16 = 1006;

/// Write half of a stream connection.
pub type WsWriter = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Read half of a stream connection.
pub type WsReader = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Builds the ticker stream URL for `symbol` under `base`.
pub fn stream_url(base: &str, symbol: Symbol) -> String {
    format!(
        "{}/{}@ticker",
        base.trim_end_matches('/'),
        symbol.as_str().to_lowercase()
    )
}

/// Something that happened on a live connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// A text frame.
    Text(String),
    /// The transport reported an error. The connection may still close
    /// afterwards; that is reported separately.
    Error(String),
    /// The peer closed the connection with the given code.
    Closed { code: u16 },
}

/// One open streaming connection.
pub trait FeedConnection: Send {
    /// Waits for the next event. `None` means the stream ended without a
    /// close frame.
    ///
    /// Must be cancel safe: dropping the future loses no frames.
    fn next_event(&mut self) -> impl Future<Output = Option<FeedEvent>> + Send;

    /// Sends a close frame with `code`.
    fn close(&mut self, code: u16) -> impl Future<Output = Result<()>> + Send;
}

/// Opens streaming connections.
pub trait Connector: Send + Sync + 'static {
    type Connection: FeedConnection + 'static;

    /// Opens a connection to `url`.
    fn connect(&self, url: &str) -> impl Future<Output = Result<Self::Connection>> + Send;
}

/// [`Connector`] backed by `tokio-tungstenite` over rustls.
#[derive(Clone)]
pub struct WsConnector {
    tls_config: Arc<rustls::ClientConfig>,
}

impl WsConnector {
    #[must_use]
    pub fn new(tls_config: Arc<rustls::ClientConfig>) -> Self {
        Self { tls_config }
    }
}

impl Connector for WsConnector {
    type Connection = WsConnection;

    async fn connect(&self, url: &str) -> Result<WsConnection> {
        let connector = tokio_tungstenite::Connector::Rustls(Arc::clone(&self.tls_config));
        let (ws_stream, _) =
            tokio_tungstenite::connect_async_tls_with_config(url, None, false, Some(connector))
                .await?;
        info!(%url, "WebSocket handshake completed");

        let (writer, reader) = ws_stream.split();
        Ok(WsConnection {
            writer,
            reader,
            failed: false,
        })
    }
}

/// A live tungstenite connection.
pub struct WsConnection {
    writer: WsWriter,
    reader: WsReader,
    failed: bool,
}

impl FeedConnection for WsConnection {
    async fn next_event(&mut self) -> Option<FeedEvent> {
        // A read error leaves the socket unusable; report it once, then end.
        if self.failed {
            return None;
        }
        loop {
            match self.reader.next().await? {
                Ok(Message::Text(text)) => return Some(FeedEvent::Text(text.as_str().to_owned())),
                Ok(Message::Close(frame)) => {
                    let code = frame.map_or(NO_STATUS_RECEIVED, |f| u16::from(f.code));
                    return Some(FeedEvent::Closed { code });
                }
                Ok(_) => {} // Binary/Ping/Pong frames
                Err(e) => {
                    self.failed = true;
                    return Some(FeedEvent::Error(e.to_string()));
                }
            }
        }
    }

    async fn close(&mut self, code: u16) -> Result<()> {
        let frame = CloseFrame {
            code: CloseCode::from(code),
            reason: "requested".into(),
        };
        self.writer.send(Message::Close(Some(frame))).await?;
        debug!(code, "Sent close frame");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_url_lowercases_symbol() {
        assert_eq!(
            stream_url("wss://stream.binance.com:9443/ws", Symbol::BtcUsdt),
            "wss://stream.binance.com:9443/ws/btcusdt@ticker"
        );
    }

    #[test]
    fn stream_url_tolerates_trailing_slash() {
        assert_eq!(
            stream_url("wss://example.com/ws/", Symbol::DotUsdt),
            "wss://example.com/ws/dotusdt@ticker"
        );
    }
}

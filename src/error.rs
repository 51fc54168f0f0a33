//! Crate-level error types.
//!
//! [`DashError`] covers everything that can fail outside the connection
//! manager: configuration, the WebSocket handshake and close, terminal and
//! log file I/O, and TLS setup. Frame decoding has its own
//! [`DecodeError`](crate::websocket::codec::DecodeError), which the manager
//! turns into a store transition instead of propagating.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DashError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum DashError {
    /// An environment variable held a value that could not be used.
    #[error("configuration error: {0}")]
    Config(String),

    /// A WebSocket operation (connect, send, receive) failed.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// Terminal or log file I/O failed.
    #[error("io error: {0}")]
    Io(String),

    /// The TLS client configuration could not be built.
    #[error("tls error: {0}")]
    Tls(String),
}

//! Domain and wire models for the ticker dashboard.
//!
//! Contains the supported trading pairs, the Binance ticker frame layout,
//! the decoded [`PriceRecord`], and the connection lifecycle states.

pub mod symbol;
pub mod ticker;

pub use symbol::{Symbol, UnknownSymbol};
pub use ticker::{FrameEnvelope, PriceRecord, TickerFrame};

/// Lifecycle state of the single live stream connection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Uninstantiated,
    Connecting,
    Open,
    Closing,
    Closed,
}

impl ConnectionStatus {
    /// Returns a display string for the status.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Uninstantiated => "Uninstantiated",
            ConnectionStatus::Connecting => "Connecting",
            ConnectionStatus::Open => "Open",
            ConnectionStatus::Closing => "Closing",
            ConnectionStatus::Closed => "Closed",
        }
    }
}

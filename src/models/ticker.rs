use std::time::SystemTime;

use serde::Deserialize;

use super::Symbol;

/// Raw `<symbol>@ticker` frame from the Binance stream.
///
/// Only the fields the dashboard displays are kept; numeric values arrive
/// as decimal text.
#[derive(Debug, Deserialize)]
pub struct TickerFrame {
    #[serde(rename = "e")]
    pub event_type: String,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "c")]
    pub last_price: String,
    #[serde(rename = "p")]
    pub price_change: String,
    #[serde(rename = "P")]
    pub price_change_percent: String,
    #[serde(rename = "h")]
    pub high_price: String,
    #[serde(rename = "l")]
    pub low_price: String,
    #[serde(rename = "v")]
    pub volume: String,
}

/// Routing fields shared by every stream event.
#[derive(Debug, Deserialize)]
pub struct FrameEnvelope {
    #[serde(rename = "e")]
    pub event_type: String,
    #[serde(rename = "s")]
    pub symbol: String,
}

/// Decoded price snapshot for one pair.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceRecord {
    pub symbol: Symbol,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub high_24h: f64,
    pub low_24h: f64,
    pub volume: f64,
    /// When the frame was received locally.
    pub received_at: SystemTime,
}

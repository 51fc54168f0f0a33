//! Live single-pair crypto ticker dashboard.
//!
//! Subscribes to the Binance 24h ticker stream for one trading pair at a
//! time, keeps a small state store in sync with connection health and
//! price updates, and renders it in a terminal UI. Switching pairs tears
//! down the old stream before the new one is dialed.

pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod store;
pub mod tls;
pub mod tui;
pub mod websocket;

pub use error::{DashError, Result};

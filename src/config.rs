//! Application configuration loaded from environment variables.
//!
//! Every variable is optional:
//! - `TICKERDASH_STREAM_URL`: stream base URL (default Binance spot)
//! - `TICKERDASH_SYMBOL`: initially selected pair (default `BTCUSDT`)
//! - `TICKERDASH_RECONNECT_ATTEMPTS`: automatic reconnects after an
//!   abnormal closure (default 10)
//! - `TICKERDASH_RECONNECT_INTERVAL_MS`: delay between reconnects
//!   (default 3000)
//! - `TICKERDASH_LOG_FILE`: where tracing output goes (default
//!   `tickerdash.log`)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::models::Symbol;

/// Default public stream endpoint.
const DEFAULT_STREAM_URL: &str = "wss://stream.binance.com:9443/ws";

const DEFAULT_RECONNECT_ATTEMPTS: u32 = 10;

const DEFAULT_RECONNECT_INTERVAL_MS: u64 = 3000;

const DEFAULT_LOG_FILE: &str = "tickerdash.log";

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub symbol: Symbol,
    pub log_file: PathBuf,
}

/// Stream connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub stream_url: String,
    pub reconnect_attempts: u32,
    pub reconnect_interval: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            stream_url: DEFAULT_STREAM_URL.to_string(),
            reconnect_attempts: DEFAULT_RECONNECT_ATTEMPTS,
            reconnect_interval: Duration::from_millis(DEFAULT_RECONNECT_INTERVAL_MS),
        }
    }
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`DashError::Config`](crate::DashError::Config) if a variable is
/// set to an unknown symbol, a non-integer count, or a zero interval.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let stream_url =
        non_empty_var("TICKERDASH_STREAM_URL").unwrap_or_else(|| DEFAULT_STREAM_URL.to_string());

    let symbol = parse_var("TICKERDASH_SYMBOL")?.unwrap_or_default();

    let reconnect_attempts =
        parse_var("TICKERDASH_RECONNECT_ATTEMPTS")?.unwrap_or(DEFAULT_RECONNECT_ATTEMPTS);

    let interval_ms =
        parse_var("TICKERDASH_RECONNECT_INTERVAL_MS")?.unwrap_or(DEFAULT_RECONNECT_INTERVAL_MS);
    if interval_ms == 0 {
        return Err(crate::DashError::Config(
            "TICKERDASH_RECONNECT_INTERVAL_MS must be greater than zero".to_string(),
        ));
    }

    let log_file = non_empty_var("TICKERDASH_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    Ok(AppConfig {
        feed: FeedConfig {
            stream_url,
            reconnect_attempts,
            reconnect_interval: Duration::from_millis(interval_ms),
        },
        symbol,
        log_file,
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Parses a non-empty environment variable, naming it in the error.
fn parse_var<T>(name: &str) -> crate::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    non_empty_var(name)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| crate::DashError::Config(format!("{name}={raw:?}: {e}")))
        })
        .transpose()
}

//! Decoding of inbound ticker frames into [`PriceRecord`]s.
//!
//! Decoding is a pure function of the frame text and the symbol the caller
//! is currently subscribed to. A frame naming any other symbol is rejected,
//! which keeps late frames from a just-closed stream out of the store.

use std::time::SystemTime;

use crate::models::{FrameEnvelope, PriceRecord, Symbol, TickerFrame};

/// Event type tag carried by 24h rolling ticker frames.
pub const TICKER_EVENT: &str = "24hrTicker";

/// Why a frame did not produce a [`PriceRecord`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The frame is not JSON or lacks a required field.
    #[error("malformed frame: {0}")]
    Malformed(String),

    /// The frame carries an event type other than [`TICKER_EVENT`].
    #[error("unexpected event type {0:?}")]
    UnexpectedEvent(String),

    /// The frame belongs to a different subscription target.
    #[error("frame for {received} while subscribed to {expected}")]
    SymbolMismatch { expected: Symbol, received: String },

    /// A numeric field did not hold a finite decimal number.
    #[error("field {field} is not a finite number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

impl DecodeError {
    /// Returns `true` for frames that are well formed but not addressed to
    /// the current subscription. These are dropped without surfacing an
    /// error to the user.
    pub fn is_foreign(&self) -> bool {
        matches!(
            self,
            DecodeError::UnexpectedEvent(_) | DecodeError::SymbolMismatch { .. }
        )
    }
}

/// Decodes a frame, stamping the record with the current wall-clock time.
///
/// # Errors
///
/// See [`decode_frame_at`].
pub fn decode_frame(text: &str, expected: Symbol) -> Result<PriceRecord, DecodeError> {
    decode_frame_at(text, expected, SystemTime::now())
}

/// Decodes a frame received at `received_at`.
///
/// # Errors
///
/// Returns a [`DecodeError`] if the frame is not valid JSON with an event
/// type and symbol, is not a ticker event, names a symbol other than
/// `expected`, or has a numeric field that is not a finite number.
pub fn decode_frame_at(
    text: &str,
    expected: Symbol,
    received_at: SystemTime,
) -> Result<PriceRecord, DecodeError> {
    let envelope: FrameEnvelope =
        serde_json::from_str(text).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    if envelope.event_type != TICKER_EVENT {
        return Err(DecodeError::UnexpectedEvent(envelope.event_type));
    }
    if envelope.symbol != expected.as_str() {
        return Err(DecodeError::SymbolMismatch {
            expected,
            received: envelope.symbol,
        });
    }

    let frame: TickerFrame =
        serde_json::from_str(text).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    Ok(PriceRecord {
        symbol: expected,
        price: parse_number("c", &frame.last_price)?,
        change: parse_number("p", &frame.price_change)?,
        change_percent: parse_number("P", &frame.price_change_percent)?,
        high_24h: parse_number("h", &frame.high_price)?,
        low_24h: parse_number("l", &frame.low_price)?,
        volume: parse_number("v", &frame.volume)?,
        received_at,
    })
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, DecodeError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| DecodeError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

//! Decoding tests against a captured Binance ticker frame.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use tokio_test::{assert_err, assert_ok};

use tickerdash::models::Symbol;
use tickerdash::websocket::codec::{DecodeError, decode_frame, decode_frame_at};

/// Helper to get the path to test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn captured_frame() -> String {
    std::fs::read_to_string(fixtures_dir().join("ticker.json"))
        .expect("Failed to read ticker fixture")
}

#[test]
fn test_captured_frame_decodes_for_its_symbol() {
    let at = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    let record = assert_ok!(decode_frame_at(&captured_frame(), Symbol::BtcUsdt, at));

    assert_eq!(record.symbol, Symbol::BtcUsdt);
    assert_eq!(record.price, 50000.0);
    assert_eq!(record.change, 1250.5);
    assert_eq!(record.change_percent, 2.562);
    assert_eq!(record.high_24h, 50500.0);
    assert_eq!(record.low_24h, 48500.0);
    assert_eq!(record.volume, 12345.678);
    assert_eq!(record.received_at, at);
}

#[test]
fn test_captured_frame_is_foreign_to_other_pairs() {
    for symbol in Symbol::ALL.into_iter().filter(|s| *s != Symbol::BtcUsdt) {
        let err = assert_err!(decode_frame(&captured_frame(), symbol));
        assert!(err.is_foreign(), "{symbol}: {err}");
    }
}

#[test]
fn test_non_numeric_volume_names_field() {
    let mut value: serde_json::Value =
        serde_json::from_str(&captured_frame()).expect("Failed to parse fixture");
    value["v"] = serde_json::Value::String("lots".to_string());

    let err = assert_err!(decode_frame(&value.to_string(), Symbol::BtcUsdt));
    assert_eq!(
        err,
        DecodeError::InvalidNumber {
            field: "v",
            value: "lots".to_string(),
        }
    );
}

#[test]
fn test_numeric_json_value_is_malformed() {
    // Binance always quotes decimals; a bare number is a different shape.
    let mut value: serde_json::Value =
        serde_json::from_str(&captured_frame()).expect("Failed to parse fixture");
    value["c"] = serde_json::json!(50000.0);

    let err = assert_err!(decode_frame(&value.to_string(), Symbol::BtcUsdt));
    assert!(matches!(err, DecodeError::Malformed(_)));
}

#[test]
fn test_frame_without_symbol_is_malformed() {
    let err = assert_err!(decode_frame(r#"{"e":"24hrTicker"}"#, Symbol::BtcUsdt));
    assert!(matches!(err, DecodeError::Malformed(_)));
    assert!(!err.is_foreign());
}

//! Symbol catalogue and status tests.

use tickerdash::models::{ConnectionStatus, Symbol};

#[test]
fn test_symbol_catalogue_order_and_names() {
    let wire: Vec<&str> = Symbol::ALL.iter().map(Symbol::as_str).collect();
    assert_eq!(wire, ["BTCUSDT", "ETHUSDT", "BNBUSDT", "ADAUSDT", "DOTUSDT"]);

    let bases: Vec<&str> = Symbol::ALL.iter().map(Symbol::base_asset).collect();
    assert_eq!(bases, ["BTC", "ETH", "BNB", "ADA", "DOT"]);
}

#[test]
fn test_symbol_serde_uses_wire_names() {
    let json = serde_json::to_string(&Symbol::BnbUsdt).expect("Failed to serialize symbol");
    assert_eq!(json, "\"BNBUSDT\"");

    let symbol: Symbol = serde_json::from_str("\"ADAUSDT\"").expect("Failed to parse symbol");
    assert_eq!(symbol, Symbol::AdaUsdt);
}

#[test]
fn test_display_matches_wire_name() {
    for symbol in Symbol::ALL {
        assert_eq!(symbol.to_string(), symbol.as_str());
        assert!(!symbol.name().is_empty());
    }
}

#[test]
fn test_default_status_is_uninstantiated() {
    assert_eq!(ConnectionStatus::default(), ConnectionStatus::Uninstantiated);
    assert_eq!(ConnectionStatus::Closing.label(), "Closing");
}

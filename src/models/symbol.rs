//! The fixed set of trading pairs the dashboard can subscribe to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A supported Binance spot trading pair.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Symbol {
    #[default]
    #[serde(rename = "BTCUSDT")]
    BtcUsdt,
    #[serde(rename = "ETHUSDT")]
    EthUsdt,
    #[serde(rename = "BNBUSDT")]
    BnbUsdt,
    #[serde(rename = "ADAUSDT")]
    AdaUsdt,
    #[serde(rename = "DOTUSDT")]
    DotUsdt,
}

impl Symbol {
    /// Every supported pair, in selector order.
    pub const ALL: [Symbol; 5] = [
        Symbol::BtcUsdt,
        Symbol::EthUsdt,
        Symbol::BnbUsdt,
        Symbol::AdaUsdt,
        Symbol::DotUsdt,
    ];

    /// Returns the exchange identifier, e.g. `"BTCUSDT"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::BtcUsdt => "BTCUSDT",
            Symbol::EthUsdt => "ETHUSDT",
            Symbol::BnbUsdt => "BNBUSDT",
            Symbol::AdaUsdt => "ADAUSDT",
            Symbol::DotUsdt => "DOTUSDT",
        }
    }

    /// Human readable coin name.
    pub fn name(&self) -> &'static str {
        match self {
            Symbol::BtcUsdt => "Bitcoin",
            Symbol::EthUsdt => "Ethereum",
            Symbol::BnbUsdt => "BNB",
            Symbol::AdaUsdt => "Cardano",
            Symbol::DotUsdt => "Polkadot",
        }
    }

    /// The traded asset without the quote currency, e.g. `"BTC"`.
    pub fn base_asset(&self) -> &'static str {
        match self {
            Symbol::BtcUsdt => "BTC",
            Symbol::EthUsdt => "ETH",
            Symbol::BnbUsdt => "BNB",
            Symbol::AdaUsdt => "ADA",
            Symbol::DotUsdt => "DOT",
        }
    }

    /// Position of this pair in [`Symbol::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Symbol::BtcUsdt => 0,
            Symbol::EthUsdt => 1,
            Symbol::BnbUsdt => 2,
            Symbol::AdaUsdt => 3,
            Symbol::DotUsdt => 4,
        }
    }

    /// Looks up a pair by its selector position.
    pub fn from_index(index: usize) -> Option<Symbol> {
        Self::ALL.get(index).copied()
    }

    /// The next pair in selector order, wrapping around.
    pub fn next(&self) -> Symbol {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The previous pair in selector order, wrapping around.
    pub fn previous(&self) -> Symbol {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when text does not name a supported pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown symbol: {0}")]
pub struct UnknownSymbol(pub String);

impl FromStr for Symbol {
    type Err = UnknownSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|symbol| symbol.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownSymbol(s.to_string()))
    }
}

//! Tracked symbols.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of asset a ticker refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// Exchange-listed equity
    Stock,
    /// Cryptocurrency pair or coin
    Crypto,
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetType::Stock => write!(f, "stock"),
            AssetType::Crypto => write!(f, "crypto"),
        }
    }
}

/// A symbol on the watchlist
///
/// The display name falls back to the symbol when constructed empty, so
/// `display_name()` is never empty. Deserialized values go through the
/// same constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "TickerRecord")]
pub struct Ticker {
    symbol: String,
    asset_type: AssetType,
    display_name: String,
}

#[derive(Deserialize)]
struct TickerRecord {
    symbol: String,
    asset_type: AssetType,
    #[serde(default)]
    display_name: String,
}

impl From<TickerRecord> for Ticker {
    fn from(record: TickerRecord) -> Self {
        Ticker::new(record.symbol, record.asset_type, record.display_name)
    }
}

impl Ticker {
    /// Create a ticker; an empty `display_name` is replaced by `symbol`
    pub fn new(
        symbol: impl Into<String>,
        asset_type: AssetType,
        display_name: impl Into<String>,
    ) -> Self {
        let symbol = symbol.into();
        let mut display_name = display_name.into();
        if display_name.is_empty() {
            display_name = symbol.clone();
        }
        Self {
            symbol,
            asset_type,
            display_name,
        }
    }

    /// Shorthand for a stock ticker displayed by its symbol
    pub fn stock(symbol: impl Into<String>) -> Self {
        Self::new(symbol, AssetType::Stock, String::new())
    }

    /// Shorthand for a crypto ticker displayed by its symbol
    pub fn crypto(symbol: impl Into<String>) -> Self {
        Self::new(symbol, AssetType::Crypto, String::new())
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn asset_type(&self) -> AssetType {
        self.asset_type
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Case-normalized lookup key (lowercased symbol)
    pub fn key(&self) -> String {
        self.symbol.to_lowercase()
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.display_name == self.symbol {
            write!(f, "{}", self.symbol)
        } else {
            write!(f, "{} ({})", self.display_name, self.symbol)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_defaults_to_symbol() {
        let ticker = Ticker::new("AAPL", AssetType::Stock, "");
        assert_eq!(ticker.display_name(), "AAPL");

        let named = Ticker::new("BTC-USD", AssetType::Crypto, "Bitcoin");
        assert_eq!(named.display_name(), "Bitcoin");
    }

    #[test]
    fn test_key_is_lowercase() {
        let ticker = Ticker::stock("MSFT");
        assert_eq!(ticker.key(), "msft");
        assert_eq!(ticker.symbol(), "MSFT");
    }

    #[test]
    fn test_deserialize_applies_display_name_default() {
        let json = r#"{"symbol":"ETH","asset_type":"crypto","display_name":""}"#;
        let ticker: Ticker = serde_json::from_str(json).expect("valid ticker json");
        assert_eq!(ticker.display_name(), "ETH");
        assert_eq!(ticker.asset_type(), AssetType::Crypto);

        let missing = r#"{"symbol":"TSLA","asset_type":"stock"}"#;
        let ticker: Ticker = serde_json::from_str(missing).expect("valid ticker json");
        assert_eq!(ticker.display_name(), "TSLA");
    }

    #[test]
    fn test_ticker_display() {
        assert_eq!(Ticker::stock("AAPL").to_string(), "AAPL");
        assert_eq!(
            Ticker::new("BTC", AssetType::Crypto, "Bitcoin").to_string(),
            "Bitcoin (BTC)"
        );
    }
}

//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Ticker of the monitored cryptocurrency, e.g. `BTC`.
///
/// The inner String is private and always upper-case so that store keys and
/// exchange pair names derived from it are stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetSymbol(String);

impl AssetSymbol {
    /// Create a new `AssetSymbol`, normalizing to upper case.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidAssetSymbol`] if the symbol is empty or
    /// contains anything other than ASCII letters and digits.
    pub fn new(symbol: impl Into<String>) -> Result<Self, DomainError> {
        let symbol: String = symbol.into();
        let trimmed = symbol.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::InvalidAssetSymbol { symbol });
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Get the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Concatenated USD pair name (`BTCUSD`).
    #[must_use]
    pub fn usd_pair(&self) -> String {
        format!("{}USD", self.0)
    }

    /// Dash-separated USD product id (`BTC-USD`).
    #[must_use]
    pub fn product_id(&self) -> String {
        format!("{}-USD", self.0)
    }
}

impl fmt::Display for AssetSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AssetSymbol {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for AssetSymbol {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<AssetSymbol> for String {
    fn from(symbol: AssetSymbol) -> Self {
        symbol.0
    }
}

/// Exchange-assigned order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(String);

impl OrderId {
    /// Create a new `OrderId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the order ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_symbol_is_upper_cased() {
        let symbol = AssetSymbol::new(" eth ").unwrap();
        assert_eq!(symbol.as_str(), "ETH");
        assert_eq!(symbol.usd_pair(), "ETHUSD");
        assert_eq!(symbol.product_id(), "ETH-USD");
    }

    #[test]
    fn asset_symbol_rejects_garbage() {
        assert!(AssetSymbol::new("").is_err());
        assert!(AssetSymbol::new("BTC/USD").is_err());
    }

    #[test]
    fn asset_symbol_deserializes_from_string() {
        let symbol: AssetSymbol = serde_json::from_str("\"btc\"").unwrap();
        assert_eq!(symbol.to_string(), "BTC");
        assert!(serde_json::from_str::<AssetSymbol>("\"\"").is_err());
    }
}

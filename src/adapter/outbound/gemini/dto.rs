//! Gemini REST request and response types.
//!
//! Example price feed entry:
//! ```json
//! {"pair":"BTCUSD","price":"43250.12","percentChange24h":"-0.0131"}
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Signed payload for a private call without parameters.
#[derive(Debug, Serialize)]
pub struct PrivateRequest<'a> {
    pub request: &'a str,
    pub nonce: String,
}

/// Signed payload for `POST /v1/order/new`.
#[derive(Debug, Serialize)]
pub struct NewOrderRequest<'a> {
    pub request: &'a str,
    pub nonce: String,
    pub client_order_id: String,
    pub symbol: String,
    pub amount: String,
    pub price: String,
    pub side: &'a str,
    #[serde(rename = "type")]
    pub order_type: &'a str,
    pub options: Vec<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceFeedEntry {
    pub pair: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Balance {
    pub currency: String,
    pub amount: Decimal,
    pub available: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SymbolDetails {
    pub symbol: String,
    /// Smallest order quantity increment, e.g. `1e-8`.
    pub tick_size: Decimal,
}

impl SymbolDetails {
    /// Decimal places allowed in an order quantity.
    #[must_use]
    pub fn quantity_decimals(&self) -> u32 {
        self.tick_size.normalize().scale()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatus {
    pub order_id: String,
    pub symbol: String,
    #[serde(default)]
    pub avg_execution_price: Option<Decimal>,
    #[serde(default)]
    pub executed_amount: Option<Decimal>,
    #[serde(default)]
    pub is_cancelled: bool,
}

impl OrderStatus {
    /// Quantity filled, zero when the response carries none.
    #[must_use]
    pub fn filled(&self) -> Decimal {
        self.executed_amount.unwrap_or(Decimal::ZERO)
    }
}

/// Error body returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub reason: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.message {
            Some(message) => format!("{}: {}", self.reason, message),
            None => self.reason.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_feed_parses_string_prices() {
        let json = r#"[{"pair":"BTCUSD","price":"43250.12","percentChange24h":"-0.0131"},
                       {"pair":"ETHUSD","price":"2250.5","percentChange24h":"0.01"}]"#;
        let feed: Vec<PriceFeedEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].pair, "BTCUSD");
        assert_eq!(feed[0].price, dec!(43250.12));
    }

    #[test]
    fn symbol_details_tick_size_gives_decimals() {
        let json = r#"{"symbol":"BTCUSD","base_currency":"BTC","quote_currency":"USD",
                       "tick_size":1e-8,"quote_increment":0.01,"min_order_size":"0.00001"}"#;
        let details: SymbolDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.quantity_decimals(), 8);

        let eth: SymbolDetails =
            serde_json::from_str(r#"{"symbol":"ETHUSD","tick_size":0.000001}"#).unwrap();
        assert_eq!(eth.quantity_decimals(), 6);
    }

    #[test]
    fn balances_parse() {
        let json = r#"[{"type":"exchange","currency":"USD","amount":"120.50",
                        "available":"100.25","availableForWithdrawal":"100.25"}]"#;
        let balances: Vec<Balance> = serde_json::from_str(json).unwrap();
        assert_eq!(balances[0].available, dec!(100.25));
    }

    #[test]
    fn immediate_or_cancel_fill_parses() {
        let json = r#"{"order_id":"106817811","symbol":"btcusd","exchange":"gemini",
                       "avg_execution_price":"3632.85","side":"buy","type":"exchange limit",
                       "is_live":false,"is_cancelled":true,"executed_amount":"0.00027",
                       "remaining_amount":"0","original_amount":"0.00027","price":"3633.00"}"#;
        let order: OrderStatus = serde_json::from_str(json).unwrap();
        assert_eq!(order.filled(), dec!(0.00027));
        assert_eq!(order.avg_execution_price, Some(dec!(3632.85)));
    }

    #[test]
    fn new_order_serializes_type_field() {
        let order = NewOrderRequest {
            request: "/v1/order/new",
            nonce: "1".into(),
            client_order_id: "abc".into(),
            symbol: "btcusd".into(),
            amount: "0.001".into(),
            price: "60000.00".into(),
            side: "buy",
            order_type: "exchange limit",
            options: vec!["immediate-or-cancel"],
        };
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["type"], "exchange limit");
        assert_eq!(value["options"][0], "immediate-or-cancel");
    }
}

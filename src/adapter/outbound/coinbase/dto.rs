//! Coinbase Exchange REST request and response types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    pub price: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub currency: String,
    pub balance: Decimal,
    pub available: Decimal,
}

/// Body of `POST /orders` for a market buy sized in quote currency.
#[derive(Debug, Serialize)]
pub struct MarketOrderRequest<'a> {
    #[serde(rename = "type")]
    pub order_type: &'a str,
    pub side: &'a str,
    pub product_id: String,
    pub funds: String,
    pub client_oid: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: String,
    pub product_id: String,
    pub status: String,
    #[serde(default)]
    pub funds: Option<Decimal>,
    #[serde(default)]
    pub filled_size: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

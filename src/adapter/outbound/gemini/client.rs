//! Gemini REST gateway.
//!
//! Gemini does not take market orders. A buy is placed as an
//! `exchange limit` order priced 20% above the current quote with
//! `immediate-or-cancel`, which fills like a market order and never rests
//! on the book.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{RequestBuilder, StatusCode};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::{debug, info};
use uuid::Uuid;

use super::auth::{GeminiSigner, SignedPayload};
use super::dto::{
    Balance, ErrorResponse, NewOrderRequest, OrderStatus, PriceFeedEntry, PrivateRequest,
    SymbolDetails,
};
use crate::adapter::outbound::http::{status_error, HttpSettings, RestClient};
use crate::domain::{round_cents, AssetSymbol, OrderId, Price, UsdAmount};
use crate::error::{Error, ExchangeError, Result};
use crate::port::{ExchangeGateway, PurchaseOutcome};

pub const PRODUCTION_URL: &str = "https://api.gemini.com";
pub const SANDBOX_URL: &str = "https://api.sandbox.gemini.com";

const EXCHANGE: &str = "Gemini";
const LIMIT_MARKUP: Decimal = dec!(1.2);

const PRICE_FEED_PATH: &str = "/v1/pricefeed";
const BALANCES_PATH: &str = "/v1/balances";
const NEW_ORDER_PATH: &str = "/v1/order/new";

/// [`ExchangeGateway`] backed by the Gemini REST API.
#[derive(Debug)]
pub struct GeminiGateway {
    rest: RestClient,
    signer: GeminiSigner,
}

impl GeminiGateway {
    #[must_use]
    pub fn new(base_url: impl Into<String>, signer: GeminiSigner, http: &HttpSettings) -> Self {
        Self {
            rest: RestClient::new(EXCHANGE, base_url, http),
            signer,
        }
    }

    /// Gateway for the production or sandbox environment.
    #[must_use]
    pub fn for_environment(sandbox: bool, signer: GeminiSigner, http: &HttpSettings) -> Self {
        let url = if sandbox { SANDBOX_URL } else { PRODUCTION_URL };
        Self::new(url, signer, http)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.rest.base_url()
    }

    fn private_headers(&self, signed: &SignedPayload) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("0"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert("x-gemini-apikey", header_value(self.signer.api_key())?);
        headers.insert("x-gemini-payload", header_value(&signed.payload)?);
        headers.insert("x-gemini-signature", header_value(&signed.signature)?);
        Ok(headers)
    }

    fn private_post(&self, path: &str, signed: &SignedPayload) -> Result<RequestBuilder> {
        Ok(self.rest.post(path).headers(self.private_headers(signed)?))
    }

    fn nonce(&self) -> String {
        self.signer.next_nonce(Utc::now()).to_string()
    }

    async fn symbol_details(&self, asset: &AssetSymbol) -> Result<SymbolDetails> {
        let path = format!("/v1/symbols/details/{}", asset.usd_pair().to_lowercase());
        self.rest.fetch_json(|| Ok(self.rest.get(&path))).await
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ExchangeError::AuthFailed(format!("invalid header value: {e}")).into())
}

/// Quote for `asset` in a price feed.
fn find_price(feed: &[PriceFeedEntry], asset: &AssetSymbol) -> Result<Price> {
    let pair = asset.usd_pair();
    let entry = feed
        .iter()
        .find(|entry| entry.pair.eq_ignore_ascii_case(&pair))
        .ok_or_else(|| ExchangeError::PriceUnavailable {
            asset: asset.to_string(),
            reason: format!("pair {pair} not in price feed"),
        })?;

    if entry.price <= Decimal::ZERO {
        return Err(ExchangeError::PriceUnavailable {
            asset: asset.to_string(),
            reason: format!("non-positive quote {}", entry.price),
        }
        .into());
    }
    Ok(entry.price)
}

/// Available USD across balance entries. Missing USD counts as zero.
fn usd_available(balances: &[Balance]) -> Decimal {
    balances
        .iter()
        .filter(|b| b.currency.eq_ignore_ascii_case("USD"))
        .map(|b| b.available)
        .sum()
}

/// Limit price that crosses the book comfortably.
fn limit_price(price: Price) -> Price {
    round_cents(price * LIMIT_MARKUP)
}

/// Asset quantity bought by `usd` at `price`, rounded to the lot size.
fn order_quantity(usd: UsdAmount, price: Price, decimals: u32) -> Decimal {
    (usd / price).round_dp_with_strategy(decimals, RoundingStrategy::MidpointNearestEven)
}

/// Turn an order response into a purchase outcome.
fn interpret_order(status: StatusCode, body: &str) -> Result<PurchaseOutcome> {
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        return Err(status_error(EXCHANGE, status, body));
    }
    if !status.is_success() {
        let reason = serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.describe())
            .unwrap_or_else(|_| format!("HTTP {status}: {}", body.trim()));
        return Ok(PurchaseOutcome::Failed { reason });
    }

    let order: OrderStatus = serde_json::from_str(body)?;
    let filled = order.filled();
    if filled <= Decimal::ZERO {
        return Ok(PurchaseOutcome::Failed {
            reason: format!("order {} was not filled", order.order_id),
        });
    }

    let average = order
        .avg_execution_price
        .map_or_else(|| "unknown".to_string(), |p| p.to_string());
    Ok(PurchaseOutcome::Filled {
        order_id: OrderId::new(order.order_id),
        details: format!("filled {filled} {} at average price {average}", order.symbol),
    })
}

#[async_trait]
impl ExchangeGateway for GeminiGateway {
    async fn current_price(&self, asset: &AssetSymbol) -> Result<Price> {
        let feed: Vec<PriceFeedEntry> = self
            .rest
            .fetch_json(|| Ok(self.rest.get(PRICE_FEED_PATH)))
            .await
            .map_err(|e| price_error(asset, e))?;
        let price = find_price(&feed, asset)?;
        debug!(asset = %asset, price = %price, "Fetched Gemini price");
        Ok(price)
    }

    async fn has_balance(&self, required: UsdAmount) -> Result<bool> {
        let balances: Vec<Balance> = self
            .rest
            .fetch_json(|| {
                let signed = self.signer.sign(&PrivateRequest {
                    request: BALANCES_PATH,
                    nonce: self.nonce(),
                })?;
                self.private_post(BALANCES_PATH, &signed)
            })
            .await
            .map_err(balance_error)?;

        let available = usd_available(&balances);
        debug!(available = %available, required = %required, "Fetched Gemini USD balance");
        Ok(available >= required)
    }

    async fn buy(&self, asset: &AssetSymbol, amount: UsdAmount) -> Result<PurchaseOutcome> {
        let price = self.current_price(asset).await?;
        let details = self.symbol_details(asset).await?;
        let quantity = order_quantity(amount, price, details.quantity_decimals());
        if quantity <= Decimal::ZERO {
            return Ok(PurchaseOutcome::Failed {
                reason: format!("{amount} USD buys less than one lot of {asset}"),
            });
        }
        let limit = limit_price(price);

        let signed = self.signer.sign(&NewOrderRequest {
            request: NEW_ORDER_PATH,
            nonce: self.nonce(),
            client_order_id: Uuid::new_v4().to_string(),
            symbol: asset.usd_pair().to_lowercase(),
            amount: quantity.to_string(),
            price: limit.to_string(),
            side: "buy",
            order_type: "exchange limit",
            options: vec!["immediate-or-cancel"],
        })?;

        info!(
            asset = %asset,
            quantity = %quantity,
            limit = %limit,
            "Placing Gemini immediate-or-cancel order"
        );
        let response = self
            .rest
            .send_once(self.private_post(NEW_ORDER_PATH, &signed)?)
            .await?;
        let status = response.status();
        let body = response.text().await?;
        interpret_order(status, &body)
    }

    fn exchange_name(&self) -> &'static str {
        EXCHANGE
    }
}

fn price_error(asset: &AssetSymbol, err: Error) -> Error {
    match err {
        Error::Exchange(ExchangeError::AuthFailed(_)) => err,
        other => ExchangeError::PriceUnavailable {
            asset: asset.to_string(),
            reason: other.to_string(),
        }
        .into(),
    }
}

fn balance_error(err: Error) -> Error {
    match err {
        Error::Exchange(ExchangeError::AuthFailed(_)) => err,
        other => ExchangeError::BalanceUnavailable(other.to_string()).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn btc() -> AssetSymbol {
        AssetSymbol::new("BTC").unwrap()
    }

    fn feed(entries: &[(&str, Decimal)]) -> Vec<PriceFeedEntry> {
        entries
            .iter()
            .map(|(pair, price)| PriceFeedEntry {
                pair: (*pair).to_string(),
                price: *price,
            })
            .collect()
    }

    #[test]
    fn find_price_picks_usd_pair() {
        let feed = feed(&[("ETHUSD", dec!(2000)), ("BTCUSD", dec!(43250.12))]);
        assert_eq!(find_price(&feed, &btc()).unwrap(), dec!(43250.12));
    }

    #[test]
    fn find_price_missing_pair_is_unavailable() {
        let feed = feed(&[("ETHUSD", dec!(2000))]);
        let err = find_price(&feed, &btc()).unwrap_err();
        assert!(matches!(
            err,
            Error::Exchange(ExchangeError::PriceUnavailable { .. })
        ));
    }

    #[test]
    fn find_price_rejects_zero_quote() {
        let feed = feed(&[("BTCUSD", Decimal::ZERO)]);
        assert!(find_price(&feed, &btc()).is_err());
    }

    #[test]
    fn usd_available_ignores_other_currencies() {
        let balances = vec![
            Balance {
                currency: "BTC".into(),
                amount: dec!(1),
                available: dec!(1),
            },
            Balance {
                currency: "USD".into(),
                amount: dec!(50),
                available: dec!(40.5),
            },
        ];
        assert_eq!(usd_available(&balances), dec!(40.5));
        assert_eq!(usd_available(&[]), Decimal::ZERO);
    }

    #[test]
    fn limit_price_is_marked_up_and_rounded() {
        assert_eq!(limit_price(dec!(100)), dec!(120.00));
        assert_eq!(limit_price(dec!(43250.12)), dec!(51900.14));
    }

    #[test]
    fn quantity_rounds_to_lot_size() {
        assert_eq!(order_quantity(dec!(25), dec!(43250.12), 8), dec!(0.00057803));
        assert_eq!(order_quantity(dec!(10), dec!(3), 2), dec!(3.33));
        assert_eq!(order_quantity(dec!(1), dec!(1000000), 4), Decimal::ZERO);
    }

    #[test]
    fn filled_order_is_success() {
        let body = r#"{"order_id":"42","symbol":"btcusd","avg_execution_price":"100.5",
                       "executed_amount":"0.25","is_cancelled":true}"#;
        let outcome = interpret_order(StatusCode::OK, body).unwrap();
        match outcome {
            PurchaseOutcome::Filled { order_id, details } => {
                assert_eq!(order_id.as_str(), "42");
                assert!(details.contains("0.25"));
            }
            other => panic!("expected fill, got {other:?}"),
        }
    }

    #[test]
    fn unfilled_immediate_or_cancel_is_failure() {
        let body = r#"{"order_id":"42","symbol":"btcusd","executed_amount":"0","is_cancelled":true}"#;
        let outcome = interpret_order(StatusCode::OK, body).unwrap();
        assert!(!outcome.is_success());
    }

    #[test]
    fn rejected_order_reports_reason() {
        let body = r#"{"result":"error","reason":"InsufficientFunds","message":"Not enough USD"}"#;
        let outcome = interpret_order(StatusCode::BAD_REQUEST, body).unwrap();
        assert_eq!(
            outcome,
            PurchaseOutcome::Failed {
                reason: "InsufficientFunds: Not enough USD".into()
            }
        );
    }

    #[test]
    fn auth_failure_on_order_is_error() {
        let err = interpret_order(StatusCode::UNAUTHORIZED, "{}").unwrap_err();
        assert!(!err.is_transient());
    }

    #[test]
    fn environment_selects_base_url() {
        let http = HttpSettings::default();
        let live = GeminiGateway::for_environment(false, GeminiSigner::new("k", "s"), &http);
        let sandbox = GeminiGateway::for_environment(true, GeminiSigner::new("k", "s"), &http);
        assert_eq!(live.base_url(), PRODUCTION_URL);
        assert_eq!(sandbox.base_url(), SANDBOX_URL);
    }
}

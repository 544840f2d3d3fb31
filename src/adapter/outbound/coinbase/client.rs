//! Coinbase Exchange REST gateway.
//!
//! Buys are market orders sized by `funds`, so the exchange handles lot
//! rounding.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use super::auth::CoinbaseSigner;
use super::dto::{Account, ErrorResponse, MarketOrderRequest, Order, Ticker};
use crate::adapter::outbound::http::{status_error, HttpSettings, RestClient};
use crate::domain::{round_cents, AssetSymbol, OrderId, Price, UsdAmount};
use crate::error::{Error, ExchangeError, Result};
use crate::port::{ExchangeGateway, PurchaseOutcome};

pub const PRODUCTION_URL: &str = "https://api.exchange.coinbase.com";
pub const SANDBOX_URL: &str = "https://api-public.sandbox.exchange.coinbase.com";

const EXCHANGE: &str = "Coinbase";
const ACCOUNTS_PATH: &str = "/accounts";
const ORDERS_PATH: &str = "/orders";

/// [`ExchangeGateway`] backed by the Coinbase Exchange REST API.
#[derive(Debug)]
pub struct CoinbaseGateway {
    rest: RestClient,
    signer: CoinbaseSigner,
}

impl CoinbaseGateway {
    #[must_use]
    pub fn new(base_url: impl Into<String>, signer: CoinbaseSigner, http: &HttpSettings) -> Self {
        Self {
            rest: RestClient::new(EXCHANGE, base_url, http),
            signer,
        }
    }

    /// Gateway for the production or sandbox environment.
    #[must_use]
    pub fn for_environment(sandbox: bool, signer: CoinbaseSigner, http: &HttpSettings) -> Self {
        let url = if sandbox { SANDBOX_URL } else { PRODUCTION_URL };
        Self::new(url, signer, http)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.rest.base_url()
    }

    fn signed(&self, method: Method, path: &str, body: &str) -> Result<RequestBuilder> {
        let timestamp = CoinbaseSigner::timestamp(Utc::now());
        let signature = self.signer.sign(&timestamp, method.as_str(), path, body)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("cb-access-key", header_value(self.signer.api_key())?);
        headers.insert("cb-access-sign", header_value(&signature)?);
        headers.insert("cb-access-timestamp", header_value(&timestamp)?);
        headers.insert("cb-access-passphrase", header_value(self.signer.passphrase())?);

        let request = if method == Method::POST {
            self.rest.post(path).body(body.to_string())
        } else {
            self.rest.get(path)
        };
        Ok(request.headers(headers))
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ExchangeError::AuthFailed(format!("invalid header value: {e}")).into())
}

fn usd_available(accounts: &[Account]) -> Decimal {
    accounts
        .iter()
        .filter(|a| a.currency.eq_ignore_ascii_case("USD"))
        .map(|a| a.available)
        .sum()
}

fn interpret_order(status: StatusCode, body: &str) -> Result<PurchaseOutcome> {
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        return Err(status_error(EXCHANGE, status, body));
    }
    if !status.is_success() {
        let reason = serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.message)
            .unwrap_or_else(|_| format!("HTTP {status}: {}", body.trim()));
        return Ok(PurchaseOutcome::Failed { reason });
    }

    let order: Order = serde_json::from_str(body)?;
    if order.status.eq_ignore_ascii_case("rejected") {
        return Ok(PurchaseOutcome::Failed {
            reason: format!("order {} rejected", order.id),
        });
    }

    let funds = order
        .funds
        .map_or_else(|| "unknown".to_string(), |f| f.to_string());
    Ok(PurchaseOutcome::Filled {
        details: format!(
            "{} market buy for {funds} USD is {}",
            order.product_id, order.status
        ),
        order_id: OrderId::new(order.id),
    })
}

#[async_trait]
impl ExchangeGateway for CoinbaseGateway {
    async fn current_price(&self, asset: &AssetSymbol) -> Result<Price> {
        let path = format!("/products/{}/ticker", asset.product_id());
        let ticker: Ticker = self
            .rest
            .fetch_json(|| Ok(self.rest.get(&path)))
            .await
            .map_err(|e| match e {
                Error::Exchange(ExchangeError::AuthFailed(_)) => e,
                other => ExchangeError::PriceUnavailable {
                    asset: asset.to_string(),
                    reason: other.to_string(),
                }
                .into(),
            })?;

        if ticker.price <= Decimal::ZERO {
            return Err(ExchangeError::PriceUnavailable {
                asset: asset.to_string(),
                reason: format!("non-positive quote {}", ticker.price),
            }
            .into());
        }
        debug!(asset = %asset, price = %ticker.price, "Fetched Coinbase price");
        Ok(ticker.price)
    }

    async fn has_balance(&self, required: UsdAmount) -> Result<bool> {
        let accounts: Vec<Account> = self
            .rest
            .fetch_json(|| self.signed(Method::GET, ACCOUNTS_PATH, ""))
            .await
            .map_err(|e| match e {
                Error::Exchange(ExchangeError::AuthFailed(_)) => e,
                other => ExchangeError::BalanceUnavailable(other.to_string()).into(),
            })?;

        let available = usd_available(&accounts);
        debug!(available = %available, required = %required, "Fetched Coinbase USD balance");
        Ok(available >= required)
    }

    async fn buy(&self, asset: &AssetSymbol, amount: UsdAmount) -> Result<PurchaseOutcome> {
        let order = MarketOrderRequest {
            order_type: "market",
            side: "buy",
            product_id: asset.product_id(),
            funds: round_cents(amount).to_string(),
            client_oid: Uuid::new_v4().to_string(),
        };
        let body = serde_json::to_string(&order)?;

        info!(asset = %asset, funds = %order.funds, "Placing Coinbase market order");
        let response = self
            .rest
            .send_once(self.signed(Method::POST, ORDERS_PATH, &body)?)
            .await?;
        let status = response.status();
        let text = response.text().await?;
        interpret_order(status, &text)
    }

    fn exchange_name(&self) -> &'static str {
        EXCHANGE
    }
}

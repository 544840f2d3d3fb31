//! Scripted exchange gateway.
//!
//! Every knob takes `&self`, so a test can keep an `Arc<ScriptedGateway>`
//! and change the market between ticks while the engine holds a clone.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{AssetSymbol, OrderId, Price, UsdAmount};
use crate::error::{ExchangeError, Result};
use crate::port::{ExchangeGateway, PurchaseOutcome};

#[derive(Debug)]
enum Quote {
    Price(Price),
    Unavailable(String),
}

#[derive(Debug)]
enum Funds {
    Available(Decimal),
    Unavailable(String),
}

/// An [`ExchangeGateway`] whose answers are set by the test.
///
/// Defaults: no quote (price requests fail), zero balance, and every buy
/// fills with order ids `order-1`, `order-2`, ...
#[derive(Debug)]
pub struct ScriptedGateway {
    quote: Mutex<Quote>,
    funds: Mutex<Funds>,
    buy_results: Mutex<VecDeque<Result<PurchaseOutcome>>>,
    buys: Mutex<Vec<(AssetSymbol, UsdAmount)>>,
    price_requests: AtomicU32,
    balance_requests: AtomicU32,
}

impl Default for ScriptedGateway {
    fn default() -> Self {
        Self {
            quote: Mutex::new(Quote::Unavailable("no price scripted".into())),
            funds: Mutex::new(Funds::Available(Decimal::ZERO)),
            buy_results: Mutex::new(VecDeque::new()),
            buys: Mutex::new(Vec::new()),
            price_requests: AtomicU32::new(0),
            balance_requests: AtomicU32::new(0),
        }
    }
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_price(self, price: Price) -> Self {
        self.set_price(price);
        self
    }

    #[must_use]
    pub fn with_balance(self, available: Decimal) -> Self {
        self.set_balance(available);
        self
    }

    /// Quote `price` until told otherwise.
    pub fn set_price(&self, price: Price) {
        *self.quote.lock().expect("lock quote") = Quote::Price(price);
    }

    /// Fail price requests until a price is set again.
    pub fn fail_price(&self, reason: &str) {
        *self.quote.lock().expect("lock quote") = Quote::Unavailable(reason.into());
    }

    pub fn set_balance(&self, available: Decimal) {
        *self.funds.lock().expect("lock funds") = Funds::Available(available);
    }

    /// Fail balance requests until a balance is set again.
    pub fn fail_balance(&self, reason: &str) {
        *self.funds.lock().expect("lock funds") = Funds::Unavailable(reason.into());
    }

    /// Queue the result of the next unanswered buy.
    pub fn push_buy_result(&self, result: Result<PurchaseOutcome>) {
        self.buy_results
            .lock()
            .expect("lock buy results")
            .push_back(result);
    }

    /// Every buy request received, oldest first.
    pub fn buys(&self) -> Vec<(AssetSymbol, UsdAmount)> {
        self.buys.lock().expect("lock buys").clone()
    }

    pub fn buy_count(&self) -> usize {
        self.buys.lock().expect("lock buys").len()
    }

    pub fn price_requests(&self) -> u32 {
        self.price_requests.load(Ordering::SeqCst)
    }

    pub fn balance_requests(&self) -> u32 {
        self.balance_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExchangeGateway for ScriptedGateway {
    async fn current_price(&self, asset: &AssetSymbol) -> Result<Price> {
        self.price_requests.fetch_add(1, Ordering::SeqCst);
        match &*self.quote.lock().expect("lock quote") {
            Quote::Price(price) => Ok(*price),
            Quote::Unavailable(reason) => Err(ExchangeError::PriceUnavailable {
                asset: asset.to_string(),
                reason: reason.clone(),
            }
            .into()),
        }
    }

    async fn has_balance(&self, required: UsdAmount) -> Result<bool> {
        self.balance_requests.fetch_add(1, Ordering::SeqCst);
        match &*self.funds.lock().expect("lock funds") {
            Funds::Available(available) => Ok(*available >= required),
            Funds::Unavailable(reason) => {
                Err(ExchangeError::BalanceUnavailable(reason.clone()).into())
            }
        }
    }

    async fn buy(&self, asset: &AssetSymbol, amount: UsdAmount) -> Result<PurchaseOutcome> {
        let number = {
            let mut buys = self.buys.lock().expect("lock buys");
            buys.push((asset.clone(), amount));
            buys.len()
        };
        let scripted = self.buy_results.lock().expect("lock buy results").pop_front();
        scripted.unwrap_or_else(|| {
            Ok(PurchaseOutcome::Filled {
                order_id: OrderId::new(format!("order-{number}")),
                details: format!("bought ${amount} of {asset}"),
            })
        })
    }

    fn exchange_name(&self) -> &'static str {
        "Scripted"
    }
}

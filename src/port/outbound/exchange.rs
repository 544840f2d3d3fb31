//! Exchange gateway port.
//!
//! The decision engine only ever talks to an exchange through
//! [`ExchangeGateway`]. Each supported exchange provides one implementation.

use async_trait::async_trait;

use crate::domain::{AssetSymbol, OrderId, Price, UsdAmount};
use crate::error::Result;

/// Result of attempting a purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// The exchange accepted and (at least partially) filled the order.
    Filled {
        order_id: OrderId,
        /// Human-readable summary of the fill.
        details: String,
    },
    /// The exchange rejected the order or it expired unfilled.
    Failed {
        reason: String,
    },
}

impl PurchaseOutcome {
    /// Check if the purchase went through.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, PurchaseOutcome::Filled { .. })
    }
}

/// Capability interface to a spot exchange.
///
/// # Implementation Notes
///
/// - `current_price` must never return a non-positive price. A missing or
///   malformed quote is an `ExchangeError::PriceUnavailable`.
/// - `buy` must behave like a best-effort market buy. Exchanges that only
///   take limit orders derive an aggressive limit with immediate-or-cancel.
///   Lot-size rounding of the traded quantity happens here.
#[async_trait]
pub trait ExchangeGateway: Send + Sync {
    /// Current USD price of `asset`.
    async fn current_price(&self, asset: &AssetSymbol) -> Result<Price>;

    /// True only if the available USD balance covers `required`.
    async fn has_balance(&self, required: UsdAmount) -> Result<bool>;

    /// Spend `amount` USD on `asset`.
    async fn buy(&self, asset: &AssetSymbol, amount: UsdAmount) -> Result<PurchaseOutcome>;

    /// Get the exchange name for logging/debugging.
    fn exchange_name(&self) -> &'static str;
}

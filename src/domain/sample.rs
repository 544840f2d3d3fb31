//! Price history records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::dip::whole_days_between;
use super::error::DomainError;
use super::id::AssetSymbol;
use super::money::{round_cents, Price};

/// A single timestamped price observation.
///
/// Immutable once recorded. The price is stored at cent precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSample {
    asset: AssetSymbol,
    recorded_at: DateTime<Utc>,
    price: Price,
}

impl PriceSample {
    /// Create a sample, rounding the price to cents.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonPositivePrice`] if the price is zero or
    /// negative (before or after rounding).
    pub fn new(
        asset: AssetSymbol,
        recorded_at: DateTime<Utc>,
        price: Price,
    ) -> Result<Self, DomainError> {
        let rounded = round_cents(price);
        if price <= Decimal::ZERO || rounded <= Decimal::ZERO {
            return Err(DomainError::NonPositivePrice { price });
        }
        Ok(Self {
            asset,
            recorded_at,
            price: rounded,
        })
    }

    #[must_use]
    pub fn asset(&self) -> &AssetSymbol {
        &self.asset
    }

    #[must_use]
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    #[must_use]
    pub fn price(&self) -> Price {
        self.price
    }
}

/// Timestamp of the most recent purchase attempt for an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseMarker {
    pub asset: AssetSymbol,
    pub last_purchase_at: DateTime<Utc>,
}

impl PurchaseMarker {
    #[must_use]
    pub fn new(asset: AssetSymbol, last_purchase_at: DateTime<Utc>) -> Self {
        Self {
            asset,
            last_purchase_at,
        }
    }

    /// Whether at least `cooldown_days` whole days separate the marker from
    /// `now`. The boundary day counts as elapsed.
    #[must_use]
    pub fn is_cool_down_elapsed(&self, cooldown_days: u32, now: DateTime<Utc>) -> bool {
        whole_days_between(self.last_purchase_at, now) >= i64::from(cooldown_days)
    }
}

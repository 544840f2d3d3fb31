//! Dip detection math.
//!
//! Pure functions shared by every price store implementation and by the
//! decision engine. All results are rounded to cents
//! with [`round_cents`] so the same history always yields the same decision.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use super::error::DomainError;
use super::money::{round_cents, Price};

/// Percentage drop below the trailing average that counts as a dip.
///
/// Always within (0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DipPercent(Decimal);

impl DipPercent {
    /// Validate and wrap a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DipPercentOutOfRange`] outside (0, 100].
    pub fn try_new(percent: Decimal) -> Result<Self, DomainError> {
        if percent <= Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(DomainError::DipPercentOutOfRange { percent });
        }
        Ok(Self(percent))
    }

    #[must_use]
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for DipPercent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Arithmetic mean of `prices`, rounded to cents.
///
/// # Errors
///
/// Returns [`DomainError::InsufficientData`] for an empty slice.
pub fn mean_price(prices: &[Price]) -> Result<Price, DomainError> {
    if prices.is_empty() {
        return Err(DomainError::InsufficientData);
    }
    let sum: Decimal = prices.iter().copied().sum();
    Ok(round_cents(sum / Decimal::from(prices.len())))
}

/// Price at which the current quote counts as a dip.
#[must_use]
pub fn dip_threshold(average: Price, dip: DipPercent) -> Price {
    let fraction = Decimal::ONE - dip.value() / Decimal::ONE_HUNDRED;
    round_cents(average * fraction)
}

/// Whether `price` is at or below `threshold`. The boundary counts as a dip.
#[must_use]
pub fn is_dip(price: Price, threshold: Price) -> bool {
    price <= threshold
}

/// Whole days elapsed from `earlier` to `later`, truncated.
///
/// Negative when the clock went backwards.
#[must_use]
pub fn whole_days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    (later - earlier).num_days()
}

/// Exclusive lower bound of the averaging window at `now`.
///
/// A sample belongs to a `window_days` window while its age in whole days,
/// truncated, is at most `window_days`. That holds exactly for samples
/// recorded strictly after the returned instant.
#[must_use]
pub fn average_window_start(now: DateTime<Utc>, window_days: u32) -> DateTime<Utc> {
    now - Duration::days(i64::from(window_days) + 1)
}

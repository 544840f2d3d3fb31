//! Persistence port for price history and the purchase marker.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::domain::{Price, PriceSample};
use crate::error::Result;

/// Durable price history and purchase marker for a single asset.
///
/// Implementations are scoped to one asset; running several bots means
/// several stores with no shared state.
///
/// # Implementation Notes
///
/// - `record` must be idempotent: re-recording a sample with the same
///   timestamp leaves exactly one row.
/// - `mark_purchase` is an upsert.
/// - `is_cool_down_elapsed` must initialize an absent marker to `now` and
///   report `false` for that call, atomically with respect to other callers.
pub trait PriceStore: Send + Sync {
    /// Append a price sample.
    fn record(&self, sample: &PriceSample) -> impl Future<Output = Result<()>> + Send;

    /// Mean of all samples whose age at `now`, in truncated whole days, is at
    /// most `window_days`, rounded to cents. Fails with `DomainError::InsufficientData` when none qualify.
    fn average(
        &self,
        window_days: u32,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<Price>> + Send;

    /// Delete every sample older than `horizon_days` at `now`. Returns the
    /// number of samples removed.
    fn purge(
        &self,
        horizon_days: u32,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<usize>> + Send;

    /// Set the last purchase time to `now`.
    fn mark_purchase(&self, now: DateTime<Utc>) -> impl Future<Output = Result<()>> + Send;

    /// Whether at least `cooldown_days` whole days have passed since the last
    /// purchase.
    fn is_cool_down_elapsed(
        &self,
        cooldown_days: u32,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// The stored last purchase time, if any.
    fn last_purchase(&self) -> impl Future<Output = Result<Option<DateTime<Utc>>>> + Send;

    /// Number of samples currently held.
    fn sample_count(&self) -> impl Future<Output = Result<usize>> + Send;
}

//! In-memory price store.
//!
//! Same semantics as the SQLite store, without durability. Used by tests and
//! handy for experimenting against a sandbox exchange.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use crate::domain::{
    average_window_start, mean_price, AssetSymbol, Price, PriceSample, PurchaseMarker,
};
use crate::error::Result;
use crate::port::PriceStore;

/// In-memory store for a single asset.
#[derive(Debug)]
pub struct MemoryStore {
    asset: AssetSymbol,
    samples: Mutex<Vec<PriceSample>>,
    last_purchase: Mutex<Option<DateTime<Utc>>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new(asset: AssetSymbol) -> Self {
        Self {
            asset,
            samples: Mutex::new(Vec::new()),
            last_purchase: Mutex::new(None),
        }
    }

    /// Snapshot of every sample held for this asset, oldest first.
    #[must_use]
    pub fn samples(&self) -> Vec<PriceSample> {
        let mut samples: Vec<PriceSample> = self
            .samples
            .lock()
            .iter()
            .filter(|s| s.asset() == &self.asset)
            .cloned()
            .collect();
        samples.sort_by_key(PriceSample::recorded_at);
        samples
    }
}

impl PriceStore for MemoryStore {
    async fn record(&self, sample: &PriceSample) -> Result<()> {
        let mut samples = self.samples.lock();
        let duplicate = samples
            .iter()
            .any(|s| s.asset() == sample.asset() && s.recorded_at() == sample.recorded_at());
        if !duplicate {
            samples.push(sample.clone());
        }
        Ok(())
    }

    async fn average(&self, window_days: u32, now: DateTime<Utc>) -> Result<Price> {
        let start = average_window_start(now, window_days);
        let prices: Vec<Price> = self
            .samples
            .lock()
            .iter()
            .filter(|s| s.asset() == &self.asset && s.recorded_at() > start)
            .map(PriceSample::price)
            .collect();
        Ok(mean_price(&prices)?)
    }

    async fn purge(&self, horizon_days: u32, now: DateTime<Utc>) -> Result<usize> {
        let cutoff = now - Duration::days(i64::from(horizon_days));
        let mut samples = self.samples.lock();
        let before = samples.len();
        samples.retain(|s| s.asset() != &self.asset || s.recorded_at() >= cutoff);
        Ok(before - samples.len())
    }

    async fn mark_purchase(&self, now: DateTime<Utc>) -> Result<()> {
        *self.last_purchase.lock() = Some(now);
        Ok(())
    }

    async fn is_cool_down_elapsed(&self, cooldown_days: u32, now: DateTime<Utc>) -> Result<bool> {
        let mut marker = self.last_purchase.lock();
        match *marker {
            None => {
                *marker = Some(now);
                Ok(false)
            }
            Some(last) => Ok(PurchaseMarker::new(self.asset.clone(), last)
                .is_cool_down_elapsed(cooldown_days, now)),
        }
    }

    async fn last_purchase(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(*self.last_purchase.lock())
    }

    async fn sample_count(&self) -> Result<usize> {
        Ok(self
            .samples
            .lock()
            .iter()
            .filter(|s| s.asset() == &self.asset)
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    fn btc() -> AssetSymbol {
        AssetSymbol::new("BTC").unwrap()
    }

    fn sample_at(at: DateTime<Utc>, price: Price) -> PriceSample {
        PriceSample::new(btc(), at, price).unwrap()
    }

    #[tokio::test]
    async fn average_ignores_samples_outside_window() {
        let now = Utc::now();
        let store = MemoryStore::new(btc());
        store.record(&sample_at(now - Duration::days(1), dec!(100))).await.unwrap();
        store.record(&sample_at(now, dec!(110))).await.unwrap();
        assert_eq!(store.average(7, now).await.unwrap(), dec!(105.00));

        store
            .record(&sample_at(now - Duration::days(8), dec!(1000)))
            .await
            .unwrap();
        assert_eq!(store.average(7, now).await.unwrap(), dec!(105.00));
    }

    #[tokio::test]
    async fn average_counts_age_in_whole_days() {
        let now = Utc::now();
        let store = MemoryStore::new(btc());
        store
            .record(&sample_at(now - Duration::days(7) - Duration::hours(12), dec!(100)))
            .await
            .unwrap();
        assert_eq!(store.average(7, now).await.unwrap(), dec!(100.00));

        store
            .record(&sample_at(now - Duration::days(8), dec!(1000)))
            .await
            .unwrap();
        assert_eq!(store.average(7, now).await.unwrap(), dec!(100.00));
    }

    #[tokio::test]
    async fn average_of_empty_history_is_insufficient_data() {
        let store = MemoryStore::new(btc());
        let err = store.average(7, Utc::now()).await.unwrap_err();
        assert!(matches!(err, Error::Domain(DomainError::InsufficientData)));
    }

    #[tokio::test]
    async fn record_is_idempotent() {
        let now = Utc::now();
        let store = MemoryStore::new(btc());
        let sample = sample_at(now, dec!(100));
        store.record(&sample).await.unwrap();
        store.record(&sample).await.unwrap();
        assert_eq!(store.sample_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn purge_removes_only_old_samples() {
        let now = Utc::now();
        let store = MemoryStore::new(btc());
        store
            .record(&sample_at(now - Duration::days(31), dec!(1)))
            .await
            .unwrap();
        store
            .record(&sample_at(now - Duration::days(30), dec!(2)))
            .await
            .unwrap();
        store.record(&sample_at(now, dec!(3))).await.unwrap();

        assert_eq!(store.purge(30, now).await.unwrap(), 1);
        assert_eq!(store.purge(30, now).await.unwrap(), 0);
        let prices: Vec<Price> = store.samples().iter().map(PriceSample::price).collect();
        assert_eq!(prices, vec![dec!(2), dec!(3)]);
    }

    #[tokio::test]
    async fn first_cool_down_check_initializes_marker() {
        let now = Utc::now();
        let store = MemoryStore::new(btc());
        assert!(!store.is_cool_down_elapsed(7, now).await.unwrap());
        assert_eq!(store.last_purchase().await.unwrap(), Some(now));

        assert!(!store
            .is_cool_down_elapsed(7, now + Duration::days(6))
            .await
            .unwrap());
        assert!(store
            .is_cool_down_elapsed(7, now + Duration::days(7))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn zero_day_cool_down_is_elapsed_once_initialized() {
        let now = Utc::now();
        let store = MemoryStore::new(btc());
        assert!(!store.is_cool_down_elapsed(0, now).await.unwrap());
        assert!(store.is_cool_down_elapsed(0, now).await.unwrap());
    }
}

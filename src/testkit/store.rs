//! Memory store with injectable failures.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use chrono::{DateTime, Utc};

use crate::adapter::outbound::memory::MemoryStore;
use crate::domain::{AssetSymbol, Price, PriceSample};
use crate::error::{Error, Result};
use crate::port::PriceStore;

/// Wraps a [`MemoryStore`] and fails selected operations on demand.
#[derive(Debug)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_records: AtomicBool,
    fail_reads: AtomicBool,
    fail_purge: AtomicBool,
    marker_failures: AtomicU32,
    marker_writes: AtomicU32,
}

impl FlakyStore {
    pub fn new(asset: AssetSymbol) -> Self {
        Self {
            inner: MemoryStore::new(asset),
            fail_records: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
            fail_purge: AtomicBool::new(false),
            marker_failures: AtomicU32::new(0),
            marker_writes: AtomicU32::new(0),
        }
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    pub fn fail_records(&self, fail: bool) {
        self.fail_records.store(fail, Ordering::SeqCst);
    }

    /// Fail `average` and `is_cool_down_elapsed`.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_purge(&self, fail: bool) {
        self.fail_purge.store(fail, Ordering::SeqCst);
    }

    /// Fail the next `count` calls to `mark_purchase`.
    pub fn fail_next_marker_writes(&self, count: u32) {
        self.marker_failures.store(count, Ordering::SeqCst);
    }

    /// Calls to `mark_purchase`, failed ones included.
    pub fn marker_writes(&self) -> u32 {
        self.marker_writes.load(Ordering::SeqCst)
    }

    fn injected(operation: &str) -> Error {
        Error::Database(format!("injected {operation} failure"))
    }
}

impl PriceStore for FlakyStore {
    async fn record(&self, sample: &PriceSample) -> Result<()> {
        if self.fail_records.load(Ordering::SeqCst) {
            return Err(Self::injected("record"));
        }
        self.inner.record(sample).await
    }

    async fn average(&self, window_days: u32, now: DateTime<Utc>) -> Result<Price> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::injected("average"));
        }
        self.inner.average(window_days, now).await
    }

    async fn purge(&self, horizon_days: u32, now: DateTime<Utc>) -> Result<usize> {
        if self.fail_purge.load(Ordering::SeqCst) {
            return Err(Self::injected("purge"));
        }
        self.inner.purge(horizon_days, now).await
    }

    async fn mark_purchase(&self, now: DateTime<Utc>) -> Result<()> {
        self.marker_writes.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .marker_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(Self::injected("marker write"));
        }
        self.inner.mark_purchase(now).await
    }

    async fn is_cool_down_elapsed(&self, cooldown_days: u32, now: DateTime<Utc>) -> Result<bool> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::injected("cool-down check"));
        }
        self.inner.is_cool_down_elapsed(cooldown_days, now).await
    }

    async fn last_purchase(&self) -> Result<Option<DateTime<Utc>>> {
        self.inner.last_purchase().await
    }

    async fn sample_count(&self) -> Result<usize> {
        self.inner.sample_count().await
    }
}

//! SQLite price store implementation.
//!
//! Timestamps are stored as fixed-width RFC 3339 text in UTC with
//! microsecond precision, so string order equals time order and range
//! filters run directly on the text column. Prices are stored as decimal
//! strings and averaged in Rust to keep exact cent arithmetic.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::SqliteConnection;

use super::database::connection::DbPool;
use super::database::model::{NewPriceSampleRow, PurchaseMarkerRow};
use super::database::schema::{price_samples, purchase_markers};
use crate::domain::{
    average_window_start, mean_price, AssetSymbol, Price, PriceSample, PurchaseMarker,
};
use crate::error::{Error, Result};
use crate::port::outbound::store::PriceStore;

type Conn = PooledConnection<ConnectionManager<SqliteConnection>>;

/// SQLite-backed price store for a single asset.
pub struct SqlitePriceStore {
    pool: DbPool,
    asset: AssetSymbol,
}

impl SqlitePriceStore {
    /// Create a store for `asset` on an already migrated pool.
    #[must_use]
    pub fn new(pool: DbPool, asset: AssetSymbol) -> Self {
        Self { pool, asset }
    }

    fn conn(&self) -> Result<Conn> {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }
}

fn encode_time(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_time(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::Parse(format!("invalid timestamp {text:?}: {e}")))
}

fn decode_price(text: &str) -> Result<Price> {
    text.parse::<Price>()
        .map_err(|e| Error::Parse(format!("invalid price {text:?}: {e}")))
}

fn cutoff(now: DateTime<Utc>, days: u32) -> String {
    encode_time(now - Duration::days(i64::from(days)))
}

impl PriceStore for SqlitePriceStore {
    async fn record(&self, sample: &PriceSample) -> Result<()> {
        let row = NewPriceSampleRow {
            asset: sample.asset().as_str().to_string(),
            recorded_at: encode_time(sample.recorded_at()),
            price: sample.price().to_string(),
        };
        let mut conn = self.conn()?;

        diesel::insert_or_ignore_into(price_samples::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn average(&self, window_days: u32, now: DateTime<Utc>) -> Result<Price> {
        let start = encode_time(average_window_start(now, window_days));
        let mut conn = self.conn()?;

        let rows: Vec<String> = price_samples::table
            .filter(price_samples::asset.eq(self.asset.as_str()))
            .filter(price_samples::recorded_at.gt(&start))
            .select(price_samples::price)
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        let prices = rows
            .iter()
            .map(String::as_str)
            .map(decode_price)
            .collect::<Result<Vec<_>>>()?;
        Ok(mean_price(&prices)?)
    }

    async fn purge(&self, horizon_days: u32, now: DateTime<Utc>) -> Result<usize> {
        let before = cutoff(now, horizon_days);
        let mut conn = self.conn()?;

        diesel::delete(
            price_samples::table
                .filter(price_samples::asset.eq(self.asset.as_str()))
                .filter(price_samples::recorded_at.lt(&before)),
        )
        .execute(&mut conn)
        .map_err(|e| Error::Database(e.to_string()))
    }

    async fn mark_purchase(&self, now: DateTime<Utc>) -> Result<()> {
        let row = PurchaseMarkerRow {
            asset: self.asset.as_str().to_string(),
            last_purchase_at: encode_time(now),
        };
        let mut conn = self.conn()?;

        diesel::replace_into(purchase_markers::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn is_cool_down_elapsed(&self, cooldown_days: u32, now: DateTime<Utc>) -> Result<bool> {
        let row = PurchaseMarkerRow {
            asset: self.asset.as_str().to_string(),
            last_purchase_at: encode_time(now),
        };
        let mut conn = self.conn()?;

        // A fresh install starts its first cool-down window now.
        let inserted = diesel::insert_or_ignore_into(purchase_markers::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        if inserted > 0 {
            return Ok(false);
        }

        let last: String = purchase_markers::table
            .find(self.asset.as_str())
            .select(purchase_markers::last_purchase_at)
            .first(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        let marker = PurchaseMarker::new(self.asset.clone(), decode_time(&last)?);
        Ok(marker.is_cool_down_elapsed(cooldown_days, now))
    }

    async fn last_purchase(&self) -> Result<Option<DateTime<Utc>>> {
        let mut conn = self.conn()?;

        let last: Option<String> = purchase_markers::table
            .find(self.asset.as_str())
            .select(purchase_markers::last_purchase_at)
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        last.as_deref().map(decode_time).transpose()
    }

    async fn sample_count(&self) -> Result<usize> {
        let mut conn = self.conn()?;

        let count: i64 = price_samples::table
            .filter(price_samples::asset.eq(self.asset.as_str()))
            .count()
            .get_result(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        usize::try_from(count).map_err(|e| Error::Parse(e.to_string()))
    }
}

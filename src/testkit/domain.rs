//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions so tests focus on assertions rather
//! than construction boilerplate.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::application::BotSettings;
use crate::domain::{AssetSymbol, DipPercent, PriceSample};

/// Create an [`AssetSymbol`] from a ticker.
pub fn asset(symbol: &str) -> AssetSymbol {
    AssetSymbol::new(symbol).expect("valid asset symbol")
}

/// Midnight UTC on the given date plus `hour` hours.
pub fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// A BTC sample at `at`.
pub fn sample(at: DateTime<Utc>, price: Decimal) -> PriceSample {
    PriceSample::new(asset("BTC"), at, price).expect("valid sample")
}

/// Settings for BTC with the given buy amount and dip percentage and the
/// default windows. Marker retries do not pause.
pub fn settings(buy_amount: Decimal, dip_percent: Decimal) -> BotSettings {
    let dip = DipPercent::try_new(dip_percent).expect("valid dip percent");
    let mut settings = BotSettings::new(asset("BTC"), buy_amount, dip);
    settings.marker_retry_backoff = std::time::Duration::ZERO;
    settings
}

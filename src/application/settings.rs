//! Immutable bot settings consumed by the decision engine.

use std::time::Duration;

use crate::domain::{AssetSymbol, DipPercent, UsdAmount};

/// Default trailing window for the average price.
pub const DEFAULT_AVERAGE_WINDOW_DAYS: u32 = 7;
/// Default minimum gap between purchase attempts.
pub const DEFAULT_COOL_DOWN_DAYS: u32 = 7;
/// Default time between ticks.
pub const DEFAULT_TICK_INTERVAL_MINUTES: u32 = 60;
/// Samples older than this are deleted by the daily maintenance sweep.
pub const DEFAULT_PURGE_HORIZON_DAYS: u32 = 30;
/// Attempts made to persist the purchase marker before giving up.
pub const DEFAULT_MARKER_WRITE_ATTEMPTS: u32 = 3;

/// Everything the engine needs to know about the monitored asset.
///
/// Built once at startup from validated configuration and never mutated.
#[derive(Debug, Clone)]
pub struct BotSettings {
    pub asset: AssetSymbol,
    /// USD spent per purchase.
    pub buy_amount: UsdAmount,
    pub dip_percent: DipPercent,
    pub average_window_days: u32,
    pub cool_down_days: u32,
    pub tick_interval_minutes: u32,
    pub purge_horizon_days: u32,
    pub marker_write_attempts: u32,
    /// Pause between failed purchase marker writes.
    pub marker_retry_backoff: Duration,
}

impl BotSettings {
    /// Settings with the default windows, interval and retry policy.
    #[must_use]
    pub fn new(asset: AssetSymbol, buy_amount: UsdAmount, dip_percent: DipPercent) -> Self {
        Self {
            asset,
            buy_amount,
            dip_percent,
            average_window_days: DEFAULT_AVERAGE_WINDOW_DAYS,
            cool_down_days: DEFAULT_COOL_DOWN_DAYS,
            tick_interval_minutes: DEFAULT_TICK_INTERVAL_MINUTES,
            purge_horizon_days: DEFAULT_PURGE_HORIZON_DAYS,
            marker_write_attempts: DEFAULT_MARKER_WRITE_ATTEMPTS,
            marker_retry_backoff: Duration::from_millis(500),
        }
    }

    /// Time between the end of one tick and the start of the next.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.tick_interval_minutes) * 60)
    }
}

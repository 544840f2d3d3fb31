//! Dip detection and purchase decision engine.
//!
//! One call to [`DipEngine::tick`] runs the whole decision procedure:
//!
//! ```text
//! SamplePrice ─► RecordSample ─► CheckBalance ─┬─► InsufficientFunds
//!                                              └─► CheckCooldown ─┬─► CoolingDown
//!                                                                 └─► EvaluateDip ─┬─► NoDip
//!                                                                                  └─► AttemptPurchase
//! then, independently: MaybeMaintenance
//! ```
//!
//! No decision state lives in the engine itself. Cool-down and averaging
//! state is in the [`PriceStore`], so a restarted process picks up exactly
//! where the previous one stopped. The only in-memory state is the tick
//! counter that schedules the daily maintenance sweep.
//!
//! A failing collaborator never aborts the loop: the tick ends early with an
//! outcome describing what went wrong.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use super::settings::BotSettings;
use crate::domain::{dip_threshold, is_dip, DomainError, OrderId, Price, PriceSample};
use crate::error::{Error, Result};
use crate::port::{
    Clock, ErrorEvent, Event, ExchangeGateway, FundingEvent, NotifierRegistry, PriceStore,
    PurchaseEvent, PurchaseOutcome,
};

const MINUTES_PER_DAY: u64 = 1440;

/// Terminal state reached by the decision part of a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The exchange could not quote a price. Nothing was recorded.
    PriceUnavailable { reason: String },
    /// The balance check itself failed.
    BalanceUnavailable { reason: String },
    /// Available USD does not cover the buy amount.
    InsufficientFunds,
    /// The price history or purchase marker could not be read.
    StoreUnavailable { reason: String },
    /// Too soon after the last purchase attempt.
    CoolingDown,
    /// No samples inside the averaging window.
    InsufficientData,
    /// Price is above the dip threshold.
    NoDip {
        price: Price,
        average: Price,
        threshold: Price,
    },
    /// Dip detected and the exchange filled the order.
    Purchased {
        price: Price,
        threshold: Price,
        order_id: OrderId,
    },
    /// Dip detected but the purchase failed.
    PurchaseFailed {
        price: Price,
        threshold: Price,
        reason: String,
    },
}

impl TickOutcome {
    /// Short name of the decision path, used as a log field.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            TickOutcome::PriceUnavailable { .. } => "price_unavailable",
            TickOutcome::BalanceUnavailable { .. } => "balance_unavailable",
            TickOutcome::InsufficientFunds => "insufficient_funds",
            TickOutcome::StoreUnavailable { .. } => "store_unavailable",
            TickOutcome::CoolingDown => "cooling_down",
            TickOutcome::InsufficientData => "insufficient_data",
            TickOutcome::NoDip { .. } => "no_dip",
            TickOutcome::Purchased { .. } => "purchased",
            TickOutcome::PurchaseFailed { .. } => "purchase_failed",
        }
    }

    /// Whether this tick attempted a purchase.
    #[must_use]
    pub fn attempted_purchase(&self) -> bool {
        matches!(
            self,
            TickOutcome::Purchased { .. } | TickOutcome::PurchaseFailed { .. }
        )
    }
}

/// Everything that happened during one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Zero-based tick index since process start.
    pub tick: u64,
    pub outcome: TickOutcome,
    /// Samples purged, when the maintenance sweep ran and succeeded.
    pub purged: Option<usize>,
}

/// Whether the daily maintenance sweep is due on tick `tick`.
///
/// True on the first tick and on every tick where the elapsed minutes
/// (`tick × interval`) cross a multiple of one day.
#[must_use]
pub fn maintenance_due(tick: u64, interval_minutes: u64) -> bool {
    if tick == 0 {
        return true;
    }
    let before = (tick - 1).saturating_mul(interval_minutes) / MINUTES_PER_DAY;
    let after = tick.saturating_mul(interval_minutes) / MINUTES_PER_DAY;
    after > before
}

/// The buy-the-dip control loop body.
pub struct DipEngine<S: PriceStore> {
    settings: BotSettings,
    store: Arc<S>,
    gateway: Arc<dyn ExchangeGateway>,
    notifiers: Arc<NotifierRegistry>,
    clock: Arc<dyn Clock>,
    ticks: u64,
}

impl<S: PriceStore> DipEngine<S> {
    pub fn new(
        settings: BotSettings,
        store: Arc<S>,
        gateway: Arc<dyn ExchangeGateway>,
        notifiers: Arc<NotifierRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            settings,
            store,
            gateway,
            notifiers,
            clock,
            ticks: 0,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &BotSettings {
        &self.settings
    }

    /// Number of ticks run so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one full decision cycle followed by maintenance if due.
    pub async fn tick(&mut self) -> TickReport {
        let tick = self.ticks;
        self.ticks += 1;
        let now = self.clock.now();

        let outcome = self.decide(now).await;
        log_outcome(tick, &self.settings, &outcome);

        let purged = if maintenance_due(tick, u64::from(self.settings.tick_interval_minutes)) {
            self.run_maintenance(now).await
        } else {
            None
        };

        TickReport {
            tick,
            outcome,
            purged,
        }
    }

    async fn decide(&self, now: DateTime<Utc>) -> TickOutcome {
        let asset = &self.settings.asset;

        let sample = match self.sample_price(now).await {
            Ok(sample) => sample,
            Err(e) => {
                let reason = e.to_string();
                self.notifiers.notify_all(Event::PriceUnavailable(ErrorEvent {
                    asset: asset.clone(),
                    reason: reason.clone(),
                }));
                return TickOutcome::PriceUnavailable { reason };
            }
        };
        let price = sample.price();

        if let Err(e) = self.store.record(&sample).await {
            warn!(error = %e, price = %price, "Failed to record price sample");
        }

        match self.gateway.has_balance(self.settings.buy_amount).await {
            Ok(true) => {}
            Ok(false) => {
                self.notifiers.notify_all(Event::InsufficientFunds(FundingEvent {
                    asset: asset.clone(),
                    required: self.settings.buy_amount,
                }));
                return TickOutcome::InsufficientFunds;
            }
            Err(e) => {
                let reason = e.to_string();
                self.notifiers.notify_all(Event::BalanceUnavailable(ErrorEvent {
                    asset: asset.clone(),
                    reason: reason.clone(),
                }));
                return TickOutcome::BalanceUnavailable { reason };
            }
        }

        match self
            .store
            .is_cool_down_elapsed(self.settings.cool_down_days, now)
            .await
        {
            Ok(true) => {}
            Ok(false) => return TickOutcome::CoolingDown,
            Err(e) => {
                return TickOutcome::StoreUnavailable {
                    reason: e.to_string(),
                }
            }
        }

        let average = match self
            .store
            .average(self.settings.average_window_days, now)
            .await
        {
            Ok(average) => average,
            Err(Error::Domain(DomainError::InsufficientData)) => {
                return TickOutcome::InsufficientData
            }
            Err(e) => {
                return TickOutcome::StoreUnavailable {
                    reason: e.to_string(),
                }
            }
        };

        let threshold = dip_threshold(average, self.settings.dip_percent);
        debug!(
            average = %average,
            threshold = %threshold,
            dip = %self.settings.dip_percent,
            "Computed dip threshold"
        );

        if !is_dip(price, threshold) {
            return TickOutcome::NoDip {
                price,
                average,
                threshold,
            };
        }

        self.purchase(price, threshold, now).await
    }

    async fn sample_price(&self, now: DateTime<Utc>) -> Result<PriceSample> {
        let asset = &self.settings.asset;
        let quote = self.gateway.current_price(asset).await?;
        Ok(PriceSample::new(asset.clone(), now, quote)?)
    }

    /// Buy, then mark, then notify. The marker is written whatever the
    /// exchange says so at most one attempt happens per cool-down window.
    async fn purchase(&self, price: Price, threshold: Price, now: DateTime<Utc>) -> TickOutcome {
        let asset = &self.settings.asset;
        let amount = self.settings.buy_amount;
        info!(
            asset = %asset,
            price = %price,
            threshold = %threshold,
            amount = %amount,
            "Dip detected, attempting purchase"
        );

        let (outcome, details) = match self.gateway.buy(asset, amount).await {
            Ok(PurchaseOutcome::Filled { order_id, details }) => (
                TickOutcome::Purchased {
                    price,
                    threshold,
                    order_id: order_id.clone(),
                },
                format!("Order {order_id}: {details}"),
            ),
            Ok(PurchaseOutcome::Failed { reason }) => (
                TickOutcome::PurchaseFailed {
                    price,
                    threshold,
                    reason: reason.clone(),
                },
                reason,
            ),
            Err(e) => {
                let reason = e.to_string();
                (
                    TickOutcome::PurchaseFailed {
                        price,
                        threshold,
                        reason: reason.clone(),
                    },
                    reason,
                )
            }
        };

        self.mark_purchase(now).await;

        self.notifiers.notify_all(Event::PurchaseAttempted(PurchaseEvent {
            asset: asset.clone(),
            amount,
            price,
            threshold,
            success: matches!(outcome, TickOutcome::Purchased { .. }),
            details,
        }));

        outcome
    }

    async fn mark_purchase(&self, now: DateTime<Utc>) {
        let attempts = self.settings.marker_write_attempts.max(1);
        for attempt in 1..=attempts {
            match self.store.mark_purchase(now).await {
                Ok(()) => return,
                Err(e) if attempt < attempts => {
                    warn!(
                        error = %e,
                        attempt,
                        attempts,
                        "Failed to write purchase marker, retrying"
                    );
                    tokio::time::sleep(self.settings.marker_retry_backoff).await;
                }
                Err(e) => {
                    error!(
                        error = %e,
                        attempts,
                        "Giving up on purchase marker, next eligible tick may buy again"
                    );
                }
            }
        }
    }

    async fn run_maintenance(&self, now: DateTime<Utc>) -> Option<usize> {
        let horizon = self.settings.purge_horizon_days;
        match self.store.purge(horizon, now).await {
            Ok(purged) => {
                info!(purged, horizon_days = horizon, "Cleaned up old price history");
                Some(purged)
            }
            Err(e) => {
                warn!(error = %e, horizon_days = horizon, "Price history cleanup failed");
                None
            }
        }
    }
}

fn log_outcome(tick: u64, settings: &BotSettings, outcome: &TickOutcome) {
    let asset = settings.asset.as_str();
    let path = outcome.label();
    match outcome {
        TickOutcome::PriceUnavailable { reason }
        | TickOutcome::BalanceUnavailable { reason }
        | TickOutcome::StoreUnavailable { reason } => {
            warn!(tick, asset, path, reason = %reason, "Tick skipped");
        }
        TickOutcome::InsufficientFunds => {
            warn!(
                tick,
                asset,
                path,
                required = %settings.buy_amount,
                "Not enough account balance"
            );
        }
        TickOutcome::CoolingDown => {
            info!(
                tick,
                asset,
                path,
                cool_down_days = settings.cool_down_days,
                "Last purchase within cool-down window, no buys will be attempted"
            );
        }
        TickOutcome::InsufficientData => {
            info!(tick, asset, path, "No price history in averaging window yet");
        }
        TickOutcome::NoDip {
            price,
            average,
            threshold,
        } => {
            info!(
                tick,
                asset,
                path,
                price = %price,
                average = %average,
                threshold = %threshold,
                "Not in a dip"
            );
        }
        TickOutcome::Purchased {
            price,
            threshold,
            order_id,
        } => {
            info!(
                tick,
                asset,
                path,
                price = %price,
                threshold = %threshold,
                order_id = %order_id,
                "Purchase succeeded"
            );
        }
        TickOutcome::PurchaseFailed {
            price,
            threshold,
            reason,
        } => {
            warn!(
                tick,
                asset,
                path,
                price = %price,
                threshold = %threshold,
                reason = %reason,
                "Purchase failed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maintenance_runs_on_first_tick() {
        assert!(maintenance_due(0, 60));
        assert!(maintenance_due(0, 1));
    }

    #[test]
    fn hourly_ticks_run_maintenance_once_a_day() {
        let due: Vec<u64> = (0..100).filter(|t| maintenance_due(*t, 60)).collect();
        assert_eq!(due, vec![0, 24, 48, 72, 96]);
    }

    #[test]
    fn uneven_interval_runs_maintenance_when_day_boundary_crossed() {
        // 7-minute ticks cross 1440 between tick 205 (1435) and 206 (1442).
        assert!(!maintenance_due(205, 7));
        assert!(maintenance_due(206, 7));
        assert!(!maintenance_due(207, 7));
    }

    #[test]
    fn daily_or_longer_interval_runs_every_tick() {
        assert!((0..10).all(|t| maintenance_due(t, 1440)));
        assert!((0..10).all(|t| maintenance_due(t, 2000)));
    }

    #[test]
    fn outcome_labels_and_purchase_flag() {
        assert_eq!(TickOutcome::CoolingDown.label(), "cooling_down");
        assert!(!TickOutcome::InsufficientFunds.attempted_purchase());
        assert!(TickOutcome::PurchaseFailed {
            price: Price::ONE,
            threshold: Price::ONE,
            reason: "x".into(),
        }
        .attempted_purchase());
    }
}

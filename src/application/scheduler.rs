//! Fixed-interval tick driver.
//!
//! Runs [`DipEngine::tick`] forever, sleeping the configured interval between
//! ticks. Ticks never overlap. A shutdown request interrupts the sleep
//! immediately but never a tick in flight, so a purchase and its marker
//! write always complete together.

use std::time::Duration;

use tokio::sync::watch;
use tracing::info;

use super::engine::DipEngine;
use crate::port::PriceStore;

/// Drives a [`DipEngine`] until shutdown.
pub struct Scheduler<S: PriceStore> {
    engine: DipEngine<S>,
    interval: Duration,
}

impl<S: PriceStore> Scheduler<S> {
    /// Schedule `engine` at its configured tick interval.
    pub fn new(engine: DipEngine<S>) -> Self {
        let interval = engine.settings().tick_interval();
        Self { engine, interval }
    }

    /// Override the interval between ticks.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn engine(&self) -> &DipEngine<S> {
        &self.engine
    }

    /// Run ticks until `shutdown` becomes `true` or its sender is dropped.
    ///
    /// Returns the number of ticks completed.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> u64 {
        info!(
            asset = %self.engine.settings().asset,
            interval_secs = self.interval.as_secs(),
            "Scheduler started"
        );

        loop {
            if *shutdown.borrow() {
                info!("Shutdown requested before tick");
                break;
            }

            self.engine.tick().await;

            if wait_or_shutdown(self.interval, &mut shutdown).await {
                break;
            }
        }

        let ticks = self.engine.ticks();
        info!(ticks, "Scheduler stopped");
        ticks
    }
}

/// Sleep for `interval`. Returns `true` if shutdown was requested first.
async fn wait_or_shutdown(interval: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    let sleep = tokio::time::sleep(interval);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            () = &mut sleep => return false,
            result = shutdown.changed() => {
                match result {
                    Ok(()) => {
                        if *shutdown.borrow() {
                            info!("Shutdown signal received");
                            return true;
                        }
                    }
                    Err(_) => {
                        info!("Shutdown channel closed");
                        return true;
                    }
                }
            }
        }
    }
}

//! Bot runtime lifecycle.
//!
//! Wires configuration into a running [`Scheduler`] and blocks until the
//! shutdown channel flips.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use super::config::settings::Config;
use super::factory::exchange::build_gateway;
use super::factory::notifier::build_notifier_registry;
use super::factory::persistence::build_price_store;
use crate::application::{DipEngine, Scheduler};
use crate::error::Result;
use crate::port::{Event, StartedEvent, SystemClock};

/// Run the bot until `shutdown` becomes `true`.
///
/// Returns the number of ticks completed.
///
/// # Errors
///
/// Returns an error if the store or exchange gateway cannot be built.
/// Failures after startup never end the loop.
pub async fn run_with_shutdown(
    config: Config,
    sandbox: bool,
    shutdown: watch::Receiver<bool>,
) -> Result<u64> {
    let settings = config.bot_settings()?;
    info!(
        asset = %settings.asset,
        exchange = %config.exchange.kind,
        sandbox,
        "Starting cryptodip"
    );

    let store = Arc::new(build_price_store(&config, &settings.asset)?);
    info!(database = %config.database, "Database initialized");

    let gateway = build_gateway(&config.exchange, sandbox)?;

    let notifiers = Arc::new(build_notifier_registry(&config));
    info!(notifiers = notifiers.len(), "Notifiers initialized");

    notifiers.notify_all(Event::BotStarted(StartedEvent {
        asset: settings.asset.clone(),
        exchange: gateway.exchange_name().to_string(),
        buy_amount: settings.buy_amount,
        dip_percent: settings.dip_percent.value(),
    }));

    let engine = DipEngine::new(settings, store, gateway, notifiers, Arc::new(SystemClock));
    let ticks = Scheduler::new(engine).run(shutdown).await;

    info!(ticks, "cryptodip stopped");
    Ok(ticks)
}

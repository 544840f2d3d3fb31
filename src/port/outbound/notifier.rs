//! Notifier port for alerting.
//!
//! This module defines the trait for sending alerts about bot events such as
//! purchase attempts, funding shortfalls and exchange errors. Every event
//! renders to a subject line and a body so any alert channel can carry it.

use rust_decimal::Decimal;

use crate::domain::AssetSymbol;

/// Events that can trigger notifications.
#[derive(Debug, Clone)]
pub enum Event {
    /// The bot process started monitoring an asset.
    BotStarted(StartedEvent),
    /// The exchange could not quote a price this tick.
    PriceUnavailable(ErrorEvent),
    /// The exchange could not report the account balance this tick.
    BalanceUnavailable(ErrorEvent),
    /// Available USD does not cover the configured buy amount.
    InsufficientFunds(FundingEvent),
    /// A dip was detected and a purchase was attempted.
    PurchaseAttempted(PurchaseEvent),
}

/// Startup event.
#[derive(Debug, Clone)]
pub struct StartedEvent {
    pub asset: AssetSymbol,
    pub exchange: String,
    pub buy_amount: Decimal,
    pub dip_percent: Decimal,
}

/// Exchange error event.
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub asset: AssetSymbol,
    pub reason: String,
}

/// Funding shortfall event.
#[derive(Debug, Clone)]
pub struct FundingEvent {
    pub asset: AssetSymbol,
    pub required: Decimal,
}

/// Purchase attempt event.
#[derive(Debug, Clone)]
pub struct PurchaseEvent {
    pub asset: AssetSymbol,
    /// USD amount the bot tried to spend.
    pub amount: Decimal,
    /// Price that triggered the purchase.
    pub price: Decimal,
    /// Dip threshold the price was compared against.
    pub threshold: Decimal,
    /// Whether the exchange reported a fill.
    pub success: bool,
    /// Order id or failure reason.
    pub details: String,
}

impl Event {
    /// The asset the event concerns.
    #[must_use]
    pub fn asset(&self) -> &AssetSymbol {
        match self {
            Event::BotStarted(e) => &e.asset,
            Event::PriceUnavailable(e) | Event::BalanceUnavailable(e) => &e.asset,
            Event::InsufficientFunds(e) => &e.asset,
            Event::PurchaseAttempted(e) => &e.asset,
        }
    }

    /// One-line alert subject, e.g. `BTC-Bot Buy Status Alert`.
    #[must_use]
    pub fn subject(&self) -> String {
        let asset = self.asset();
        match self {
            Event::BotStarted(_) => format!("{asset}-Bot has been started"),
            Event::PriceUnavailable(_) => format!("{asset}-Bot Price Error"),
            Event::BalanceUnavailable(_) => format!("{asset}-Bot Balance Error"),
            Event::InsufficientFunds(_) => format!("{asset}-Bot Funding Issue"),
            Event::PurchaseAttempted(_) => format!("{asset}-Bot Buy Status Alert"),
        }
    }

    /// Alert body.
    #[must_use]
    pub fn body(&self) -> String {
        match self {
            Event::BotStarted(e) => format!(
                "Monitoring {} on {} to buy ${} worth when a {}% dip occurs.",
                e.asset, e.exchange, e.buy_amount, e.dip_percent
            ),
            Event::PriceUnavailable(e) => {
                format!("Unable to get the current price of {}: {}", e.asset, e.reason)
            }
            Event::BalanceUnavailable(e) => {
                format!("Unable to check the account balance: {}", e.reason)
            }
            Event::InsufficientFunds(e) => format!(
                "Not enough account balance to buy ${} worth of {}",
                e.required, e.asset
            ),
            Event::PurchaseAttempted(e) => format!(
                "Buy success status is {} for ${} worth of {} at {} (dip threshold {}). {}",
                e.success, e.amount, e.asset, e.price, e.threshold, e.details
            ),
        }
    }
}

/// Trait for notification handlers.
///
/// Notifications are fire-and-forget: `notify` must return quickly, so
/// implementations that do network I/O should hand the event to a
/// background task.
pub trait Notifier: Send + Sync {
    /// Handle an event.
    fn notify(&self, event: Event);
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Notify all registered notifiers.
    pub fn notify_all(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A no-op notifier for testing or when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}

/// A logging notifier that logs events via tracing.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        use tracing::{info, warn};
        match &event {
            Event::BotStarted(_) | Event::PurchaseAttempted(_) => {
                info!(subject = %event.subject(), body = %event.body(), "Alert");
            }
            Event::PriceUnavailable(_)
            | Event::BalanceUnavailable(_)
            | Event::InsufficientFunds(_) => {
                warn!(subject = %event.subject(), body = %event.body(), "Alert");
            }
        }
    }
}

//! Notifier registry factory.
//!
//! Provides factory functions for constructing the notification registry
//! with configured notifiers (logging, Telegram).

use tracing::{info, warn};

use crate::infrastructure::config::settings::Config;
use crate::port::outbound::notifier::{LogNotifier, NotifierRegistry};

#[cfg(feature = "telegram")]
use crate::adapter::outbound::notifier::telegram::{TelegramConfig, TelegramNotifier};

/// Build the notifier registry from configuration.
///
/// Always includes the log notifier. Adds a Telegram notifier when
/// `[telegram] enabled = true` and the bot credentials are in the
/// environment. Must be called from within a Tokio runtime.
#[cfg(feature = "telegram")]
pub fn build_notifier_registry(config: &Config) -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier));

    if config.telegram.enabled {
        if let Some(tg_config) = TelegramConfig::from_env() {
            registry.register(Box::new(TelegramNotifier::new(tg_config)));
            info!("Telegram notifier enabled");
        } else {
            warn!("Telegram enabled but TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID not set");
        }
    }

    registry
}

/// Build the notifier registry from configuration (non-Telegram variant).
///
/// Creates a registry containing only the log notifier when the `telegram`
/// feature is not enabled.
#[cfg(not(feature = "telegram"))]
pub fn build_notifier_registry(config: &Config) -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier));
    if config.telegram.enabled {
        warn!("Telegram enabled in config but the binary was built without the telegram feature");
    } else {
        info!("Log notifier only");
    }
    registry
}

//! Telegram alert delivery.
//!
//! Sends every bot event to one chat as a plain text message.

mod format;

pub mod notifier;

pub use notifier::{TelegramConfig, TelegramNotifier};

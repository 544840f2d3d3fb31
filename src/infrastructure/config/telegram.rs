//! Telegram notification configuration.

use serde::Deserialize;

/// `[telegram]` section.
///
/// The bot token and chat id are secrets and only ever come from
/// `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramAppConfig {
    /// Enable telegram notifications.
    #[serde(default)]
    pub enabled: bool,
}

//! Infrastructure configuration modules.

pub mod bot;
pub mod exchange;
pub mod logging;
pub mod settings;
pub mod telegram;

pub use bot::BotConfig;
pub use exchange::{ExchangeConfig, ExchangeKind};
pub use logging::LoggingConfig;
pub use settings::Config;
pub use telegram::TelegramAppConfig;

//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for exchange credentials.
//!
//! # Example
//!
//! ```no_run
//! use cryptodip::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::bot::BotConfig;
use super::exchange::ExchangeConfig;
use super::logging::LoggingConfig;
use super::telegram::TelegramAppConfig;
use crate::application::BotSettings;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Path to SQLite database file.
    ///
    /// Defaults to "cryptodip.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub database: String,

    /// Dip buying parameters.
    #[serde(default)]
    pub bot: BotConfig,

    /// Exchange selection and credentials.
    #[serde(default)]
    pub exchange: ExchangeConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Telegram notification configuration.
    #[serde(default)]
    pub telegram: TelegramAppConfig,
}

fn default_database_path() -> String {
    "cryptodip.db".to_string()
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Exchange credentials set in the environment replace those in the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.exchange.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        self.bot.to_settings()?;
        self.exchange.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Engine settings derived from the `[bot]` section.
    ///
    /// # Errors
    ///
    /// Returns an error if the `[bot]` section is invalid.
    #[allow(clippy::result_large_err)]
    pub fn bot_settings(&self) -> Result<BotSettings> {
        self.bot.to_settings()
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

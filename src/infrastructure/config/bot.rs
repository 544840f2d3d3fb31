//! `[bot]` section: what to buy, how much, and when.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::settings::{
    BotSettings, DEFAULT_AVERAGE_WINDOW_DAYS, DEFAULT_COOL_DOWN_DAYS,
    DEFAULT_MARKER_WRITE_ATTEMPTS, DEFAULT_PURGE_HORIZON_DAYS, DEFAULT_TICK_INTERVAL_MINUTES,
};
use crate::domain::{AssetSymbol, DipPercent};
use crate::error::{ConfigError, Result};

const fn default_average_period_days() -> u32 {
    DEFAULT_AVERAGE_WINDOW_DAYS
}

const fn default_cool_down_period_days() -> u32 {
    DEFAULT_COOL_DOWN_DAYS
}

const fn default_cycle_interval_minutes() -> u32 {
    DEFAULT_TICK_INTERVAL_MINUTES
}

const fn default_purge_older_than_days() -> u32 {
    DEFAULT_PURGE_HORIZON_DAYS
}

const fn default_marker_write_attempts() -> u32 {
    DEFAULT_MARKER_WRITE_ATTEMPTS
}

/// Dip buying parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Asset ticker, e.g. `BTC`.
    #[serde(default)]
    pub currency: String,
    /// USD spent per purchase.
    #[serde(default)]
    pub buy_amount: Option<Decimal>,
    /// Percentage below the trailing average that counts as a dip.
    #[serde(default)]
    pub dip_percentage: Option<Decimal>,
    #[serde(default = "default_average_period_days")]
    pub average_period_days: u32,
    #[serde(default = "default_cool_down_period_days")]
    pub cool_down_period_days: u32,
    #[serde(default = "default_cycle_interval_minutes")]
    pub cycle_interval_minutes: u32,
    #[serde(default = "default_purge_older_than_days")]
    pub purge_older_than_days: u32,
    #[serde(default = "default_marker_write_attempts")]
    pub marker_write_attempts: u32,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            currency: String::new(),
            buy_amount: None,
            dip_percentage: None,
            average_period_days: default_average_period_days(),
            cool_down_period_days: default_cool_down_period_days(),
            cycle_interval_minutes: default_cycle_interval_minutes(),
            purge_older_than_days: default_purge_older_than_days(),
            marker_write_attempts: default_marker_write_attempts(),
        }
    }
}

fn at_least_one(field: &'static str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be at least 1".to_string(),
        }
        .into());
    }
    Ok(())
}

impl BotConfig {
    /// Validate and convert into engine settings.
    #[allow(clippy::result_large_err)]
    pub fn to_settings(&self) -> Result<BotSettings> {
        if self.currency.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "currency" }.into());
        }
        let asset = AssetSymbol::new(self.currency.as_str()).map_err(|e| {
            ConfigError::InvalidValue {
                field: "currency",
                reason: e.to_string(),
            }
        })?;

        let buy_amount = self
            .buy_amount
            .ok_or(ConfigError::MissingField { field: "buy_amount" })?;
        if buy_amount <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "buy_amount",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        let dip = self.dip_percentage.ok_or(ConfigError::MissingField {
            field: "dip_percentage",
        })?;
        let dip_percent = DipPercent::try_new(dip).map_err(|e| ConfigError::InvalidValue {
            field: "dip_percentage",
            reason: e.to_string(),
        })?;

        at_least_one("average_period_days", self.average_period_days)?;
        at_least_one("cycle_interval_minutes", self.cycle_interval_minutes)?;
        at_least_one("purge_older_than_days", self.purge_older_than_days)?;
        at_least_one("marker_write_attempts", self.marker_write_attempts)?;
        if self.purge_older_than_days < self.average_period_days {
            return Err(ConfigError::InvalidValue {
                field: "purge_older_than_days",
                reason: "must be at least average_period_days".to_string(),
            }
            .into());
        }

        let mut settings = BotSettings::new(asset, buy_amount, dip_percent);
        settings.average_window_days = self.average_period_days;
        settings.cool_down_days = self.cool_down_period_days;
        settings.tick_interval_minutes = self.cycle_interval_minutes;
        settings.purge_horizon_days = self.purge_older_than_days;
        settings.marker_write_attempts = self.marker_write_attempts;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    fn valid() -> BotConfig {
        BotConfig {
            currency: "btc".into(),
            buy_amount: Some(dec!(25)),
            dip_percentage: Some(dec!(10)),
            ..BotConfig::default()
        }
    }

    #[test]
    fn defaults_fill_windows() {
        let settings = valid().to_settings().unwrap();
        assert_eq!(settings.asset.as_str(), "BTC");
        assert_eq!(settings.average_window_days, 7);
        assert_eq!(settings.cool_down_days, 7);
        assert_eq!(settings.tick_interval_minutes, 60);
        assert_eq!(settings.purge_horizon_days, 30);
        assert_eq!(settings.marker_write_attempts, 3);
    }

    #[test]
    fn zero_cool_down_is_allowed() {
        let config = BotConfig {
            cool_down_period_days: 0,
            ..valid()
        };
        assert_eq!(config.to_settings().unwrap().cool_down_days, 0);
    }

    #[test]
    fn missing_currency_is_reported() {
        let config = BotConfig {
            currency: " ".into(),
            ..valid()
        };
        assert!(matches!(
            config.to_settings(),
            Err(Error::Config(ConfigError::MissingField { field: "currency" }))
        ));
    }

    #[test]
    fn dip_out_of_range_is_invalid() {
        for dip in [dec!(0), dec!(-5), dec!(100.01)] {
            let config = BotConfig {
                dip_percentage: Some(dip),
                ..valid()
            };
            assert!(matches!(
                config.to_settings(),
                Err(Error::Config(ConfigError::InvalidValue {
                    field: "dip_percentage",
                    ..
                }))
            ));
        }
    }

    #[test]
    fn zero_interval_is_invalid() {
        let config = BotConfig {
            cycle_interval_minutes: 0,
            ..valid()
        };
        assert!(config.to_settings().is_err());
    }

    #[test]
    fn purge_horizon_must_cover_average_window() {
        let config = BotConfig {
            average_period_days: 14,
            purge_older_than_days: 7,
            ..valid()
        };
        assert!(matches!(
            config.to_settings(),
            Err(Error::Config(ConfigError::InvalidValue {
                field: "purge_older_than_days",
                ..
            }))
        ));
    }
}

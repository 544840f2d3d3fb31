//! `[exchange]` section: which exchange to trade on and its credentials.
//!
//! Credentials may be left out of the file and supplied through
//! `CRYPTODIP_API_KEY`, `CRYPTODIP_API_SECRET` and `CRYPTODIP_API_PASSPHRASE`.
//! Environment values take precedence.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::adapter::outbound::http::HttpSettings;
use crate::error::{ConfigError, Result};

pub const API_KEY_ENV: &str = "CRYPTODIP_API_KEY";
pub const API_SECRET_ENV: &str = "CRYPTODIP_API_SECRET";
pub const API_PASSPHRASE_ENV: &str = "CRYPTODIP_API_PASSPHRASE";

/// Supported exchanges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeKind {
    #[default]
    Gemini,
    Coinbase,
}

impl fmt::Display for ExchangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeKind::Gemini => write!(f, "gemini"),
            ExchangeKind::Coinbase => write!(f, "coinbase"),
        }
    }
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

const fn default_retry_max_attempts() -> u32 {
    3
}

const fn default_retry_backoff_ms() -> u64 {
    500
}

/// Exchange selection, credentials and HTTP policy.
#[derive(Clone, Deserialize)]
pub struct ExchangeConfig {
    #[serde(rename = "type", default)]
    pub kind: ExchangeKind,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_secret: Option<String>,
    /// Coinbase only.
    #[serde(default)]
    pub passphrase: Option<String>,
    /// Overrides the production/sandbox endpoint, e.g. for a local proxy.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            kind: ExchangeKind::default(),
            api_key: None,
            api_secret: None,
            passphrase: None,
            base_url: None,
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl fmt::Debug for ExchangeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("ExchangeConfig")
            .field("kind", &self.kind)
            .field("api_key", &self.api_key)
            .field("api_secret", &redact(&self.api_secret))
            .field("passphrase", &redact(&self.passphrase))
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("retry_max_attempts", &self.retry_max_attempts)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ExchangeConfig {
    /// Replace credentials with any set in the environment.
    pub fn apply_env_overrides(&mut self) {
        let env = |name: &str| non_empty(std::env::var(name).ok());
        if let Some(key) = env(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(secret) = env(API_SECRET_ENV) {
            self.api_secret = Some(secret);
        }
        if let Some(passphrase) = env(API_PASSPHRASE_ENV) {
            self.passphrase = Some(passphrase);
        }
    }

    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if non_empty(self.api_key.clone()).is_none() {
            return Err(ConfigError::MissingField { field: "api_key" }.into());
        }
        if non_empty(self.api_secret.clone()).is_none() {
            return Err(ConfigError::MissingField { field: "api_secret" }.into());
        }
        if self.kind == ExchangeKind::Coinbase && non_empty(self.passphrase.clone()).is_none() {
            return Err(ConfigError::MissingField { field: "passphrase" }.into());
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if let Some(url) = &self.base_url {
            url::Url::parse(url).map_err(|e| ConfigError::InvalidValue {
                field: "base_url",
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    #[must_use]
    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            timeout: Duration::from_millis(self.timeout_ms),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            retry_max_attempts: self.retry_max_attempts.max(1),
            retry_backoff: Duration::from_millis(self.retry_backoff_ms),
        }
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn api_secret(&self) -> &str {
        self.api_secret.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn passphrase(&self) -> &str {
        self.passphrase.as_deref().unwrap_or_default()
    }
}

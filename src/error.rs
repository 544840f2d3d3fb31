use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Exchange gateway errors with structured variants.
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("price for {asset} unavailable: {reason}")]
    PriceUnavailable { asset: String, reason: String },

    #[error("balance unavailable: {0}")]
    BalanceUnavailable(String),

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("order rejected: {0}")]
    OrderRejected(String),

    #[error("unexpected response from {exchange}: {reason}")]
    UnexpectedResponse {
        exchange: &'static str,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Whether the failure is worth retrying on a later tick.
    ///
    /// Network, exchange and storage failures are transient. Configuration
    /// and domain validation failures are not: they will fail the same way
    /// every time.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Exchange(ExchangeError::AuthFailed(_)) => false,
            Error::Exchange(_)
            | Error::Http(_)
            | Error::Io(_)
            | Error::Connection(_)
            | Error::Database(_)
            | Error::Json(_)
            | Error::Parse(_) => true,
            Error::Domain(DomainError::InsufficientData) => true,
            Error::Config(_) | Error::Domain(_) | Error::Url(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

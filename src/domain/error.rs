//! Domain validation errors.
//!
//! These errors are returned when a domain invariant is violated, either by a
//! `try_new`-style constructor or by a calculation that has nothing to work on.
//!
//! # Examples
//!
//! ```
//! use cryptodip::domain::dip::mean_price;
//! use cryptodip::domain::error::DomainError;
//!
//! let result = mean_price(&[]);
//! assert!(matches!(result, Err(DomainError::InsufficientData)));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Prices must be strictly positive.
    #[error("price must be positive, got {price}")]
    NonPositivePrice {
        /// The invalid price that was provided.
        price: rust_decimal::Decimal,
    },

    /// Dip percentage must lie in (0, 100].
    #[error("dip percentage must be in (0, 100], got {percent}")]
    DipPercentOutOfRange {
        /// The invalid percentage that was provided.
        percent: rust_decimal::Decimal,
    },

    /// Asset symbols must be non-empty alphanumeric tickers.
    #[error("invalid asset symbol '{symbol}'")]
    InvalidAssetSymbol {
        /// The rejected symbol.
        symbol: String,
    },

    /// No price samples fall inside the requested window.
    #[error("insufficient price history to compute an average")]
    InsufficientData,
}

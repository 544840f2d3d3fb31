//! Cryptodip - Buy a cryptocurrency when its price dips below a trailing average.
//!
//! The bot polls an exchange once per interval, records the quoted price,
//! and places a fixed-size USD market buy whenever the price falls a set
//! percentage below the mean of the last few days, at most once per
//! cool-down window.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Exchange-agnostic types and dip math, no I/O
//! - [`port`] - Traits the engine depends on: exchange, store, notifier, clock
//! - [`application`] - The decision engine and the tick scheduler
//! - [`adapter`] - Gemini and Coinbase gateways, SQLite and memory stores,
//!   Telegram notifications, and the command line
//! - [`infrastructure`] - Configuration, wiring and the process runtime
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `telegram` (default) - Telegram alert delivery
//! - `testkit` - Test doubles shared with the integration tests
//!
//! # Example
//!
//! ```
//! use cryptodip::domain::{dip_threshold, is_dip, DipPercent};
//! use rust_decimal_macros::dec;
//!
//! let dip = DipPercent::try_new(dec!(10)).unwrap();
//! let threshold = dip_threshold(dec!(100.00), dip);
//! assert_eq!(threshold, dec!(90.00));
//! assert!(is_dip(dec!(90.00), threshold));
//! assert!(!is_dip(dec!(90.01), threshold));
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

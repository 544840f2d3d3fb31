//! Factory modules for building infrastructure components.
//!
//! Provides factory functions that construct fully-configured adapters from
//! application configuration.
//!
//! # Submodules
//!
//! - [`exchange`] - Exchange gateway construction
//! - [`notifier`] - Notification registry construction
//! - [`persistence`] - Database and price store construction

pub mod exchange;
pub mod notifier;
pub mod persistence;

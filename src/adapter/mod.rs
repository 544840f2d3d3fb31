//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - Command-line entry point
//! - [`outbound`] - Exchanges, persistence and notifications

pub mod inbound;
pub mod outbound;

//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the infrastructure the decision engine depends
//! on: an exchange, durable price history, alerting and a clock.

pub mod clock;
pub mod exchange;
pub mod notifier;
pub mod store;

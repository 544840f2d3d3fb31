//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`clock`] - [`ManualClock`](clock::ManualClock), a settable clock.
//! - [`gateway`] - [`ScriptedGateway`](gateway::ScriptedGateway), an
//!   in-process exchange with scripted prices, balance and fills.
//! - [`notifier`] - [`RecordingNotifier`](notifier::RecordingNotifier).
//! - [`store`] - [`FlakyStore`](store::FlakyStore), a memory store with
//!   injectable failures.
//! - [`domain`] - Builders for domain primitives and settings.

pub mod clock;
pub mod domain;
pub mod gateway;
pub mod notifier;
pub mod store;

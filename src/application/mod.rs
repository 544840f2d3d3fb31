//! Application layer: the decision engine and the scheduler that drives it.
//!
//! Depends only on [`crate::domain`] and [`crate::port`]. Concrete stores,
//! exchanges and notifiers are injected by the infrastructure factories.

pub mod engine;
pub mod scheduler;
pub mod settings;

pub use engine::{maintenance_due, DipEngine, TickOutcome, TickReport};
pub use scheduler::Scheduler;
pub use settings::BotSettings;

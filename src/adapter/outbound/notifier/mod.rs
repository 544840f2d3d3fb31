//! Notification adapters.
//!
//! Implements the `port::Notifier` trait for alert backends beyond the
//! built-in log notifier.

#[cfg(feature = "telegram")]
pub mod telegram;

#[cfg(test)]
mod tests;

//! Outbound adapters (driven side).

pub mod coinbase;
pub mod gemini;
pub mod http;
pub mod memory;
pub mod notifier;
pub mod sqlite;

//! SQLite persistence adapter.
//!
//! Price history and purchase markers live in one database file so that a
//! restarted bot resumes with the same averaging and cool-down state.

pub mod database;
pub mod store;

pub use database::connection::{create_pool, run_migrations, DbPool};
pub use store::SqlitePriceStore;

//! Coinbase Exchange adapter.

pub mod auth;
pub mod client;
pub mod dto;

pub use auth::CoinbaseSigner;
pub use client::CoinbaseGateway;

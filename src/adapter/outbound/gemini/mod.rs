//! Gemini exchange adapter.

pub mod auth;
pub mod client;
pub mod dto;

pub use auth::GeminiSigner;
pub use client::GeminiGateway;

//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic: configuration, adapter construction and the process
//! lifecycle.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading and validation
//! - [`factory`] - Component factory functions
//! - [`runtime`] - Runtime wiring and shutdown

pub mod config;
pub mod factory;
pub mod runtime;

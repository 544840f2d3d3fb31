//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems (exchanges, databases, notification services).
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │                         │
//!     ┌──────────────┤  DipEngine + Scheduler  ├──────────────┐
//!     │              │                         │              │
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │Exchange │            │ PriceStore  │              │ Notifier  │
//! │ Gateway │            │   Adapter   │              │  Adapter  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`ExchangeGateway`] - Price, balance and purchase capability
//! - [`PriceStore`] - Price history and purchase marker persistence
//! - [`Notifier`] - Alerts (Telegram, logging, etc.)
//! - [`Clock`] - Current time, injectable for tests

pub mod outbound;

pub use outbound::clock::{Clock, SystemClock};
pub use outbound::exchange::{ExchangeGateway, PurchaseOutcome};
pub use outbound::notifier::{
    ErrorEvent, Event, FundingEvent, LogNotifier, Notifier, NotifierRegistry, NullNotifier,
    PurchaseEvent, StartedEvent,
};
pub use outbound::store::PriceStore;

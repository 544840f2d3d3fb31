//! Exchange-agnostic domain types and dip math.
//!
//! Nothing in here performs I/O. Prices are [`rust_decimal::Decimal`] and
//! timestamps are UTC.

pub mod dip;
pub mod error;
pub mod id;
pub mod money;
pub mod sample;

pub use dip::{
    average_window_start, dip_threshold, is_dip, mean_price, whole_days_between, DipPercent,
};
pub use error::DomainError;
pub use id::{AssetSymbol, OrderId};
pub use money::{round_cents, Price, UsdAmount};
pub use sample::{PriceSample, PurchaseMarker};

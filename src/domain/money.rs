//! Monetary types and cent rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// USD amount represented as a Decimal for precision.
pub type UsdAmount = Decimal;

/// Decimal places kept for every price and average.
pub const CENT_PLACES: u32 = 2;

/// Round a value to cent precision using round-half-to-even.
///
/// Every stored price, average and dip threshold passes through here so the
/// decision path is reproducible across restarts and platforms.
#[must_use]
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn round_cents_uses_bankers_rounding() {
        assert_eq!(round_cents(dec!(1.005)), dec!(1.00));
        assert_eq!(round_cents(dec!(1.015)), dec!(1.02));
        assert_eq!(round_cents(dec!(1.0151)), dec!(1.02));
        assert_eq!(round_cents(dec!(-2.125)), dec!(-2.12));
    }

    #[test]
    fn round_cents_keeps_exact_values() {
        assert_eq!(round_cents(dec!(90)), dec!(90.00));
        assert_eq!(round_cents(dec!(90.01)), dec!(90.01));
    }
}

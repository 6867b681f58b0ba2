//! Shared helpers for valuation arithmetic.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use offer_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(137639.054)), dec!(137639.05));
/// assert_eq!(round_half_up(dec!(175.385)), dec!(175.39));
/// assert_eq!(round_half_up(dec!(-56.985)), dec!(-56.99));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// True when `value` carries no more than two fractional digits.
pub(crate) fn is_cents_precision(value: Decimal) -> bool {
    value.normalize().scale() <= 2
}

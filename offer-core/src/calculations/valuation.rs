//! Lump-sum valuation of a structured settlement payment stream.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Annual value: payment amount × payments per year |
//! | 2    | Annuity factor: (1 − (1 + r)^−n) / r with r = 6%, n = 20 years |
//! | 3    | Present value: Step 1 × Step 2 |
//! | 4    | Quote: Step 3 × 75% purchase factor, rounded half-up to cents |
//! | 5    | Difference: quote − existing offer (rounded) |
//! | 6    | Percentage: Step 5 ÷ existing offer × 100 (rounded) |
//!
//! The rate, horizon and purchase factor are fixed and do not depend on the
//! recipient's actual payment term.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use offer_core::calculations::{compute_difference, compute_quote};
//! use offer_core::PaymentFrequency;
//!
//! let quote = compute_quote(dec!(1000), PaymentFrequency::Monthly).unwrap();
//! assert_eq!(quote, dec!(103229.29));
//!
//! let diff = compute_difference(quote, dec!(50000)).unwrap();
//! assert_eq!(diff.difference, dec!(53229.29));
//! assert_eq!(diff.percentage_difference, dec!(106.46));
//! assert!(diff.is_better_offer);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::{OfferComparisonInput, PaymentFrequency, ValuationResult};

/// Assumed annual discount rate (6%).
pub const DISCOUNT_RATE: Decimal = Decimal::from_parts(6, 0, 0, false, 2);

/// Assumed length of the payment stream in years.
pub const HORIZON_YEARS: u32 = 20;

/// Share of present value paid out as the quote (75%).
pub const PURCHASE_FACTOR: Decimal = Decimal::from_parts(75, 0, 0, false, 2);

/// Errors that can occur while valuing an offer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValuationError {
    #[error("payment amount must be greater than zero, got {0}")]
    NonPositivePaymentAmount(Decimal),

    /// Guards the percentage division.
    #[error("existing offer must be greater than zero, got {0}")]
    NonPositiveExistingOffer(Decimal),

    /// The payment is so small that the quote rounds to zero cents.
    #[error("payment amount {0} is too small to quote")]
    QuoteRoundsToZero(Decimal),

    #[error("valuation overflowed decimal range")]
    Overflow,
}

/// Delta between our quote and a competing offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferDifference {
    pub difference: Decimal,
    pub percentage_difference: Decimal,
    pub is_better_offer: bool,
}

/// Computes our lump-sum quote for a periodic payment stream.
///
/// # Errors
///
/// Returns [`ValuationError::NonPositivePaymentAmount`] when
/// `payment_amount <= 0`, [`ValuationError::QuoteRoundsToZero`] when the
/// rounded quote is not positive, or [`ValuationError::Overflow`] when the
/// amount is too large to value.
pub fn compute_quote(
    payment_amount: Decimal,
    frequency: PaymentFrequency,
) -> Result<Decimal, ValuationError> {
    if payment_amount <= Decimal::ZERO {
        return Err(ValuationError::NonPositivePaymentAmount(payment_amount));
    }

    let annual = annual_value(payment_amount, frequency)?;
    let factor = annuity_factor(DISCOUNT_RATE, HORIZON_YEARS)?;
    let present_value = annual.checked_mul(factor).ok_or(ValuationError::Overflow)?;
    let quote = present_value
        .checked_mul(PURCHASE_FACTOR)
        .ok_or(ValuationError::Overflow)?;

    let quote = round_half_up(quote);
    if quote <= Decimal::ZERO {
        return Err(ValuationError::QuoteRoundsToZero(payment_amount));
    }
    Ok(quote)
}

/// Compares `our_quote` against `existing_offer`.
///
/// The comparison is one-directional: the first argument is always our quote.
///
/// # Errors
///
/// Returns [`ValuationError::NonPositiveExistingOffer`] when
/// `existing_offer <= 0`.
pub fn compute_difference(
    our_quote: Decimal,
    existing_offer: Decimal,
) -> Result<OfferDifference, ValuationError> {
    if existing_offer <= Decimal::ZERO {
        return Err(ValuationError::NonPositiveExistingOffer(existing_offer));
    }

    let difference = round_half_up(
        our_quote
            .checked_sub(existing_offer)
            .ok_or(ValuationError::Overflow)?,
    );
    let ratio = difference
        .checked_div(existing_offer)
        .ok_or(ValuationError::Overflow)?;
    let percentage_difference = round_half_up(
        ratio
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or(ValuationError::Overflow)?,
    );

    Ok(OfferDifference {
        difference,
        percentage_difference,
        is_better_offer: difference > Decimal::ZERO,
    })
}

/// Values a validated comparison input end to end.
pub fn value_offer(input: &OfferComparisonInput) -> Result<ValuationResult, ValuationError> {
    let quote = compute_quote(input.payment_amount, input.payment_frequency)?;
    let diff = compute_difference(quote, input.existing_offer_amount)?;

    debug!(
        %quote,
        existing = %input.existing_offer_amount,
        difference = %diff.difference,
        "valued offer"
    );

    Ok(ValuationResult {
        calculated_offer_amount: quote,
        difference: diff.difference,
        percentage_difference: diff.percentage_difference,
        is_better_offer: diff.is_better_offer,
    })
}

fn annual_value(
    payment_amount: Decimal,
    frequency: PaymentFrequency,
) -> Result<Decimal, ValuationError> {
    payment_amount
        .checked_mul(Decimal::from(frequency.payments_per_year()))
        .ok_or(ValuationError::Overflow)
}

/// (1 + rate)^years by repeated multiplication.
fn compound_growth(
    rate: Decimal,
    years: u32,
) -> Result<Decimal, ValuationError> {
    let base = Decimal::ONE + rate;
    (0..years).try_fold(Decimal::ONE, |acc, _| {
        acc.checked_mul(base).ok_or(ValuationError::Overflow)
    })
}

/// Present value of 1 paid at the end of each year for `years` years.
fn annuity_factor(
    rate: Decimal,
    years: u32,
) -> Result<Decimal, ValuationError> {
    let growth = compound_growth(rate, years)?;
    let discount = Decimal::ONE
        .checked_div(growth)
        .ok_or(ValuationError::Overflow)?;
    (Decimal::ONE - discount)
        .checked_div(rate)
        .ok_or(ValuationError::Overflow)
}

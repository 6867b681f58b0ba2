//! Offer valuation calculations.
//!
//! Converts a periodic payment stream into a single lump-sum quote and
//! measures that quote against a competing offer.

pub mod common;
pub mod valuation;

pub use valuation::{
    DISCOUNT_RATE, HORIZON_YEARS, OfferDifference, PURCHASE_FACTOR, ValuationError,
    compute_difference, compute_quote, value_offer,
};

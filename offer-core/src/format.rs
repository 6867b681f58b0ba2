//! Display helpers for quotes and comparisons.
//!
//! These only produce strings; callers keep working with the unrounded
//! [`Decimal`] values.

use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;

/// Formats a value as US dollars with thousands separators and cents.
///
/// ```
/// use rust_decimal_macros::dec;
/// use offer_core::format::format_currency;
///
/// assert_eq!(format_currency(dec!(103229.29)), "$103,229.29");
/// assert_eq!(format_currency(dec!(-5698.78)), "-$5,698.78");
/// ```
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Formats a percentage with an explicit sign and two decimals.
///
/// ```
/// use rust_decimal_macros::dec;
/// use offer_core::format::format_percentage;
///
/// assert_eq!(format_percentage(dec!(175.39)), "+175.39%");
/// assert_eq!(format_percentage(dec!(-56.99)), "-56.99%");
/// ```
pub fn format_percentage(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        "+"
    };
    format!("{sign}{:.2}%", rounded.abs())
}

fn group_thousands(whole: &str) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

//! Common numeric helpers for tip calculations.
//!
//! This module provides the lenient parsing and rounding primitives shared by
//! the tip calculator and the currency formatters.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to `dp` places using banker's rounding.
///
/// Values exactly at the midpoint are rounded to the nearest even digit,
/// matching the convention of platform currency formatters.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tip_core::calculations::common::round_half_even;
///
/// assert_eq!(round_half_even(dec!(2.345), 2), dec!(2.34));
/// assert_eq!(round_half_even(dec!(2.355), 2), dec!(2.36));
/// assert_eq!(round_half_even(dec!(1234.5), 0), dec!(1234));
/// ```
pub fn round_half_even(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven)
}

/// Returns `value`, or zero when `value` is negative.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use tip_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(12.50)), dec!(12.50));
/// assert_eq!(non_negative(dec!(-3)), Decimal::ZERO);
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    if value < Decimal::ZERO { Decimal::ZERO } else { value }
}

/// Parses user-typed text into a [`Decimal`], returning `None` on failure.
///
/// Surrounding whitespace is ignored. Plain literals (`"12.5"`, `"-3"`,
/// `".75"`) and scientific literals (`"1e2"`) are accepted. Text that is
/// empty, malformed, non-finite (`"NaN"`, `"Infinity"`), written with digit
/// separators (`"1_000"`) or outside the representable range yields `None`.
pub fn parse_lenient(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if !is_numeric_literal(trimmed) {
        return None;
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Checks that `text` has the shape `[+-]digits[.digits][(e|E)[+-]digits]`,
/// with at least one digit in the mantissa.
///
/// `Decimal::from_str` on its own also takes `_` between digits.
fn is_numeric_literal(text: &str) -> bool {
    fn skip_sign(s: &str) -> &str {
        s.strip_prefix(['+', '-']).unwrap_or(s)
    }

    fn all_digits(s: &str) -> bool {
        s.bytes().all(|b| b.is_ascii_digit())
    }

    let (mantissa, exponent) = match text.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (text, None),
    };

    let (integer, fraction) = match skip_sign(mantissa).split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (skip_sign(mantissa), ""),
    };
    let mantissa_ok =
        !(integer.is_empty() && fraction.is_empty()) && all_digits(integer) && all_digits(fraction);

    let exponent_ok = exponent.is_none_or(|exponent| {
        let digits = skip_sign(exponent);
        !digits.is_empty() && all_digits(digits)
    });

    mantissa_ok && exponent_ok
}

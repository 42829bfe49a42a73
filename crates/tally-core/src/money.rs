//! Number formatting for amounts and percentages shown in tip messages.
//!
//! Computation elsewhere is done on `Decimal` values; these helpers only
//! decide how a finished value reads in English text.

use rust_decimal::{Decimal, RoundingStrategy};

/// Fraction digits kept when an amount is shown in text
const AMOUNT_FRACTION_DIGITS: u32 = 3;

/// Formats an amount with thousands separators, rounded half away from zero
/// to at most three fraction digits, without trailing fractional zeros.
///
/// ```
/// # use tally_core::money::format_amount;
/// # use rust_decimal::Decimal;
/// assert_eq!(format_amount(Decimal::from(1200)), "1,200");
/// assert_eq!(format_amount(Decimal::new(12345, 1)), "1,234.5");
/// assert_eq!(format_amount(Decimal::new(200002, 3)), "200.002");
/// ```
pub fn format_amount(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(AMOUNT_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().to_string();

    match digits.split_once('.') {
        Some((whole, fraction)) => format!("{sign}{}.{fraction}", group_digits(whole)),
        None => format!("{sign}{}", group_digits(&digits)),
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a percentage with exactly one decimal, rounding half away from zero.
pub fn format_percent(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}", rounded)
}

/// Formats a threshold-style number without insignificant zeros (`20.0` -> `20`).
pub fn format_plain(value: Decimal) -> String {
    value.normalize().to_string()
}

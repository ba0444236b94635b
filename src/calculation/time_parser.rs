//! Time string handling for the extended policy.
//!
//! Overtime and deduction fields are typed as free digit strings and shown
//! as `HH:MM`. This module normalizes keystrokes into that shape and turns
//! the resulting strings into minute counts.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Largest minute value accepted by [`format_time_input`].
pub const MAX_MINUTE: u32 = 59;

/// Minutes in one hour.
pub const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Normalizes raw keystrokes into an `HH:M` display string.
///
/// Every non-digit is dropped. Up to two digits are returned as they are,
/// since the user is still typing the hours. From the third digit on, the
/// first two digits become the hours and the next (at most two) digits the
/// minutes, clamped to 59. Digits past the fourth are ignored.
///
/// The minute part is emitted as a plain number, so `"1205"` becomes
/// `"12:5"`. Callers that need a fixed-width display must pad it themselves.
///
/// # Examples
///
/// ```
/// use salary_calculator::calculation::format_time_input;
///
/// assert_eq!(format_time_input("1"), "1");
/// assert_eq!(format_time_input("12"), "12");
/// assert_eq!(format_time_input("1230"), "12:30");
/// assert_eq!(format_time_input("1299"), "12:59");
/// assert_eq!(format_time_input("12:3"), "12:3");
/// ```
pub fn format_time_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if digits.len() <= 2 {
        return digits;
    }

    let hours = &digits[..2];
    let minutes = digits[2..digits.len().min(4)]
        .parse::<u32>()
        .unwrap_or(0)
        .min(MAX_MINUTE);

    format!("{hours}:{minutes}")
}

/// Converts an `HH:MM` string into a total number of minutes.
///
/// Returns zero for `None` or an empty string. Each side of the colon
/// defaults to zero when it is missing or not a plain decimal number. No
/// upper bound is applied, so `"99:99"` yields 5940. A value too large to
/// represent also degrades to zero.
///
/// # Examples
///
/// ```
/// use salary_calculator::calculation::parse_time_to_minutes;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_time_to_minutes(Some("02:30")), Decimal::from(150));
/// assert_eq!(parse_time_to_minutes(Some("")), Decimal::ZERO);
/// assert_eq!(parse_time_to_minutes(None), Decimal::ZERO);
/// ```
pub fn parse_time_to_minutes(value: Option<&str>) -> Decimal {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return Decimal::ZERO;
    };

    let mut parts = value.split(':');
    let hours = parts.next().map_or(Decimal::ZERO, parse_component);
    let minutes = parts.next().map_or(Decimal::ZERO, parse_component);

    hours
        .checked_mul(MINUTES_PER_HOUR)
        .and_then(|h| h.checked_add(minutes))
        .unwrap_or(Decimal::ZERO)
}

/// Parses one side of a time string as a plain decimal number; exponent and
/// hex forms such as `"1e2"` or `"0x10"` count as non-numeric and yield zero.
fn parse_component(part: &str) -> Decimal {
    let part = part.trim();
    if part.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(part).unwrap_or(Decimal::ZERO)
}

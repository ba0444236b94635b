//! Rate derivation over a standard work month.
//!
//! Both policies spread a monthly amount across a 30-day month of 8-hour
//! days to get hourly and per-minute rates. The helpers here multiply
//! before dividing, so results that terminate in decimal stay exact. A
//! product too large for [`Decimal`] yields zero.

use rust_decimal::Decimal;

use super::rounding::round2;
use super::time_parser::MINUTES_PER_HOUR;

/// Days in the standard work month.
pub const DAYS_PER_MONTH: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Working hours in one day.
pub const HOURS_PER_DAY: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Multiplier for single-rate overtime (150%).
pub const SINGLE_OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Multiplier for double-rate overtime (200%).
pub const DOUBLE_OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Returns `monthly / 30 / 8 * hours * multiplier`, unrounded.
///
/// # Examples
///
/// ```
/// use salary_calculator::calculation::{hourly_amount, SINGLE_OVERTIME_MULTIPLIER};
/// use rust_decimal::Decimal;
///
/// let amount = hourly_amount(Decimal::from(6500), Decimal::from(10), SINGLE_OVERTIME_MULTIPLIER);
/// assert_eq!(amount, Decimal::new(40625, 2));
/// ```
pub fn hourly_amount(monthly: Decimal, hours: Decimal, multiplier: Decimal) -> Decimal {
    monthly
        .checked_mul(hours)
        .and_then(|v| v.checked_mul(multiplier))
        .and_then(|v| v.checked_div(DAYS_PER_MONTH))
        .and_then(|v| v.checked_div(HOURS_PER_DAY))
        .unwrap_or(Decimal::ZERO)
}

/// Returns `monthly / 30 / 8 / 60 * minutes * multiplier`, unrounded.
pub fn per_minute_amount(monthly: Decimal, minutes: Decimal, multiplier: Decimal) -> Decimal {
    let hourly = hourly_amount(monthly, minutes, multiplier);
    hourly / MINUTES_PER_HOUR
}

/// Calculates the time-based deduction for missed minutes.
///
/// The per-minute rate is derived from the total salary in both policies.
///
/// # Examples
///
/// ```
/// use salary_calculator::calculation::calculate_time_deduction;
/// use rust_decimal::Decimal;
///
/// // 10000 / 14400 per minute, 30 minutes
/// let deduction = calculate_time_deduction(Decimal::from(10000), Decimal::from(30));
/// assert_eq!(deduction, Decimal::new(2083, 2));
/// ```
pub fn calculate_time_deduction(total_salary: Decimal, minutes: Decimal) -> Decimal {
    round2(per_minute_amount(total_salary, minutes, Decimal::ONE))
}

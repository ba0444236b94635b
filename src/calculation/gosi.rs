//! Social insurance (GOSI) deduction.

use rust_decimal::Decimal;

use super::rounding::{ZERO_AMOUNT, checked_round2};

/// The insurance contribution rate applied on top of the factor (6%).
pub const GOSI_RATE: Decimal = Decimal::from_parts(6, 0, 0, false, 2);

/// The insurance multiplier used by the simple policy.
pub const FIXED_GOSI_FACTOR: Decimal = Decimal::from_parts(106, 0, 0, false, 0);

/// Calculates the insurance deduction.
///
/// Computes `round2(total_salary * factor * 0.06 / transform_amount)`.
/// A zero `transform_amount` or a zero `factor` disables the deduction and
/// yields zero instead of dividing. So does a deduction too large to
/// represent, as a tiny transform amount produces; see [`checked_gosi`].
///
/// # Examples
///
/// ```
/// use salary_calculator::calculation::{calculate_gosi, FIXED_GOSI_FACTOR};
/// use rust_decimal::Decimal;
///
/// let gosi = calculate_gosi(Decimal::from(10000), FIXED_GOSI_FACTOR, Decimal::from(425));
/// assert_eq!(gosi, Decimal::new(14965, 2));
///
/// let disabled = calculate_gosi(Decimal::from(10000), FIXED_GOSI_FACTOR, Decimal::ZERO);
/// assert_eq!(disabled, Decimal::ZERO);
/// ```
pub fn calculate_gosi(total_salary: Decimal, factor: Decimal, transform_amount: Decimal) -> Decimal {
    checked_gosi(total_salary, factor, transform_amount).unwrap_or(ZERO_AMOUNT)
}

/// Calculates the insurance deduction, returning `None` when it overflows.
///
/// A disabled deduction (zero transform amount or factor) is `Some(0.00)`.
///
/// # Examples
///
/// ```
/// use salary_calculator::calculation::{checked_gosi, FIXED_GOSI_FACTOR};
/// use rust_decimal::Decimal;
///
/// let tiny = Decimal::new(1, 28);
/// assert_eq!(checked_gosi(Decimal::from(10000), FIXED_GOSI_FACTOR, tiny), None);
/// ```
pub fn checked_gosi(
    total_salary: Decimal,
    factor: Decimal,
    transform_amount: Decimal,
) -> Option<Decimal> {
    if transform_amount.is_zero() || factor.is_zero() {
        return Some(ZERO_AMOUNT);
    }
    total_salary
        .checked_mul(factor)?
        .checked_mul(GOSI_RATE)?
        .checked_div(transform_amount)
        .and_then(checked_round2)
}

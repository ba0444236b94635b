//! The numeric input record consumed by the formula engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest magnitude accepted for any numeric field.
///
/// Larger values are treated like unparsable input and become zero, which
/// keeps every formula product inside the range of [`Decimal`].
pub const MAX_FIELD_VALUE: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// The values a single calculation runs on.
///
/// A fresh input is built for every change of the form and discarded after
/// the calculation. Overtime quantities are measured in hours under the
/// simple policy and in minutes under the extended policy. The
/// `gosi_factor` and `transportation_allowance` fields are only read by the
/// extended policy.
///
/// # Example
///
/// ```
/// use salary_calculator::models::CalculationInput;
/// use rust_decimal::Decimal;
///
/// let input = CalculationInput {
///     total_salary: Decimal::from(10000),
///     transform_amount: Decimal::from(425),
///     overtime_single: Decimal::from(10),
///     ..CalculationInput::default()
/// };
/// assert_eq!(input.deduction_minutes, Decimal::ZERO);
/// assert!(!input.transportation_allowance);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// The gross monthly salary.
    pub total_salary: Decimal,
    /// Divisor applied to the insurance deduction. Zero disables the deduction.
    pub transform_amount: Decimal,
    /// Overtime paid at 1.5 times the derived rate.
    pub overtime_single: Decimal,
    /// Overtime paid at 2 times the derived rate.
    pub overtime_double: Decimal,
    /// Minutes to deduct from the salary.
    pub deduction_minutes: Decimal,
    /// Insurance multiplier supplied by the caller (extended policy only).
    #[serde(default)]
    pub gosi_factor: Decimal,
    /// Whether the fixed transportation allowance is paid (extended policy only).
    #[serde(default)]
    pub transportation_allowance: bool,
}

impl CalculationInput {
    /// Returns a copy with every out-of-range numeric field replaced by zero.
    ///
    /// A field is out of range when its magnitude exceeds [`MAX_FIELD_VALUE`].
    pub fn bounded(&self) -> Self {
        Self {
            total_salary: bound(self.total_salary),
            transform_amount: bound(self.transform_amount),
            overtime_single: bound(self.overtime_single),
            overtime_double: bound(self.overtime_double),
            deduction_minutes: bound(self.deduction_minutes),
            gosi_factor: bound(self.gosi_factor),
            transportation_allowance: self.transportation_allowance,
        }
    }
}

/// Zeroes a value whose magnitude exceeds [`MAX_FIELD_VALUE`].
pub(crate) fn bound(value: Decimal) -> Decimal {
    if value.abs() > MAX_FIELD_VALUE {
        Decimal::ZERO
    } else {
        value
    }
}

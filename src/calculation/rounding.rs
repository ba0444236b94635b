//! Two-decimal rounding shared by both calculation policies.

use rust_decimal::Decimal;

/// Tiny offset added before rounding.
///
/// Quotients such as `x / 1.35` do not terminate and are truncated at
/// 28 significant digits, so a value sitting exactly on a half-cent can come
/// out a hair below it. The offset lifts it back onto the midpoint.
pub const ROUNDING_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 20);

/// Zero with a scale of 2, returned wherever an amount degrades to nothing.
pub const ZERO_AMOUNT: Decimal = Decimal::from_parts(0, 0, 0, false, 2);

const HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);
const HALF: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Rounds a monetary amount to two decimal places.
///
/// Midpoints round towards positive infinity (`floor(v + 0.5)`), so `2.345`
/// becomes `2.35` and `-2.345` becomes `-2.34`. The result always carries a
/// scale of 2, which keeps serialized amounts in a fixed `"0.00"` shape.
/// A value too large to shift by two places yields [`ZERO_AMOUNT`].
///
/// # Examples
///
/// ```
/// use salary_calculator::calculation::round2;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rounded = round2(Decimal::from_str("149.6470588").unwrap());
/// assert_eq!(rounded.to_string(), "149.65");
///
/// let whole = round2(Decimal::from(6500));
/// assert_eq!(whole.to_string(), "6500.00");
/// ```
pub fn round2(value: Decimal) -> Decimal {
    checked_round2(value).unwrap_or(ZERO_AMOUNT)
}

/// Rounds like [`round2`], returning `None` when the value is too large to
/// shift by two places.
///
/// # Examples
///
/// ```
/// use salary_calculator::calculation::checked_round2;
/// use rust_decimal::Decimal;
///
/// assert_eq!(checked_round2(Decimal::new(14965, 2)), Some(Decimal::new(14965, 2)));
/// assert_eq!(checked_round2(Decimal::MAX), None);
/// ```
pub fn checked_round2(value: Decimal) -> Option<Decimal> {
    let shifted = value
        .checked_add(ROUNDING_EPSILON)?
        .checked_mul(HUNDRED)?
        .checked_add(HALF)?;
    let mut rounded = shifted.floor().checked_div(HUNDRED)?;
    rounded.rescale(2);
    Some(rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_rounds_down_below_midpoint() {
        assert_eq!(round2(dec("2592.5935")), dec("2592.59"));
    }

    #[test]
    fn test_rounds_up_at_midpoint() {
        assert_eq!(round2(dec("1.005")), dec("1.01"));
        assert_eq!(round2(dec("2.345")), dec("2.35"));
    }

    #[test]
    fn test_negative_midpoint_rounds_towards_positive_infinity() {
        assert_eq!(round2(dec("-2.345")), dec("-2.34"));
        assert_eq!(round2(dec("-2.346")), dec("-2.35"));
    }

    #[test]
    fn test_result_always_has_two_decimal_places() {
        assert_eq!(round2(Decimal::ZERO).to_string(), "0.00");
        assert_eq!(round2(dec("6500")).to_string(), "6500.00");
        assert_eq!(round2(dec("46.2963125")).to_string(), "46.30");
    }

    #[test]
    fn test_value_just_below_midpoint_is_lifted() {
        let value = dec("0.0149999999999999999999");
        assert_eq!(round2(value), dec("0.02"));
    }

    #[test]
    fn test_value_too_large_to_shift_degrades_to_zero() {
        let huge = dec("1000000000000000000000000000");
        assert_eq!(checked_round2(huge), None);
        assert_eq!(round2(huge).to_string(), "0.00");
        assert_eq!(round2(Decimal::MIN), ZERO_AMOUNT);
    }

    #[test]
    fn test_largest_shiftable_value_still_rounds() {
        let value = dec("100000000000000000000000.005");
        assert_eq!(
            checked_round2(value),
            Some(dec("100000000000000000000000.01"))
        );
    }

    #[test]
    fn test_non_terminating_division() {
        assert_eq!(round2(dec("10000") / dec("1.35")), dec("7407.41"));
    }
}

//! Raw form records and their coercion into calculation input.
//!
//! Form fields arrive as text exactly as typed. Numeric fields keep only
//! digits and `.`; an empty field takes a fallback and anything that still
//! fails to parse becomes zero. Time fields of the extended form go through
//! [`parse_time_to_minutes`] instead.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::calculation::parse_time_to_minutes;
use crate::config::{ExtendedDefaults, SimpleDefaults};

use super::calculation_input::{CalculationInput, bound};

/// Transform amount used when the field is present but empty.
pub const EMPTY_TRANSFORM_FALLBACK: Decimal = Decimal::ONE;

/// Coerces a numeric form field into a number.
///
/// Every character other than an ASCII digit or `.` is removed. An empty
/// remainder (including a missing field) yields `empty_default`. A
/// remainder that does not parse, such as `"1.2.3"`, or whose magnitude
/// exceeds [`MAX_FIELD_VALUE`](super::MAX_FIELD_VALUE) yields zero.
///
/// # Examples
///
/// ```
/// use salary_calculator::models::coerce_field;
/// use rust_decimal::Decimal;
///
/// assert_eq!(coerce_field(Some("10,000 SAR"), Decimal::ZERO), Decimal::from(10000));
/// assert_eq!(coerce_field(Some(""), Decimal::ONE), Decimal::ONE);
/// assert_eq!(coerce_field(None, Decimal::ZERO), Decimal::ZERO);
/// assert_eq!(coerce_field(Some("1.2.3"), Decimal::ONE), Decimal::ZERO);
/// ```
pub fn coerce_field(raw: Option<&str>, empty_default: Decimal) -> Decimal {
    let numeric: String = raw
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if numeric.is_empty() {
        return empty_default;
    }

    Decimal::from_str(&numeric)
        .map(bound)
        .unwrap_or(Decimal::ZERO)
}

/// Field values of the simple calculator form.
///
/// A field that is absent takes its configured default; a field that is
/// present but empty follows [`coerce_field`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleForm {
    /// The total salary.
    #[serde(default, deserialize_with = "text_or_number")]
    pub total_salary: Option<String>,
    /// The transform amount.
    #[serde(default, deserialize_with = "text_or_number")]
    pub transform_amount: Option<String>,
    /// Overtime hours at 150%, as a decimal number.
    #[serde(default, deserialize_with = "text_or_number")]
    pub overtime_hours: Option<String>,
    /// Overtime hours at 200%, as a decimal number.
    #[serde(default, deserialize_with = "text_or_number")]
    pub overtime_hours_double: Option<String>,
    /// Minutes to deduct.
    #[serde(default, deserialize_with = "text_or_number")]
    pub deductions_minutes: Option<String>,
}

impl SimpleForm {
    /// Builds the calculation input for the simple policy.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_calculator::config::FormDefaults;
    /// use salary_calculator::models::SimpleForm;
    /// use rust_decimal::Decimal;
    ///
    /// let form = SimpleForm {
    ///     total_salary: Some("10000".to_string()),
    ///     overtime_hours: Some("10".to_string()),
    ///     ..SimpleForm::default()
    /// };
    /// let input = form.to_input(&FormDefaults::default().simple);
    /// assert_eq!(input.transform_amount, Decimal::from(425));
    /// assert_eq!(input.overtime_single, Decimal::from(10));
    /// ```
    pub fn to_input(&self, defaults: &SimpleDefaults) -> CalculationInput {
        CalculationInput {
            total_salary: coerce_field(self.total_salary.as_deref(), Decimal::ZERO),
            transform_amount: transform_amount(
                self.transform_amount.as_deref(),
                defaults.transform_amount,
            ),
            overtime_single: coerce_field(self.overtime_hours.as_deref(), Decimal::ZERO),
            overtime_double: coerce_field(self.overtime_hours_double.as_deref(), Decimal::ZERO),
            deduction_minutes: coerce_field(self.deductions_minutes.as_deref(), Decimal::ZERO),
            gosi_factor: Decimal::ZERO,
            transportation_allowance: false,
        }
    }
}

/// Field values of the extended calculator form.
///
/// Overtime and deductions are `HH:MM` time strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedForm {
    /// The total salary.
    #[serde(default, deserialize_with = "text_or_number")]
    pub total_salary: Option<String>,
    /// The transform amount.
    #[serde(default, deserialize_with = "text_or_number")]
    pub transform_amount: Option<String>,
    /// The insurance multiplier.
    #[serde(default, deserialize_with = "text_or_number")]
    pub gosi_factor: Option<String>,
    /// Overtime at 150%, as `HH:MM`.
    #[serde(default, deserialize_with = "text_or_number")]
    pub overtime_hours: Option<String>,
    /// Overtime at 200%, as `HH:MM`.
    #[serde(default, deserialize_with = "text_or_number")]
    pub overtime_hours_double: Option<String>,
    /// Time to deduct, as `HH:MM`.
    #[serde(default, deserialize_with = "text_or_number")]
    pub deductions: Option<String>,
    /// Whether the transportation allowance applies.
    #[serde(default)]
    pub transportation_allowance: Option<bool>,
}

impl ExtendedForm {
    /// Builds the calculation input for the extended policy.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_calculator::config::FormDefaults;
    /// use salary_calculator::models::ExtendedForm;
    /// use rust_decimal::Decimal;
    ///
    /// let form = ExtendedForm {
    ///     total_salary: Some("10000".to_string()),
    ///     overtime_hours: Some("01:30".to_string()),
    ///     ..ExtendedForm::default()
    /// };
    /// let input = form.to_input(&FormDefaults::default().extended);
    /// assert_eq!(input.overtime_single, Decimal::from(90));
    /// assert_eq!(input.gosi_factor, Decimal::from(106));
    /// ```
    pub fn to_input(&self, defaults: &ExtendedDefaults) -> CalculationInput {
        let gosi_factor = match self.gosi_factor.as_deref() {
            None => defaults.gosi_factor,
            Some(raw) => coerce_field(Some(raw), Decimal::ZERO),
        };

        CalculationInput {
            total_salary: coerce_field(self.total_salary.as_deref(), Decimal::ZERO),
            transform_amount: transform_amount(
                self.transform_amount.as_deref(),
                defaults.transform_amount,
            ),
            overtime_single: parse_time_to_minutes(self.overtime_hours.as_deref()),
            overtime_double: parse_time_to_minutes(self.overtime_hours_double.as_deref()),
            deduction_minutes: parse_time_to_minutes(self.deductions.as_deref()),
            gosi_factor,
            transportation_allowance: self
                .transportation_allowance
                .unwrap_or(defaults.transportation_allowance),
        }
    }
}

fn transform_amount(raw: Option<&str>, configured: Decimal) -> Decimal {
    match raw {
        None => configured,
        Some(raw) => coerce_field(Some(raw), EMPTY_TRANSFORM_FALLBACK),
    }
}

/// Accepts a JSON string or number for a text field.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(number_text(&n))),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number, found {}",
            other
        ))),
    }
}

/// Writes a JSON number in plain decimal notation.
///
/// Floats such as `1e20` print with an exponent, which [`coerce_field`]
/// would strip down to unrelated digits. Numbers that cannot be represented
/// or exceed [`MAX_FIELD_VALUE`](super::MAX_FIELD_VALUE) become `"0"`.
fn number_text(number: &serde_json::Number) -> String {
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map(|value| bound(value).normalize().to_string())
        .unwrap_or_else(|_| Decimal::ZERO.to_string())
}

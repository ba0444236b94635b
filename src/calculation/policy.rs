//! Calculation policy selection.
//!
//! The simple and extended calculators share rounding, rate derivation and
//! the insurance formula but differ in their constants and in how net
//! salary is assembled. [`CalculationPolicy`] names the two and dispatches
//! to the matching formula set.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditTrace, AuditWarning, CalculationInput, CalculationResult};

use super::extended::{calculate_extended, trace_extended};
use super::gosi::{FIXED_GOSI_FACTOR, checked_gosi};
use super::simple::{calculate_simple, trace_simple};

/// The formula set a calculation runs with.
///
/// # Example
///
/// ```
/// use salary_calculator::calculation::CalculationPolicy;
/// use std::str::FromStr;
///
/// let policy = CalculationPolicy::from_str("extended").unwrap();
/// assert_eq!(policy, CalculationPolicy::Extended);
/// assert_eq!(policy.to_string(), "extended");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationPolicy {
    /// 65% base salary, overtime in hours, fixed insurance multiplier,
    /// net salary from the total salary.
    Simple,
    /// Base salary recovered with a 1.35 divisor, allowances, overtime and
    /// deductions in minutes, caller-supplied insurance multiplier, net
    /// salary from base salary plus allowances.
    Extended,
}

impl CalculationPolicy {
    /// All policies, in display order.
    pub const ALL: [CalculationPolicy; 2] = [CalculationPolicy::Simple, CalculationPolicy::Extended];

    /// Returns the policy's identifier.
    pub fn name(&self) -> &'static str {
        match self {
            CalculationPolicy::Simple => "simple",
            CalculationPolicy::Extended => "extended",
        }
    }

    /// Returns true if overtime quantities are read as minutes rather than hours.
    pub fn overtime_in_minutes(&self) -> bool {
        matches!(self, CalculationPolicy::Extended)
    }

    /// Calculates the salary breakdown for an input.
    ///
    /// Out-of-range fields are zeroed first (see
    /// [`CalculationInput::bounded`]) and a deduction too large to represent
    /// degrades to zero, so this never panics and never fails.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_calculator::calculation::CalculationPolicy;
    /// use salary_calculator::models::CalculationInput;
    /// use rust_decimal::Decimal;
    ///
    /// let input = CalculationInput {
    ///     total_salary: Decimal::from(10000),
    ///     ..CalculationInput::default()
    /// };
    /// let result = CalculationPolicy::Simple.calculate(&input);
    /// assert_eq!(result.base_salary, Decimal::from(6500));
    /// assert_eq!(result.gosi_deduction, Decimal::ZERO);
    /// ```
    pub fn calculate(&self, input: &CalculationInput) -> CalculationResult {
        let result = match self {
            CalculationPolicy::Simple => calculate_simple(input),
            CalculationPolicy::Extended => calculate_extended(input),
        };
        debug!(
            policy = self.name(),
            net_salary = %result.net_salary,
            "Salary breakdown calculated"
        );
        result
    }

    /// Calculates the breakdown along with an audit trace of every formula.
    pub fn calculate_with_trace(
        &self,
        input: &CalculationInput,
    ) -> (CalculationResult, AuditTrace) {
        let result = self.calculate(input);
        let input = input.bounded();

        let mut trace = match self {
            CalculationPolicy::Simple => trace_simple(&input, &result),
            CalculationPolicy::Extended => trace_extended(&input, &result),
        };
        self.add_warnings(&input, &result, &mut trace);

        (result, trace)
    }

    fn add_warnings(
        &self,
        input: &CalculationInput,
        result: &CalculationResult,
        trace: &mut AuditTrace,
    ) {
        let gosi_factor = match self {
            CalculationPolicy::Simple => FIXED_GOSI_FACTOR,
            CalculationPolicy::Extended => input.gosi_factor,
        };

        if input.transform_amount.is_zero() {
            trace.warn(AuditWarning::new(
                "GOSI_DISABLED",
                "Transform amount is zero, no GOSI deduction was applied",
                "low",
            ));
        } else if gosi_factor.is_zero() {
            trace.warn(AuditWarning::new(
                "GOSI_DISABLED",
                "GOSI factor is zero, no GOSI deduction was applied",
                "low",
            ));
        } else if checked_gosi(input.total_salary, gosi_factor, input.transform_amount).is_none() {
            trace.warn(AuditWarning::new(
                "GOSI_DISABLED",
                format!(
                    "GOSI deduction is out of range for transform amount {}, no deduction was applied",
                    input.transform_amount.normalize()
                ),
                "medium",
            ));
        }

        if result.net_salary < Decimal::ZERO {
            trace.warn(AuditWarning::new(
                "NEGATIVE_NET_SALARY",
                format!(
                    "Deductions exceed earnings, net salary is {}",
                    result.net_salary
                ),
                "medium",
            ));
        }
    }
}

impl fmt::Display for CalculationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CalculationPolicy {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(CalculationPolicy::Simple),
            "extended" => Ok(CalculationPolicy::Extended),
            _ => Err(EngineError::UnknownPolicy {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_input() -> CalculationInput {
        CalculationInput {
            total_salary: dec("10000"),
            transform_amount: dec("425"),
            overtime_single: dec("60"),
            overtime_double: dec("0"),
            deduction_minutes: dec("0"),
            gosi_factor: dec("106"),
            transportation_allowance: false,
        }
    }

    #[test]
    fn test_policies_read_overtime_in_different_units() {
        let input = create_input();

        // 60 hours under the simple policy
        let simple = CalculationPolicy::Simple.calculate(&input);
        assert_eq!(simple.overtime_single_amount, dec("2437.5"));

        // 60 minutes under the extended policy
        let extended = CalculationPolicy::Extended.calculate(&input);
        assert_eq!(extended.overtime_single_amount, dec("46.30"));

        assert!(!CalculationPolicy::Simple.overtime_in_minutes());
        assert!(CalculationPolicy::Extended.overtime_in_minutes());
    }

    #[test]
    fn test_zero_transform_disables_gosi_for_both_policies() {
        let mut input = create_input();
        input.transform_amount = Decimal::ZERO;

        for policy in CalculationPolicy::ALL {
            assert_eq!(policy.calculate(&input).gosi_deduction, Decimal::ZERO);
        }
    }

    #[test]
    fn test_calculate_is_idempotent() {
        let input = create_input();
        for policy in CalculationPolicy::ALL {
            assert_eq!(policy.calculate(&input), policy.calculate(&input));
        }
    }

    #[test]
    fn test_out_of_range_input_does_not_panic() {
        let input = CalculationInput {
            total_salary: dec("70000000000000000000000000000"),
            transform_amount: dec("0.0000000000000000000000000001"),
            deduction_minutes: dec("70000000000000000000000000000"),
            gosi_factor: dec("70000000000000000000000000000"),
            ..CalculationInput::default()
        };

        for policy in CalculationPolicy::ALL {
            let result = policy.calculate(&input);
            assert_eq!(result.base_salary, Decimal::ZERO);
            assert_eq!(result.gosi_deduction, Decimal::ZERO);
        }
    }

    #[test]
    fn test_trace_matches_result() {
        let input = create_input();
        let (result, trace) = CalculationPolicy::Extended.calculate_with_trace(&input);

        assert_eq!(result, CalculationPolicy::Extended.calculate(&input));
        let net = trace.step("net_salary").unwrap();
        assert_eq!(net.output["net_salary"], result.net_salary.to_string());
        assert!(trace.warnings.is_empty());
    }

    #[test]
    fn test_zero_transform_warning() {
        let mut input = create_input();
        input.transform_amount = Decimal::ZERO;

        let (_, trace) = CalculationPolicy::Simple.calculate_with_trace(&input);
        assert_eq!(trace.warnings.len(), 1);
        assert_eq!(trace.warnings[0].code, "GOSI_DISABLED");
    }

    #[test]
    fn test_zero_factor_warns_only_for_extended() {
        let mut input = create_input();
        input.gosi_factor = Decimal::ZERO;

        let (_, simple_trace) = CalculationPolicy::Simple.calculate_with_trace(&input);
        assert!(simple_trace.warnings.is_empty());

        let (_, extended_trace) = CalculationPolicy::Extended.calculate_with_trace(&input);
        assert_eq!(extended_trace.warnings[0].code, "GOSI_DISABLED");
    }

    #[test]
    fn test_tiny_transform_does_not_panic() {
        let mut input = create_input();
        input.transform_amount = dec("0.0000000000000000000000000001");

        for policy in CalculationPolicy::ALL {
            let (result, trace) = policy.calculate_with_trace(&input);
            assert_eq!(result.gosi_deduction, Decimal::ZERO);
            assert_eq!(trace.warnings.len(), 1);
            assert_eq!(trace.warnings[0].code, "GOSI_DISABLED");
            assert_eq!(trace.warnings[0].severity, "medium");
        }
    }

    #[test]
    fn test_extreme_values_do_not_panic() {
        let extremes = [Decimal::MAX, Decimal::MIN, Decimal::new(1, 28), Decimal::new(-1, 28)];

        for policy in CalculationPolicy::ALL {
            for value in extremes {
                let input = CalculationInput {
                    total_salary: dec("1000000000000"),
                    transform_amount: value,
                    overtime_single: value,
                    overtime_double: dec("1000000000000"),
                    deduction_minutes: value,
                    gosi_factor: dec("1000000000000"),
                    transportation_allowance: true,
                };
                let (result, _) = policy.calculate_with_trace(&input);
                assert_eq!(result.net_salary.scale(), 2);
            }
        }
    }

    #[test]
    fn test_negative_net_salary_warning() {
        let input = CalculationInput {
            total_salary: dec("1000"),
            transform_amount: dec("1"),
            ..CalculationInput::default()
        };

        // 1000 x 106 x 0.06 = 6360 of insurance against 1000 of salary
        let (result, trace) = CalculationPolicy::Simple.calculate_with_trace(&input);
        assert_eq!(result.net_salary, dec("-5360.00"));
        assert!(trace.warnings.iter().any(|w| w.code == "NEGATIVE_NET_SALARY"));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            CalculationPolicy::from_str("simple").unwrap(),
            CalculationPolicy::Simple
        );
        assert_eq!(
            CalculationPolicy::from_str(" Extended ").unwrap(),
            CalculationPolicy::Extended
        );
        match CalculationPolicy::from_str("premium").unwrap_err() {
            EngineError::UnknownPolicy { name } => assert_eq!(name, "premium"),
            other => panic!("Expected UnknownPolicy, got {:?}", other),
        }
    }

    #[test]
    fn test_policy_serialization() {
        assert_eq!(
            serde_json::to_string(&CalculationPolicy::Simple).unwrap(),
            "\"simple\""
        );
        let policy: CalculationPolicy = serde_json::from_str("\"extended\"").unwrap();
        assert_eq!(policy, CalculationPolicy::Extended);
    }
}

//! The simple calculation policy.
//!
//! Base salary is a fixed 65% share of the total salary. Overtime is entered
//! in decimal hours and left unrounded, the insurance multiplier is fixed
//! at 106, and net salary starts from the total salary.

use rust_decimal::Decimal;

use crate::models::{AuditStep, AuditTrace, CalculationInput, CalculationResult};

use super::gosi::{FIXED_GOSI_FACTOR, GOSI_RATE, calculate_gosi, checked_gosi};
use super::rounding::round2;
use super::work_month::{
    DOUBLE_OVERTIME_MULTIPLIER, SINGLE_OVERTIME_MULTIPLIER, calculate_time_deduction,
    hourly_amount,
};

/// Share of the total salary that forms the base salary (65%).
pub const SIMPLE_BASE_SALARY_RATIO: Decimal = Decimal::from_parts(65, 0, 0, false, 2);

/// Calculates the base salary as `round2(total_salary * 0.65)`.
///
/// # Examples
///
/// ```
/// use salary_calculator::calculation::calculate_simple_base_salary;
/// use rust_decimal::Decimal;
///
/// assert_eq!(calculate_simple_base_salary(Decimal::from(10000)), Decimal::from(6500));
/// ```
pub fn calculate_simple_base_salary(total_salary: Decimal) -> Decimal {
    round2(total_salary * SIMPLE_BASE_SALARY_RATIO)
}

/// Runs the simple policy over an input.
///
/// `overtime_single` and `overtime_double` are read as hours. The
/// `gosi_factor` and `transportation_allowance` fields are ignored.
/// Out-of-range fields are zeroed first (see [`CalculationInput::bounded`]).
///
/// # Examples
///
/// ```
/// use salary_calculator::calculation::calculate_simple;
/// use salary_calculator::models::CalculationInput;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let input = CalculationInput {
///     total_salary: Decimal::from(10000),
///     transform_amount: Decimal::from(425),
///     overtime_single: Decimal::from(10),
///     ..CalculationInput::default()
/// };
///
/// let result = calculate_simple(&input);
/// assert_eq!(result.base_salary, Decimal::from(6500));
/// assert_eq!(result.overtime_single_amount, Decimal::from_str("406.25").unwrap());
/// assert_eq!(result.gosi_deduction, Decimal::from_str("149.65").unwrap());
/// assert_eq!(result.net_salary, Decimal::from_str("10256.60").unwrap());
/// ```
pub fn calculate_simple(input: &CalculationInput) -> CalculationResult {
    let input = input.bounded();
    let base_salary = calculate_simple_base_salary(input.total_salary);

    let overtime_single_amount =
        hourly_amount(base_salary, input.overtime_single, SINGLE_OVERTIME_MULTIPLIER);
    let overtime_double_amount =
        hourly_amount(base_salary, input.overtime_double, DOUBLE_OVERTIME_MULTIPLIER);

    let gosi_deduction =
        calculate_gosi(input.total_salary, FIXED_GOSI_FACTOR, input.transform_amount);
    let deductions = calculate_time_deduction(input.total_salary, input.deduction_minutes);

    let net_salary = round2(
        input.total_salary + overtime_single_amount + overtime_double_amount
            - gosi_deduction
            - deductions,
    );

    CalculationResult {
        base_salary,
        allowances: None,
        overtime_single_amount,
        overtime_double_amount,
        gosi_deduction,
        deductions,
        net_salary,
    }
}

/// Records one audit step per formula of the simple policy.
pub(crate) fn trace_simple(input: &CalculationInput, result: &CalculationResult) -> AuditTrace {
    let mut trace = AuditTrace::default();

    trace.push(
        AuditStep::new("base_salary", "Base Salary", "round2(total_salary x 0.65)")
            .with_input(serde_json::json!({
                "total_salary": input.total_salary.normalize().to_string()
            }))
            .with_output(serde_json::json!({
                "base_salary": result.base_salary.to_string()
            }))
            .with_reasoning(format!(
                "{} x {} = {}",
                input.total_salary.normalize(),
                SIMPLE_BASE_SALARY_RATIO,
                result.base_salary
            )),
    );

    for (rule_id, rule_name, hours, multiplier, amount) in [
        (
            "overtime_single",
            "Overtime 150%",
            input.overtime_single,
            SINGLE_OVERTIME_MULTIPLIER,
            result.overtime_single_amount,
        ),
        (
            "overtime_double",
            "Overtime 200%",
            input.overtime_double,
            DOUBLE_OVERTIME_MULTIPLIER,
            result.overtime_double_amount,
        ),
    ] {
        trace.push(
            AuditStep::new(
                rule_id,
                rule_name,
                format!("base_salary / 30 / 8 x hours x {}", multiplier),
            )
            .with_input(serde_json::json!({
                "base_salary": result.base_salary.to_string(),
                "hours": hours.normalize().to_string(),
                "multiplier": multiplier.to_string()
            }))
            .with_output(serde_json::json!({
                "amount": amount.normalize().to_string(),
                "rounded": false
            }))
            .with_reasoning(format!(
                "{} hours at {} x the hourly rate of {} / 240 = {}",
                hours.normalize(),
                multiplier,
                result.base_salary,
                amount.normalize()
            )),
        );
    }

    trace.push(
        AuditStep::new(
            "gosi_deduction",
            "GOSI Deduction",
            format!(
                "round2(total_salary x {} x {} / transform_amount)",
                FIXED_GOSI_FACTOR, GOSI_RATE
            ),
        )
        .with_input(serde_json::json!({
            "total_salary": input.total_salary.normalize().to_string(),
            "gosi_factor": FIXED_GOSI_FACTOR.to_string(),
            "transform_amount": input.transform_amount.normalize().to_string()
        }))
        .with_output(serde_json::json!({
            "gosi_deduction": result.gosi_deduction.to_string()
        }))
        .with_reasoning(if input.transform_amount.is_zero() {
            "Transform amount is zero, deduction disabled".to_string()
        } else if checked_gosi(input.total_salary, FIXED_GOSI_FACTOR, input.transform_amount)
            .is_none()
        {
            "Deduction is out of range for this transform amount, deduction disabled".to_string()
        } else {
            format!(
                "{} x {} x {} / {} = {}",
                input.total_salary.normalize(),
                FIXED_GOSI_FACTOR,
                GOSI_RATE,
                input.transform_amount.normalize(),
                result.gosi_deduction
            )
        }),
    );

    trace.push(deduction_step(input, result));
    trace.push(
        AuditStep::new(
            "net_salary",
            "Net Salary",
            "round2(total_salary + overtime_single + overtime_double - gosi - deductions)",
        )
        .with_input(serde_json::json!({
            "total_salary": input.total_salary.normalize().to_string(),
            "overtime_single_amount": result.overtime_single_amount.normalize().to_string(),
            "overtime_double_amount": result.overtime_double_amount.normalize().to_string(),
            "gosi_deduction": result.gosi_deduction.to_string(),
            "deductions": result.deductions.to_string()
        }))
        .with_output(serde_json::json!({
            "net_salary": result.net_salary.to_string()
        }))
        .with_reasoning(format!(
            "{} + {} + {} - {} - {} = {}",
            input.total_salary.normalize(),
            result.overtime_single_amount.normalize(),
            result.overtime_double_amount.normalize(),
            result.gosi_deduction,
            result.deductions,
            result.net_salary
        )),
    );

    trace
}

/// Builds the time deduction step, shared by both policies.
pub(crate) fn deduction_step(input: &CalculationInput, result: &CalculationResult) -> AuditStep {
    AuditStep::new(
        "time_deduction",
        "Time Deduction",
        "round2(total_salary / 30 / 8 / 60 x minutes)",
    )
    .with_input(serde_json::json!({
        "total_salary": input.total_salary.normalize().to_string(),
        "minutes": input.deduction_minutes.normalize().to_string()
    }))
    .with_output(serde_json::json!({
        "deductions": result.deductions.to_string()
    }))
    .with_reasoning(format!(
        "{} minutes at {} / 14400 per minute = {}",
        input.deduction_minutes.normalize(),
        input.total_salary.normalize(),
        result.deductions
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_input(
        total: &str,
        transform: &str,
        hours: &str,
        hours_double: &str,
        minutes: &str,
    ) -> CalculationInput {
        CalculationInput {
            total_salary: dec(total),
            transform_amount: dec(transform),
            overtime_single: dec(hours),
            overtime_double: dec(hours_double),
            deduction_minutes: dec(minutes),
            ..CalculationInput::default()
        }
    }

    #[test]
    fn test_base_salary_is_65_percent() {
        assert_eq!(calculate_simple_base_salary(dec("10000")), dec("6500"));
        assert_eq!(calculate_simple_base_salary(dec("4321")), dec("2808.65"));
        assert_eq!(calculate_simple_base_salary(dec("0.01")), dec("0.01"));
    }

    #[test]
    fn test_end_to_end_with_single_overtime() {
        let result = calculate_simple(&create_input("10000", "425", "10", "0", "0"));

        assert_eq!(result.base_salary, dec("6500.00"));
        assert_eq!(result.allowances, None);
        assert_eq!(result.overtime_single_amount, dec("406.25"));
        assert_eq!(result.overtime_double_amount, Decimal::ZERO);
        assert_eq!(result.gosi_deduction, dec("149.65"));
        assert_eq!(result.deductions, Decimal::ZERO);
        assert_eq!(result.net_salary, dec("10256.60"));
    }

    #[test]
    fn test_overtime_is_not_rounded() {
        // 6500 / 240 x 1 x 2 = 54.1666...
        let result = calculate_simple(&create_input("10000", "425", "0", "1", "0"));
        assert!(result.overtime_double_amount > dec("54.1666"));
        assert!(result.overtime_double_amount < dec("54.1667"));
        assert_ne!(result.overtime_double_amount, dec("54.17"));
    }

    #[test]
    fn test_net_salary_starts_from_total_salary() {
        let result = calculate_simple(&create_input("10000", "0", "0", "0", "0"));
        assert_eq!(result.gosi_deduction, Decimal::ZERO);
        assert_eq!(result.net_salary, dec("10000"));
    }

    #[test]
    fn test_deductions_reduce_net_salary() {
        // 480 minutes is one day: 10000 / 30 = 333.33
        let result = calculate_simple(&create_input("10000", "425", "0", "0", "480"));
        assert_eq!(result.deductions, dec("333.33"));
        assert_eq!(result.net_salary, dec("9517.02"));
    }

    #[test]
    fn test_gosi_ignores_caller_factor() {
        let mut input = create_input("10000", "425", "0", "0", "0");
        input.gosi_factor = dec("50");
        input.transportation_allowance = true;

        let result = calculate_simple(&input);
        assert_eq!(result.gosi_deduction, dec("149.65"));
        assert_eq!(result.allowances, None);
    }

    #[test]
    fn test_out_of_range_fields_are_zeroed() {
        let mut input = create_input("10000", "425", "0", "0", "0");
        input.overtime_double = dec("100000000000000000000000000");
        input.deduction_minutes = dec("-100000000000000000000000000");

        let result = calculate_simple(&input);
        assert_eq!(result.overtime_double_amount, Decimal::ZERO);
        assert_eq!(result.deductions, Decimal::ZERO);
        assert_eq!(result.net_salary, dec("9850.35"));
    }

    #[test]
    fn test_tiny_transform_disables_gosi() {
        let input = create_input("10000", "0.0000000000000000000000000001", "0", "0", "0");
        let result = calculate_simple(&input);
        let trace = trace_simple(&input, &result);

        assert_eq!(result.gosi_deduction, Decimal::ZERO);
        assert_eq!(result.net_salary, dec("10000.00"));
        assert!(trace.step("gosi_deduction").unwrap().reasoning.contains("out of range"));
    }

    #[test]
    fn test_zero_input_yields_zero_result() {
        let result = calculate_simple(&CalculationInput::default());
        assert_eq!(result.base_salary, Decimal::ZERO);
        assert_eq!(result.net_salary, Decimal::ZERO);
        assert_eq!(result.net_salary.to_string(), "0.00");
    }

    #[test]
    fn test_trace_has_one_step_per_formula() {
        let input = create_input("10000", "425", "10", "0", "0");
        let result = calculate_simple(&input);
        let trace = trace_simple(&input, &result);

        let rule_ids: Vec<&str> = trace.steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(
            rule_ids,
            vec![
                "base_salary",
                "overtime_single",
                "overtime_double",
                "gosi_deduction",
                "time_deduction",
                "net_salary"
            ]
        );
        assert_eq!(trace.steps.last().unwrap().step_number, 6);
    }

    #[test]
    fn test_trace_records_values() {
        let input = create_input("10000", "425", "10", "0", "0");
        let result = calculate_simple(&input);
        let trace = trace_simple(&input, &result);

        let base = trace.step("base_salary").unwrap();
        assert_eq!(base.input["total_salary"], "10000");
        assert_eq!(base.output["base_salary"], "6500.00");
        assert!(base.reasoning.contains("0.65"));

        let overtime = trace.step("overtime_single").unwrap();
        assert_eq!(overtime.output["amount"], "406.25");
        assert_eq!(overtime.output["rounded"], false);

        let gosi = trace.step("gosi_deduction").unwrap();
        assert_eq!(gosi.input["gosi_factor"], "106");
        assert_eq!(gosi.output["gosi_deduction"], "149.65");

        let net = trace.step("net_salary").unwrap();
        assert_eq!(net.output["net_salary"], "10256.60");
    }

    #[test]
    fn test_trace_explains_disabled_gosi() {
        let input = create_input("10000", "0", "0", "0", "0");
        let result = calculate_simple(&input);
        let trace = trace_simple(&input, &result);

        let gosi = trace.step("gosi_deduction").unwrap();
        assert!(gosi.reasoning.contains("disabled"));
    }
}

//! The extended calculation policy.
//!
//! The total salary is treated as base salary plus a 35% allowance share, so
//! the base is recovered by dividing by 1.35. Overtime and deductions arrive
//! as minute counts parsed from `HH:MM` strings, every amount is rounded, the
//! insurance multiplier comes from the caller, and net salary starts from
//! base salary plus allowances.

use rust_decimal::Decimal;

use crate::models::{AuditStep, AuditTrace, CalculationInput, CalculationResult};

use super::gosi::{GOSI_RATE, calculate_gosi, checked_gosi};
use super::rounding::round2;
use super::simple::deduction_step;
use super::work_month::{
    DOUBLE_OVERTIME_MULTIPLIER, SINGLE_OVERTIME_MULTIPLIER, calculate_time_deduction,
    per_minute_amount,
};

/// Divisor recovering the base salary from the total salary.
pub const EXTENDED_BASE_SALARY_DIVISOR: Decimal = Decimal::from_parts(135, 0, 0, false, 2);

/// Allowance share of the base salary (35%).
pub const ALLOWANCE_RATIO: Decimal = Decimal::from_parts(35, 0, 0, false, 2);

/// Flat monthly transportation allowance.
pub const TRANSPORTATION_ALLOWANCE: Decimal = Decimal::from_parts(150, 0, 0, false, 0);

/// Calculates the base salary as `round2(total_salary / 1.35)`.
///
/// # Examples
///
/// ```
/// use salary_calculator::calculation::calculate_extended_base_salary;
/// use rust_decimal::Decimal;
///
/// let base = calculate_extended_base_salary(Decimal::from(10000));
/// assert_eq!(base, Decimal::new(740741, 2));
/// ```
pub fn calculate_extended_base_salary(total_salary: Decimal) -> Decimal {
    round2(total_salary / EXTENDED_BASE_SALARY_DIVISOR)
}

/// Calculates the allowances as `round2(base_salary * 0.35)`, plus 150 when
/// the transportation allowance applies.
///
/// # Examples
///
/// ```
/// use salary_calculator::calculation::calculate_allowances;
/// use rust_decimal::Decimal;
///
/// let base = Decimal::new(740741, 2);
/// assert_eq!(calculate_allowances(base, false), Decimal::new(259259, 2));
/// assert_eq!(calculate_allowances(base, true), Decimal::new(274259, 2));
/// ```
pub fn calculate_allowances(base_salary: Decimal, transportation_allowance: bool) -> Decimal {
    let share = round2(base_salary * ALLOWANCE_RATIO);
    if transportation_allowance {
        share + TRANSPORTATION_ALLOWANCE
    } else {
        share
    }
}

/// Runs the extended policy over an input.
///
/// `overtime_single`, `overtime_double` and `deduction_minutes` are read as
/// minutes, typically produced by
/// [`parse_time_to_minutes`](super::parse_time_to_minutes). Out-of-range
/// fields are zeroed first (see [`CalculationInput::bounded`]).
///
/// # Examples
///
/// ```
/// use salary_calculator::calculation::calculate_extended;
/// use salary_calculator::models::CalculationInput;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let input = CalculationInput {
///     total_salary: Decimal::from(10000),
///     transform_amount: Decimal::from(425),
///     overtime_single: Decimal::from(60),
///     gosi_factor: Decimal::from(106),
///     ..CalculationInput::default()
/// };
///
/// let result = calculate_extended(&input);
/// assert_eq!(result.base_salary, Decimal::from_str("7407.41").unwrap());
/// assert_eq!(result.allowances, Some(Decimal::from_str("2592.59").unwrap()));
/// assert_eq!(result.overtime_single_amount, Decimal::from_str("46.30").unwrap());
/// assert_eq!(result.net_salary, Decimal::from_str("9896.65").unwrap());
/// ```
pub fn calculate_extended(input: &CalculationInput) -> CalculationResult {
    let input = input.bounded();
    let base_salary = calculate_extended_base_salary(input.total_salary);
    let allowances = calculate_allowances(base_salary, input.transportation_allowance);

    let overtime_single_amount = round2(per_minute_amount(
        base_salary,
        input.overtime_single,
        SINGLE_OVERTIME_MULTIPLIER,
    ));
    let overtime_double_amount = round2(per_minute_amount(
        base_salary,
        input.overtime_double,
        DOUBLE_OVERTIME_MULTIPLIER,
    ));

    let gosi_deduction =
        calculate_gosi(input.total_salary, input.gosi_factor, input.transform_amount);
    let deductions = calculate_time_deduction(input.total_salary, input.deduction_minutes);

    let net_salary = round2(
        base_salary + allowances + overtime_single_amount + overtime_double_amount
            - gosi_deduction
            - deductions,
    );

    CalculationResult {
        base_salary,
        allowances: Some(allowances),
        overtime_single_amount,
        overtime_double_amount,
        gosi_deduction,
        deductions,
        net_salary,
    }
}

/// Records one audit step per formula of the extended policy.
pub(crate) fn trace_extended(input: &CalculationInput, result: &CalculationResult) -> AuditTrace {
    let mut trace = AuditTrace::default();
    let allowances = result.allowances.unwrap_or_default();

    trace.push(
        AuditStep::new("base_salary", "Base Salary", "round2(total_salary / 1.35)")
            .with_input(serde_json::json!({
                "total_salary": input.total_salary.normalize().to_string()
            }))
            .with_output(serde_json::json!({
                "base_salary": result.base_salary.to_string()
            }))
            .with_reasoning(format!(
                "{} / {} = {}",
                input.total_salary.normalize(),
                EXTENDED_BASE_SALARY_DIVISOR,
                result.base_salary
            )),
    );

    trace.push(
        AuditStep::new(
            "allowances",
            "Allowances",
            "round2(base_salary x 0.35) + transportation",
        )
        .with_input(serde_json::json!({
            "base_salary": result.base_salary.to_string(),
            "transportation_allowance": input.transportation_allowance
        }))
        .with_output(serde_json::json!({
            "allowances": allowances.to_string()
        }))
        .with_reasoning(if input.transportation_allowance {
            format!(
                "{} x {} plus {} transportation = {}",
                result.base_salary, ALLOWANCE_RATIO, TRANSPORTATION_ALLOWANCE, allowances
            )
        } else {
            format!(
                "{} x {} = {}, no transportation allowance",
                result.base_salary, ALLOWANCE_RATIO, allowances
            )
        }),
    );

    for (rule_id, rule_name, minutes, multiplier, amount) in [
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
                format!("round2(base_salary / 30 / 8 / 60 x minutes x {})", multiplier),
            )
            .with_input(serde_json::json!({
                "base_salary": result.base_salary.to_string(),
                "minutes": minutes.normalize().to_string(),
                "multiplier": multiplier.to_string()
            }))
            .with_output(serde_json::json!({
                "amount": amount.to_string(),
                "rounded": true
            }))
            .with_reasoning(format!(
                "{} minutes at {} x the per-minute rate of {} / 14400 = {}",
                minutes.normalize(),
                multiplier,
                result.base_salary,
                amount
            )),
        );
    }

    trace.push(
        AuditStep::new(
            "gosi_deduction",
            "GOSI Deduction",
            format!("round2(total_salary x gosi_factor x {} / transform_amount)", GOSI_RATE),
        )
        .with_input(serde_json::json!({
            "total_salary": input.total_salary.normalize().to_string(),
            "gosi_factor": input.gosi_factor.normalize().to_string(),
            "transform_amount": input.transform_amount.normalize().to_string()
        }))
        .with_output(serde_json::json!({
            "gosi_deduction": result.gosi_deduction.to_string()
        }))
        .with_reasoning(if input.transform_amount.is_zero() {
            "Transform amount is zero, deduction disabled".to_string()
        } else if input.gosi_factor.is_zero() {
            "GOSI factor is zero, deduction disabled".to_string()
        } else if checked_gosi(input.total_salary, input.gosi_factor, input.transform_amount)
            .is_none()
        {
            "Deduction is out of range for this transform amount, deduction disabled".to_string()
        } else {
            format!(
                "{} x {} x {} / {} = {}",
                input.total_salary.normalize(),
                input.gosi_factor.normalize(),
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
            "round2(base_salary + allowances + overtime_single + overtime_double - gosi - deductions)",
        )
        .with_input(serde_json::json!({
            "base_salary": result.base_salary.to_string(),
            "allowances": allowances.to_string(),
            "overtime_single_amount": result.overtime_single_amount.to_string(),
            "overtime_double_amount": result.overtime_double_amount.to_string(),
            "gosi_deduction": result.gosi_deduction.to_string(),
            "deductions": result.deductions.to_string()
        }))
        .with_output(serde_json::json!({
            "net_salary": result.net_salary.to_string()
        }))
        .with_reasoning(format!(
            "{} + {} + {} + {} - {} - {} = {}",
            result.base_salary,
            allowances,
            result.overtime_single_amount,
            result.overtime_double_amount,
            result.gosi_deduction,
            result.deductions,
            result.net_salary
        )),
    );

    trace
}

//! Calculation result models for the salary calculator.
//!
//! This module contains the [`CalculationResult`] breakdown and the audit
//! structures that explain how each figure was derived.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The salary breakdown produced by a calculation policy.
///
/// Every field is a pure function of the input. Monetary amounts carry two
/// decimal places, except the simple policy's overtime amounts which are
/// left unrounded.
///
/// # Example
///
/// ```
/// use salary_calculator::models::CalculationResult;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = CalculationResult {
///     base_salary: Decimal::from_str("6500.00").unwrap(),
///     allowances: None,
///     overtime_single_amount: Decimal::from_str("406.25").unwrap(),
///     overtime_double_amount: Decimal::from_str("54.1666").unwrap(),
///     gosi_deduction: Decimal::from_str("149.65").unwrap(),
///     deductions: Decimal::ZERO,
///     net_salary: Decimal::from_str("10310.77").unwrap(),
/// };
/// assert_eq!(result.total_overtime(), Decimal::from_str("460.4166").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// The salary portion used as the basis for rates.
    pub base_salary: Decimal,
    /// Housing and transportation allowances (extended policy only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowances: Option<Decimal>,
    /// Overtime pay at 1.5 times the derived rate.
    pub overtime_single_amount: Decimal,
    /// Overtime pay at 2 times the derived rate.
    pub overtime_double_amount: Decimal,
    /// The social insurance (GOSI) deduction.
    pub gosi_deduction: Decimal,
    /// The time-based deduction.
    pub deductions: Decimal,
    /// The salary after overtime and deductions.
    pub net_salary: Decimal,
}

impl CalculationResult {
    /// Returns the combined overtime pay at both rates.
    pub fn total_overtime(&self) -> Decimal {
        self.overtime_single_amount + self.overtime_double_amount
    }
}

/// A single step in the audit trace recording how one figure was derived.
///
/// Steps are numbered when they are pushed onto an [`AuditTrace`].
///
/// # Example
///
/// ```
/// use salary_calculator::models::{AuditStep, AuditTrace};
///
/// let mut trace = AuditTrace::default();
/// trace.push(
///     AuditStep::new("base_salary", "Base Salary", "round2(total_salary x 0.65)")
///         .with_input(serde_json::json!({"total_salary": "10000"}))
///         .with_output(serde_json::json!({"base_salary": "6500.00"}))
///         .with_reasoning("$10000 x 0.65 = $6500.00"),
/// );
/// assert_eq!(trace.steps[0].step_number, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The identifier of the formula that was applied.
    pub rule_id: String,
    /// The human-readable name of the formula.
    pub rule_name: String,
    /// The formula in textual form.
    pub formula: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the result.
    pub reasoning: String,
}

impl AuditStep {
    /// Creates an unnumbered step with empty input and output.
    pub fn new(
        rule_id: impl Into<String>,
        rule_name: impl Into<String>,
        formula: impl Into<String>,
    ) -> Self {
        Self {
            step_number: 0,
            rule_id: rule_id.into(),
            rule_name: rule_name.into(),
            formula: formula.into(),
            input: serde_json::Value::Null,
            output: serde_json::Value::Null,
            reasoning: String::new(),
        }
    }

    /// Sets the input data.
    pub fn with_input(mut self, input: serde_json::Value) -> Self {
        self.input = input;
        self
    }

    /// Sets the output data.
    pub fn with_output(mut self, output: serde_json::Value) -> Self {
        self.output = output;
        self
    }

    /// Sets the reasoning.
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }
}

/// A warning generated during calculation.
///
/// Warnings flag degenerate results that are still valid output, such as a
/// disabled insurance deduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium" or "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a new warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Appends a step, numbering it after the steps already recorded.
    pub fn push(&mut self, mut step: AuditStep) {
        step.step_number = self.steps.len() as u32 + 1;
        self.steps.push(step);
    }

    /// Appends a warning.
    pub fn warn(&mut self, warning: AuditWarning) {
        self.warnings.push(warning);
    }

    /// Returns the step with the given rule id, if any.
    pub fn step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|s| s.rule_id == rule_id)
    }
}

//! Request types for the salary calculator API.

use serde::{Deserialize, Serialize};

use crate::calculation::CalculationPolicy;
use crate::config::FormDefaults;
use crate::models::{CalculationInput, ExtendedForm, SimpleForm};

/// Request body for the `/calculate` endpoint.
///
/// The `policy` tag selects the form shape; the remaining keys are the form
/// fields as typed, either strings or numbers.
///
/// ```json
/// { "policy": "extended", "total_salary": "10000", "overtime_hours": "01:00" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum CalculationRequest {
    /// Fields of the simple form.
    Simple(SimpleForm),
    /// Fields of the extended form.
    Extended(ExtendedForm),
}

impl CalculationRequest {
    /// Returns the policy the request selects.
    pub fn policy(&self) -> CalculationPolicy {
        match self {
            CalculationRequest::Simple(_) => CalculationPolicy::Simple,
            CalculationRequest::Extended(_) => CalculationPolicy::Extended,
        }
    }

    /// Coerces the form fields into calculation input.
    pub fn to_input(&self, defaults: &FormDefaults) -> CalculationInput {
        match self {
            CalculationRequest::Simple(form) => form.to_input(&defaults.simple),
            CalculationRequest::Extended(form) => form.to_input(&defaults.extended),
        }
    }
}

/// Request body for the `/time/format` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeFormatRequest {
    /// The raw keystrokes of a time field.
    pub raw: String,
}

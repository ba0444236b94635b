//! Core data models for the salary calculator.
//!
//! This module contains the calculation input and result records, the audit
//! trace, and the raw form records that are coerced into input.

mod calculation_input;
mod calculation_result;
mod form;

pub use calculation_input::{CalculationInput, MAX_FIELD_VALUE};
pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, CalculationResult};
pub use form::{EMPTY_TRANSFORM_FALLBACK, ExtendedForm, SimpleForm, coerce_field};

//! Response types for the salary calculator API.
//!
//! This module defines the success payloads and the error response
//! structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::CalculationPolicy;
use crate::config::{CalculatorMetadata, ExtendedDefaults, FormDefaults, SimpleDefaults};
use crate::error::EngineError;
use crate::models::{AuditTrace, CalculationInput, CalculationResult};

/// Response body of the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The policy the calculation ran with.
    pub policy: CalculationPolicy,
    /// The input after form coercion.
    pub input: CalculationInput,
    /// The salary breakdown.
    pub result: CalculationResult,
    /// Overtime pay at both rates combined.
    pub total_overtime: Decimal,
    /// How each figure was derived.
    pub audit_trace: AuditTrace,
}

/// Response body of the `/time/format` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeFormatResponse {
    /// The normalized display string.
    pub formatted: String,
    /// The display string converted to minutes.
    pub minutes: Decimal,
}

/// Response body of the `/defaults` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsResponse {
    /// The calculator metadata.
    pub calculator: CalculatorMetadata,
    /// Form defaults for every policy.
    pub defaults: FormDefaults,
}

/// Form defaults of a single policy.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PolicyDefaults {
    /// Defaults of the simple form.
    Simple(SimpleDefaults),
    /// Defaults of the extended form.
    Extended(ExtendedDefaults),
}

/// Response body of the `/defaults/{policy}` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyDefaultsResponse {
    /// The requested policy.
    pub policy: CalculationPolicy,
    /// Its form defaults.
    pub defaults: PolicyDefaults,
}

impl PolicyDefaultsResponse {
    /// Picks the defaults of one policy.
    pub fn new(policy: CalculationPolicy, defaults: &FormDefaults) -> Self {
        let defaults = match policy {
            CalculationPolicy::Simple => PolicyDefaults::Simple(defaults.simple.clone()),
            CalculationPolicy::Extended => PolicyDefaults::Extended(defaults.extended.clone()),
        };
        Self { policy, defaults }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an unknown policy error response.
    pub fn unknown_policy(name: &str) -> Self {
        Self::with_details(
            "UNKNOWN_POLICY",
            format!("Unknown calculation policy: {}", name),
            format!(
                "Supported policies are '{}' and '{}'",
                CalculationPolicy::Simple,
                CalculationPolicy::Extended
            ),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { field, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid configuration",
                    format!("{}: {}", field, message),
                ),
            },
            EngineError::UnknownPolicy { name } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::unknown_policy(&name),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_unknown_policy_error() {
        let error = ApiError::unknown_policy("premium");
        assert_eq!(error.code, "UNKNOWN_POLICY");
        assert!(error.message.contains("premium"));
        assert!(error.details.unwrap().contains("extended"));
    }

    #[test]
    fn test_engine_error_to_api_error() {
        let engine_error = EngineError::UnknownPolicy {
            name: "premium".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "UNKNOWN_POLICY");
    }

    #[test]
    fn test_config_errors_are_server_errors() {
        let api_error: ApiErrorResponse = EngineError::InvalidConfig {
            field: "simple.transform_amount".to_string(),
            message: "must be at least 1, got 0".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }

    #[test]
    fn test_policy_defaults_pick_one_policy() {
        let response =
            PolicyDefaultsResponse::new(CalculationPolicy::Extended, &FormDefaults::default());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["policy"], "extended");
        assert_eq!(json["defaults"]["gosi_factor"], "106");
        assert_eq!(json["defaults"]["transform_amount"], "425");
    }
}

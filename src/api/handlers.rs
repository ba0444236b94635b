//! HTTP request handlers for the salary calculator API.
//!
//! This module contains the handler functions for all API endpoints.

use std::str::FromStr;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{CalculationPolicy, format_time_input, parse_time_to_minutes};

use super::request::{CalculationRequest, TimeFormatRequest};
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, DefaultsResponse, PolicyDefaultsResponse,
    TimeFormatResponse,
};
use super::state::AppState;

/// The engine version reported with every calculation.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/time/format", post(format_time_handler))
        .route("/defaults", get(defaults_handler))
        .route("/defaults/:policy", get(policy_defaults_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Coerces the form fields, runs the selected policy and returns the
/// breakdown with its audit trace.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let policy = request.policy();
    let input = request.to_input(state.config().defaults());

    let start_time = Instant::now();
    let (result, audit_trace) = policy.calculate_with_trace(&input);
    let duration = start_time.elapsed();

    if !audit_trace.warnings.is_empty() {
        warn!(
            correlation_id = %correlation_id,
            warnings = ?audit_trace.warnings.iter().map(|w| w.code.as_str()).collect::<Vec<_>>(),
            "Calculation produced warnings"
        );
    }
    info!(
        correlation_id = %correlation_id,
        policy = %policy,
        net_salary = %result.net_salary,
        duration_us = duration.as_micros(),
        "Calculation completed successfully"
    );

    let response = CalculationResponse {
        calculation_id: correlation_id,
        timestamp: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        policy,
        input,
        total_overtime: result.total_overtime(),
        result,
        audit_trace,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Handler for POST /time/format endpoint.
///
/// Normalizes raw keystrokes the way a time field displays them and
/// reports the minute count of the normalized string.
async fn format_time_handler(payload: Result<Json<TimeFormatRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let formatted = format_time_input(&request.raw);
    let minutes = parse_time_to_minutes(Some(&formatted));

    (StatusCode::OK, Json(TimeFormatResponse { formatted, minutes })).into_response()
}

/// Handler for GET /defaults endpoint.
async fn defaults_handler(State(state): State<AppState>) -> Json<DefaultsResponse> {
    let config = state.config();
    Json(DefaultsResponse {
        calculator: config.metadata().clone(),
        defaults: config.defaults().clone(),
    })
}

/// Handler for GET /defaults/{policy} endpoint.
async fn policy_defaults_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    match CalculationPolicy::from_str(&name) {
        Ok(policy) => Json(PolicyDefaultsResponse::new(
            policy,
            state.config().defaults(),
        ))
        .into_response(),
        Err(err) => {
            warn!(policy = %name, "Unknown policy requested");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Maps a JSON extraction failure onto a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
    .into_response()
}

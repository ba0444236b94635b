//! HTTP API module for the salary calculator.
//!
//! This module provides the REST endpoints for calculating salary
//! breakdowns, normalizing time fields and reading form defaults.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{ENGINE_VERSION, create_router};
pub use request::{CalculationRequest, TimeFormatRequest};
pub use response::{
    ApiError, ApiErrorResponse, CalculationResponse, DefaultsResponse, PolicyDefaults,
    PolicyDefaultsResponse, TimeFormatResponse,
};
pub use state::AppState;

//! Error types for the salary calculator.
//!
//! The formula engine itself never fails: malformed input degrades to zero.
//! These errors cover the fallible surface around it, namely configuration
//! loading and policy lookup.

use thiserror::Error;

/// The main error type for the salary calculator.
///
/// # Example
///
/// ```
/// use salary_calculator::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was present but unusable.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The dotted path of the offending field.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A calculation policy name did not match any known policy.
    #[error("Unknown calculation policy: {name}")]
    UnknownPolicy {
        /// The name that was requested.
        name: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

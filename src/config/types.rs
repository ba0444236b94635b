//! Configuration types for the salary calculator.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Metadata about the calculator deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorMetadata {
    /// A short identifier for this configuration (e.g., "sa-default").
    pub code: String,
    /// The human-readable name of the calculator.
    pub name: String,
    /// The version of the configuration.
    pub version: String,
    /// The currency amounts are expressed in, for display by callers.
    pub currency: String,
}

/// Field defaults for the simple policy form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleDefaults {
    /// The transform amount used when the field is not supplied.
    pub transform_amount: Decimal,
}

/// Field defaults for the extended policy form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedDefaults {
    /// The transform amount used when the field is not supplied.
    pub transform_amount: Decimal,
    /// The insurance multiplier used when the field is not supplied.
    pub gosi_factor: Decimal,
    /// Whether the transportation allowance is ticked by default.
    #[serde(default)]
    pub transportation_allowance: bool,
}

/// Form defaults from defaults.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDefaults {
    /// Defaults for the simple policy.
    pub simple: SimpleDefaults,
    /// Defaults for the extended policy.
    pub extended: ExtendedDefaults,
}

impl Default for FormDefaults {
    fn default() -> Self {
        let transform_amount = Decimal::from(425);
        Self {
            simple: SimpleDefaults { transform_amount },
            extended: ExtendedDefaults {
                transform_amount,
                gosi_factor: Decimal::from(106),
                transportation_allowance: false,
            },
        }
    }
}

/// The complete calculator configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct CalculatorConfig {
    metadata: CalculatorMetadata,
    defaults: FormDefaults,
}

impl CalculatorConfig {
    /// Creates a new CalculatorConfig from its component parts.
    pub fn new(metadata: CalculatorMetadata, defaults: FormDefaults) -> Self {
        Self { metadata, defaults }
    }

    /// Returns the calculator metadata.
    pub fn metadata(&self) -> &CalculatorMetadata {
        &self.metadata
    }

    /// Returns the form defaults.
    pub fn defaults(&self) -> &FormDefaults {
        &self.defaults
    }
}

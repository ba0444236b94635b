//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading calculator
//! configurations from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::calculation::CalculationPolicy;
use crate::error::{EngineError, EngineResult};

use super::types::{CalculatorConfig, CalculatorMetadata, FormDefaults};

/// Loads and provides access to calculator configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── calculator.yaml   # Calculator metadata
/// └── defaults.yaml     # Form defaults per policy
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_calculator::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Loaded calculator: {}", loader.metadata().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: CalculatorConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or a missing field (`ConfigParseError`)
    /// - A default is outside its usable range (`InvalidConfig`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use salary_calculator::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), salary_calculator::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<CalculatorMetadata>(&path.join("calculator.yaml"))?;
        let defaults = Self::load_yaml::<FormDefaults>(&path.join("defaults.yaml"))?;
        Self::validate_defaults(&defaults)?;

        Ok(Self {
            config: CalculatorConfig::new(metadata, defaults),
        })
    }

    /// Returns the built-in configuration without touching the filesystem.
    ///
    /// The defaults match the values the calculator form starts with: a
    /// transform amount of 425 and a GOSI factor of 106.
    pub fn builtin() -> Self {
        let metadata = CalculatorMetadata {
            code: "builtin".to_string(),
            name: "Salary Calculator".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            currency: "SAR".to_string(),
        };
        Self {
            config: CalculatorConfig::new(metadata, FormDefaults::default()),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Rejects defaults a form could never have been seeded with.
    fn validate_defaults(defaults: &FormDefaults) -> EngineResult<()> {
        check_transform_amount(
            CalculationPolicy::Simple,
            defaults.simple.transform_amount,
        )?;
        check_transform_amount(
            CalculationPolicy::Extended,
            defaults.extended.transform_amount,
        )?;

        if defaults.extended.gosi_factor.is_sign_negative() {
            return Err(EngineError::InvalidConfig {
                field: "extended.gosi_factor".to_string(),
                message: format!("must not be negative, got {}", defaults.extended.gosi_factor),
            });
        }

        Ok(())
    }

    /// Returns the underlying calculator configuration.
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Returns the calculator metadata.
    pub fn metadata(&self) -> &CalculatorMetadata {
        self.config.metadata()
    }

    /// Returns the form defaults for all policies.
    pub fn defaults(&self) -> &FormDefaults {
        self.config.defaults()
    }
}

fn check_transform_amount(policy: CalculationPolicy, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ONE {
        return Err(EngineError::InvalidConfig {
            field: format!("{}.transform_amount", policy),
            message: format!("must be at least 1, got {}", value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/default")
    }

    /// Writes a throwaway config directory under the system temp dir.
    fn write_config(name: &str, calculator: &str, defaults: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("salary-calculator-config-{}", std::process::id()))
            .join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("calculator.yaml"), calculator).unwrap();
        fs::write(dir.join("defaults.yaml"), defaults).unwrap();
        dir
    }

    const CALCULATOR_YAML: &str = "code: test\nname: Test\nversion: \"1\"\ncurrency: SAR\n";

    #[test]
    fn test_load_valid_config() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.metadata().code, "sa-default");
        assert_eq!(loader.metadata().currency, "SAR");
    }

    #[test]
    fn test_loaded_defaults_match_form_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let defaults = loader.defaults();
        assert_eq!(defaults.simple.transform_amount, Decimal::from(425));
        assert_eq!(defaults.extended.transform_amount, Decimal::from(425));
        assert_eq!(defaults.extended.gosi_factor, Decimal::from(106));
        assert!(!defaults.extended.transportation_allowance);
    }

    #[test]
    fn test_builtin_matches_shipped_defaults() {
        let loaded = ConfigLoader::load(config_path()).unwrap();
        let builtin = ConfigLoader::builtin();
        assert_eq!(loaded.defaults(), builtin.defaults());
    }

    #[test]
    fn test_missing_directory_returns_config_not_found() {
        let result = ConfigLoader::load("/nonexistent/path");
        match result.unwrap_err() {
            EngineError::ConfigNotFound { path } => {
                assert!(path.contains("calculator.yaml"));
            }
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = write_config("invalid-yaml", CALCULATOR_YAML, "simple: [unclosed");
        match ConfigLoader::load(&dir).unwrap_err() {
            EngineError::ConfigParseError { path, .. } => {
                assert!(path.contains("defaults.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_transform_default_is_rejected() {
        let defaults = "simple:\n  transform_amount: \"0\"\nextended:\n  transform_amount: \"425\"\n  gosi_factor: \"106\"\n";
        let dir = write_config("zero-transform", CALCULATOR_YAML, defaults);
        match ConfigLoader::load(&dir).unwrap_err() {
            EngineError::InvalidConfig { field, .. } => {
                assert_eq!(field, "simple.transform_amount");
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_gosi_factor_is_rejected() {
        let defaults = "simple:\n  transform_amount: \"425\"\nextended:\n  transform_amount: \"425\"\n  gosi_factor: \"-1\"\n";
        let dir = write_config("negative-gosi", CALCULATOR_YAML, defaults);
        match ConfigLoader::load(&dir).unwrap_err() {
            EngineError::InvalidConfig { field, message } => {
                assert_eq!(field, "extended.gosi_factor");
                assert!(message.contains("-1"));
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_transportation_allowance_defaults_to_false() {
        let defaults = "simple:\n  transform_amount: \"1\"\nextended:\n  transform_amount: \"3.75\"\n  gosi_factor: \"0\"\n";
        let dir = write_config("no-transport", CALCULATOR_YAML, defaults);
        let loader = ConfigLoader::load(&dir).unwrap();
        assert!(!loader.defaults().extended.transportation_allowance);
        assert_eq!(
            loader.defaults().extended.transform_amount,
            Decimal::new(375, 2)
        );
    }
}

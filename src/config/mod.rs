//! Configuration loading and management for the salary calculator.
//!
//! This module loads calculator metadata and per-policy form defaults from
//! YAML files. Formula constants are fixed in code and not configurable.
//!
//! # Example
//!
//! ```no_run
//! use salary_calculator::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded calculator: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CalculatorConfig, CalculatorMetadata, ExtendedDefaults, FormDefaults, SimpleDefaults,
};

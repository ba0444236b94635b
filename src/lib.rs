//! Salary breakdown engine.
//!
//! This crate turns a gross salary and a handful of auxiliary figures
//! (overtime, time deductions, a transform amount and a GOSI factor) into a
//! breakdown of base salary, allowances, overtime pay, insurance and time
//! deductions, and net salary. Two formula sets are provided, selected
//! through [`calculation::CalculationPolicy`], along with the `HH:MM` time
//! parsing the extended set relies on and an HTTP API around both.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

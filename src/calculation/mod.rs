//! Calculation logic for the salary calculator.
//!
//! This module contains the time-string parser, the shared two-decimal
//! rounding, rate derivation over a 30-day month of 8-hour days, the GOSI
//! deduction, and the two formula sets (simple and extended) selected through
//! [`CalculationPolicy`].

mod extended;
mod gosi;
mod policy;
mod rounding;
mod simple;
mod time_parser;
mod work_month;

pub use extended::{
    ALLOWANCE_RATIO, EXTENDED_BASE_SALARY_DIVISOR, TRANSPORTATION_ALLOWANCE, calculate_allowances,
    calculate_extended, calculate_extended_base_salary,
};
pub use gosi::{FIXED_GOSI_FACTOR, GOSI_RATE, calculate_gosi, checked_gosi};
pub use policy::CalculationPolicy;
pub use rounding::{ROUNDING_EPSILON, ZERO_AMOUNT, checked_round2, round2};
pub use simple::{SIMPLE_BASE_SALARY_RATIO, calculate_simple, calculate_simple_base_salary};
pub use time_parser::{MAX_MINUTE, MINUTES_PER_HOUR, format_time_input, parse_time_to_minutes};
pub use work_month::{
    DAYS_PER_MONTH, DOUBLE_OVERTIME_MULTIPLIER, HOURS_PER_DAY, SINGLE_OVERTIME_MULTIPLIER,
    calculate_time_deduction, hourly_amount, per_minute_amount,
};

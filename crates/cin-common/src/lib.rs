//! Shared utilities for CIN validator crates.
//!
//! This crate provides Polars cell helpers and the census calendar used
//! across the workspace.

pub mod period;
pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use period::{
    CensusPeriod, add_working_days, census_period, census_period_for_year, is_working_day,
    reference_date_for_year, working_days_between,
};
pub use polars::{
    any_to_date, any_to_flag, any_to_i64, any_to_string, any_to_string_non_empty, format_numeric,
    parse_date, parse_flag, parse_i64,
};

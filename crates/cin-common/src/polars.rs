//! Polars AnyValue utility functions.
//!
//! Census tables arrive either typed (dates as `Date`, flags as `Boolean`) or
//! as raw strings straight from CSV. These helpers read a cell the same way in
//! both cases.

use chrono::{DateTime, NaiveDate};
use polars::prelude::*;

/// Date layouts accepted in string cells.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null`, properly formats numeric types without
/// unnecessary trailing zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use cin_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_string(AnyValue::String("N4")), "N4");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => if b { "true" } else { "false" }.to_string(),
        AnyValue::Date(_) | AnyValue::Datetime(..) => any_to_date(value)
            .map(|date| date.to_string())
            .unwrap_or_default(),
        other => other.to_string(),
    }
}

/// Converts `AnyValue` to a trimmed `String`, returning `None` if the result is empty.
pub fn any_to_string_non_empty(value: AnyValue<'_>) -> Option<String> {
    let s = any_to_string(value);
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use cin_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Converts an `AnyValue` to `i64`, returning `None` for non-integer or null values.
pub fn any_to_i64(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(i64::from(v)),
        AnyValue::Int16(v) => Some(i64::from(v)),
        AnyValue::Int32(v) => Some(i64::from(v)),
        AnyValue::Int64(v) => Some(v),
        AnyValue::UInt8(v) => Some(i64::from(v)),
        AnyValue::UInt16(v) => Some(i64::from(v)),
        AnyValue::UInt32(v) => Some(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).ok(),
        AnyValue::Float32(v) => Some(v as i64),
        AnyValue::Float64(v) => Some(v as i64),
        AnyValue::String(s) => parse_i64(s),
        AnyValue::StringOwned(s) => parse_i64(&s),
        _ => None,
    }
}

/// Parses a string as `i64`, returning `None` for invalid or empty strings.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// Converts an `AnyValue` to a calendar date.
///
/// Accepts `Date` and `Datetime` cells and strings in any of the layouts the
/// census files use. Anything else, including unparseable text, is `None`.
pub fn any_to_date(value: AnyValue<'_>) -> Option<NaiveDate> {
    match value {
        AnyValue::Date(days) => {
            DateTime::from_timestamp(i64::from(days) * 86_400, 0).map(|dt| dt.date_naive())
        }
        AnyValue::Datetime(v, unit, _) => {
            let dt = match unit {
                TimeUnit::Milliseconds => DateTime::from_timestamp_millis(v),
                TimeUnit::Microseconds => DateTime::from_timestamp_micros(v),
                TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(v)),
            };
            dt.map(|dt| dt.date_naive())
        }
        AnyValue::String(s) => parse_date(s),
        AnyValue::StringOwned(s) => parse_date(&s),
        _ => None,
    }
}

/// Parses a date string, returning `None` for empty or malformed input.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(trimmed, format)
            .ok()
            .or_else(|| {
                chrono::NaiveDateTime::parse_from_str(trimmed, format)
                    .ok()
                    .map(|dt| dt.date())
            })
    })
}

/// Converts an `AnyValue` to a yes/no flag.
///
/// The census encodes booleans as `true`/`false`, `1`/`0` or `Y`/`N`.
pub fn any_to_flag(value: AnyValue<'_>) -> Option<bool> {
    match value {
        AnyValue::Boolean(b) => Some(b),
        AnyValue::Null => None,
        other => parse_flag(&any_to_string(other)),
    }
}

/// Parses a flag string, returning `None` when it is empty or unrecognised.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "y" | "yes" => Some(true),
        "false" | "0" | "n" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_any_to_string_null() {
        assert_eq!(any_to_string(AnyValue::Null), "");
    }

    #[test]
    fn test_any_to_string_numbers() {
        assert_eq!(any_to_string(AnyValue::Int64(-100)), "-100");
        assert_eq!(any_to_string(AnyValue::Float64(1.5)), "1.5");
        assert_eq!(any_to_string(AnyValue::Float64(10.0)), "10");
    }

    #[test]
    fn test_any_to_string_date() {
        // 2022-03-31 is 19082 days after the epoch.
        assert_eq!(any_to_string(AnyValue::Date(19082)), "2022-03-31");
    }

    #[test]
    fn test_any_to_string_non_empty() {
        assert_eq!(any_to_string_non_empty(AnyValue::Null), None);
        assert_eq!(any_to_string_non_empty(AnyValue::String("  ")), None);
        assert_eq!(
            any_to_string_non_empty(AnyValue::String(" UN1 ")),
            Some("UN1".to_string())
        );
    }

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(0.25), "0.25");
    }

    #[test]
    fn test_any_to_i64() {
        assert_eq!(any_to_i64(AnyValue::Null), None);
        assert_eq!(any_to_i64(AnyValue::String("2022")), Some(2022));
        assert_eq!(any_to_i64(AnyValue::String("20x2")), None);
    }

    #[test]
    fn test_parse_date_layouts() {
        assert_eq!(parse_date("2022-03-31"), Some(ymd(2022, 3, 31)));
        assert_eq!(parse_date("31/03/2022"), Some(ymd(2022, 3, 31)));
        assert_eq!(parse_date("2022-03-31T10:15:00"), Some(ymd(2022, 3, 31)));
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2022-02-30"), None);
    }

    #[test]
    fn test_any_to_date() {
        assert_eq!(any_to_date(AnyValue::Date(0)), Some(ymd(1970, 1, 1)));
        assert_eq!(any_to_date(AnyValue::Date(19082)), Some(ymd(2022, 3, 31)));
        assert_eq!(
            any_to_date(AnyValue::Datetime(
                1_648_684_800_000,
                TimeUnit::Milliseconds,
                None
            )),
            Some(ymd(2022, 3, 31))
        );
        assert_eq!(
            any_to_date(AnyValue::String("2021-11-30")),
            Some(ymd(2021, 11, 30))
        );
        assert_eq!(any_to_date(AnyValue::Null), None);
        assert_eq!(any_to_date(AnyValue::Int32(5)), None);
    }

    #[test]
    fn test_flags() {
        assert_eq!(any_to_flag(AnyValue::Boolean(true)), Some(true));
        assert_eq!(any_to_flag(AnyValue::String("false")), Some(false));
        assert_eq!(any_to_flag(AnyValue::String("1")), Some(true));
        assert_eq!(any_to_flag(AnyValue::String("N")), Some(false));
        assert_eq!(any_to_flag(AnyValue::String("maybe")), None);
        assert_eq!(any_to_flag(AnyValue::Null), None);
    }
}

//! Typed cell validator.
//!
//! A cell value is checked against its declared column type and converted to
//! its canonical form (e.g. the string "5" becomes the JSON integer 5 in an
//! integer column). Validation is pure and deterministic: no shared state is
//! touched, and null passes through unchanged for every type, representing
//! "no value".

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Number, Value};

use super::types::ColumnType;

/// Marker for a cell that failed validation.
///
/// The offending column name is attached by the caller, which knows which
/// cell it was validating; collecting every failing column into one error is
/// the row layer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidValue;

/// Validates a single cell against a column type.
///
/// Returns the canonical converted value on success. Null always passes.
pub fn validate_cell(value: &Value, column_type: ColumnType) -> Result<Value, InvalidValue> {
    if value.is_null() {
        return Ok(Value::Null);
    }

    match column_type {
        ColumnType::Integer => validate_integer(value),
        ColumnType::Real => validate_real(value),
        ColumnType::Char => validate_char(value),
        ColumnType::String => Ok(Value::String(coerce_text(value))),
        ColumnType::Time => {
            let s = value.as_str().ok_or(InvalidValue)?;
            time_to_seconds(s).ok_or(InvalidValue)?;
            Ok(Value::String(s.to_string()))
        }
        ColumnType::TimeInterval => validate_interval(value),
    }
}

/// Total seconds since midnight for a valid `H{1,3}:MM:SS` string.
///
/// Returns None for any other shape, or when minutes or seconds reach 60.
pub(crate) fn time_to_seconds(s: &str) -> Option<u64> {
    let caps = time_pattern().captures(s)?;
    let hours: u64 = caps[1].parse().ok()?;
    let minutes: u64 = caps[2].parse().ok()?;
    let seconds: u64 = caps[3].parse().ok()?;
    if minutes >= 60 || seconds >= 60 {
        return None;
    }
    Some(hours * 3600 + minutes * 60 + seconds)
}

fn time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d{1,3}):(\d{2}):(\d{2})$").expect("valid pattern"))
}

/// Integer cells must be losslessly representable as i64: JSON integers pass,
/// floats only with a zero fractional part, strings must parse.
fn validate_integer(value: &Value) -> Result<Value, InvalidValue> {
    match value {
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                return Ok(value.clone());
            }
            let f = n.as_f64().ok_or(InvalidValue)?;
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                Ok(Value::Number(Number::from(f as i64)))
            } else {
                Err(InvalidValue)
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(|n| Value::Number(Number::from(n)))
            .map_err(|_| InvalidValue),
        _ => Err(InvalidValue),
    }
}

fn validate_real(value: &Value) -> Result<Value, InvalidValue> {
    match value {
        Value::Number(_) => Ok(value.clone()),
        Value::String(s) => {
            let f: f64 = s.trim().parse().map_err(|_| InvalidValue)?;
            // from_f64 rejects NaN and infinities, which JSON cannot carry
            Number::from_f64(f).map(Value::Number).ok_or(InvalidValue)
        }
        _ => Err(InvalidValue),
    }
}

fn validate_char(value: &Value) -> Result<Value, InvalidValue> {
    let s = value.as_str().ok_or(InvalidValue)?;
    if s.chars().count() == 1 {
        Ok(value.clone())
    } else {
        Err(InvalidValue)
    }
}

fn validate_interval(value: &Value) -> Result<Value, InvalidValue> {
    let s = value.as_str().ok_or(InvalidValue)?;
    let (start, end) = s.split_once('-').ok_or(InvalidValue)?;
    let start_seconds = time_to_seconds(start).ok_or(InvalidValue)?;
    let end_seconds = time_to_seconds(end).ok_or(InvalidValue)?;
    if end_seconds < start_seconds {
        return Err(InvalidValue);
    }
    Ok(Value::String(s.to_string()))
}

/// String cells accept any scalar, coerced to its textual form.
fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_passes_for_every_type() {
        for column_type in [
            ColumnType::Integer,
            ColumnType::Real,
            ColumnType::Char,
            ColumnType::String,
            ColumnType::Time,
            ColumnType::TimeInterval,
        ] {
            assert_eq!(validate_cell(&Value::Null, column_type), Ok(Value::Null));
        }
    }

    #[test]
    fn test_integer_from_string() {
        assert_eq!(
            validate_cell(&json!("5"), ColumnType::Integer),
            Ok(json!(5))
        );
        assert!(validate_cell(&json!("abc"), ColumnType::Integer).is_err());
        assert!(validate_cell(&json!("5.5"), ColumnType::Integer).is_err());
    }

    #[test]
    fn test_integer_rejects_fractional_float() {
        assert_eq!(
            validate_cell(&json!(5.0), ColumnType::Integer),
            Ok(json!(5))
        );
        assert!(validate_cell(&json!(5.9), ColumnType::Integer).is_err());
    }

    #[test]
    fn test_real_from_string() {
        assert_eq!(
            validate_cell(&json!("2.5"), ColumnType::Real),
            Ok(json!(2.5))
        );
        assert!(validate_cell(&json!("two"), ColumnType::Real).is_err());
    }

    #[test]
    fn test_char_exactly_one_code_point() {
        assert_eq!(validate_cell(&json!("x"), ColumnType::Char), Ok(json!("x")));
        assert_eq!(validate_cell(&json!("ü"), ColumnType::Char), Ok(json!("ü")));
        assert!(validate_cell(&json!("xy"), ColumnType::Char).is_err());
        assert!(validate_cell(&json!(""), ColumnType::Char).is_err());
    }

    #[test]
    fn test_string_coerces_scalars() {
        assert_eq!(
            validate_cell(&json!(42), ColumnType::String),
            Ok(json!("42"))
        );
        assert_eq!(
            validate_cell(&json!("hi"), ColumnType::String),
            Ok(json!("hi"))
        );
    }

    #[test]
    fn test_time_shapes() {
        assert!(validate_cell(&json!("1:00:00"), ColumnType::Time).is_ok());
        assert!(validate_cell(&json!("23:59:59"), ColumnType::Time).is_ok());
        assert!(validate_cell(&json!("123:00:01"), ColumnType::Time).is_ok());
        assert!(validate_cell(&json!("1234:00:00"), ColumnType::Time).is_err());
        assert!(validate_cell(&json!("1:0:00"), ColumnType::Time).is_err());
        assert!(validate_cell(&json!("1:60:00"), ColumnType::Time).is_err());
        assert!(validate_cell(&json!("1:00:60"), ColumnType::Time).is_err());
        assert!(validate_cell(&json!("noon"), ColumnType::Time).is_err());
    }

    #[test]
    fn test_time_returns_same_string() {
        assert_eq!(
            validate_cell(&json!("09:05:30"), ColumnType::Time),
            Ok(json!("09:05:30"))
        );
    }

    #[test]
    fn test_interval_requires_non_negative_duration() {
        assert!(validate_cell(&json!("1:00:00-2:00:00"), ColumnType::TimeInterval).is_ok());
        assert!(validate_cell(&json!("1:00:00-1:00:00"), ColumnType::TimeInterval).is_ok());
        assert!(validate_cell(&json!("2:00:00-1:00:00"), ColumnType::TimeInterval).is_err());
    }

    #[test]
    fn test_interval_both_halves_must_be_times() {
        assert!(validate_cell(&json!("1:00:00-late"), ColumnType::TimeInterval).is_err());
        assert!(validate_cell(&json!("early-2:00:00"), ColumnType::TimeInterval).is_err());
        assert!(validate_cell(&json!("1:00:00"), ColumnType::TimeInterval).is_err());
    }

    #[test]
    fn test_time_to_seconds() {
        assert_eq!(time_to_seconds("1:02:03"), Some(3723));
        assert_eq!(time_to_seconds("0:00:00"), Some(0));
        assert_eq!(time_to_seconds("0:60:00"), None);
    }
}

//! Column type definitions.
//!
//! Supported column types:
//! - integer: 64-bit signed integer
//! - real: 64-bit floating point
//! - char: exactly one code point
//! - string: UTF-8 string
//! - time: `H{1,3}:MM:SS` with minutes and seconds below 60
//! - timeInvl: two times joined by `-` with non-negative duration

use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::DbError;

/// Ordered column-name to column-type mapping owned by a table.
///
/// Insertion order is preserved and observable in snapshots and column
/// listings.
pub type Schema = IndexMap<String, ColumnType>;

/// Supported column types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// 64-bit signed integer
    #[serde(rename = "integer")]
    Integer,
    /// 64-bit floating point
    #[serde(rename = "real")]
    Real,
    /// Exactly one code point
    #[serde(rename = "char")]
    Char,
    /// UTF-8 string
    #[serde(rename = "string")]
    String,
    /// Time of day, `H{1,3}:MM:SS`
    #[serde(rename = "time")]
    Time,
    /// Time interval, `<time>-<time>`
    #[serde(rename = "timeInvl")]
    TimeInterval,
}

impl ColumnType {
    /// Returns the serialized type name, as used in snapshots and error
    /// messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Real => "real",
            ColumnType::Char => "char",
            ColumnType::String => "string",
            ColumnType::Time => "time",
            ColumnType::TimeInterval => "timeInvl",
        }
    }
}

impl FromStr for ColumnType {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "integer" => Ok(ColumnType::Integer),
            "real" => Ok(ColumnType::Real),
            "char" => Ok(ColumnType::Char),
            "string" => Ok(ColumnType::String),
            "time" => Ok(ColumnType::Time),
            "timeInvl" => Ok(ColumnType::TimeInterval),
            other => Err(DbError::structural(format!(
                "unknown column type '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names_round_trip() {
        for column_type in [
            ColumnType::Integer,
            ColumnType::Real,
            ColumnType::Char,
            ColumnType::String,
            ColumnType::Time,
            ColumnType::TimeInterval,
        ] {
            let parsed: ColumnType = column_type.type_name().parse().unwrap();
            assert_eq!(parsed, column_type);
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result: Result<ColumnType, _> = "boolean".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_uses_snapshot_names() {
        let json = serde_json::to_string(&ColumnType::TimeInterval).unwrap();
        assert_eq!(json, "\"timeInvl\"");

        let parsed: ColumnType = serde_json::from_str("\"integer\"").unwrap();
        assert_eq!(parsed, ColumnType::Integer);
    }

    #[test]
    fn test_schema_preserves_insertion_order() {
        let mut schema = Schema::new();
        schema.insert("z".into(), ColumnType::Integer);
        schema.insert("a".into(), ColumnType::String);
        let names: Vec<_> = schema.keys().collect();
        assert_eq!(names, vec!["z", "a"]);
    }
}

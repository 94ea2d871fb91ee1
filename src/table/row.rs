//! Row record type.
//!
//! A row is a UUID identity plus an ordered column-name to value mapping.
//! Rows hold no reference to their table's schema: all validation is
//! delegated through the owning table, which passes the schema explicitly
//! per call. Every stored value is either null or has already passed
//! validation for its column's type.

use indexmap::IndexMap;
use serde_json::Value;
use uuid::Uuid;

use crate::schema::{validate_cell, Schema};

/// A single table row
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Process-wide-unique identity, stable for the row's lifetime
    id: Uuid,
    /// Validated (or null) cell values, keyed by column name
    values: IndexMap<String, Value>,
}

impl Row {
    /// Creates a row with a fresh identity from already-validated values.
    pub(crate) fn new(values: IndexMap<String, Value>) -> Self {
        Self {
            id: Uuid::new_v4(),
            values,
        }
    }

    /// Reconstructs a row from persisted parts; values are re-validated by
    /// the caller afterwards.
    pub(crate) fn from_parts(id: Uuid, values: IndexMap<String, Value>) -> Self {
        Self { id, values }
    }

    /// Returns the row identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the full value mapping.
    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    /// Returns the value for one column, if the row carries that key.
    pub fn value(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// True when every stored value is null (or the row has no values left).
    pub fn is_all_null(&self) -> bool {
        self.values.values().all(Value::is_null)
    }

    /// Atomically replaces the stored values with a validated trial copy.
    pub(crate) fn replace_values(&mut self, values: IndexMap<String, Value>) {
        self.values = values;
    }

    /// Inserts a null cell for a newly added column.
    pub(crate) fn insert_null(&mut self, column: &str) {
        self.values.insert(column.to_string(), Value::Null);
    }

    /// Removes the cell for a deleted column, if present.
    pub(crate) fn remove_column(&mut self, column: &str) {
        self.values.shift_remove(column);
    }

    /// Best-effort in-place re-validation of all current values.
    ///
    /// Each cell that validates is replaced with its canonical converted
    /// form; each that fails is reported. Cells whose column is absent from
    /// `types` are reported as well. There is no rollback on partial
    /// success: this is the load-time reconciliation path, distinct from the
    /// atomic mutation path in [`Table`](super::Table).
    pub fn validate(&mut self, types: &Schema) -> Vec<String> {
        validate_values_in_place(&mut self.values, types)
    }
}

/// Shared validation loop for a value mapping: canonicalize what passes,
/// collect the column names of everything that fails.
pub(crate) fn validate_values_in_place(
    values: &mut IndexMap<String, Value>,
    types: &Schema,
) -> Vec<String> {
    let mut invalid = Vec::new();
    for (column, value) in values.iter_mut() {
        let Some(&column_type) = types.get(column) else {
            invalid.push(column.clone());
            continue;
        };
        match validate_cell(value, column_type) {
            Ok(canonical) => *value = canonical,
            Err(_) => invalid.push(column.clone()),
        }
    }
    invalid
}

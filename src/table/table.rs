//! Table: an ordered column schema plus a collection of rows.
//!
//! The table owns both the schema and the rows and is the only mutation
//! path, so every row always conforms to the current schema. Row mutation
//! is atomic: a trial value map is normalized and validated in full before
//! anything stored changes. Column deletion is best-effort by design and
//! cascades: rows left with nothing but nulls are removed.

use indexmap::IndexMap;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::schema::{ColumnType, Schema};

use super::row::{validate_values_in_place, Row};

/// A named table with a typed column schema and uuid-keyed rows
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: Schema,
    rows: IndexMap<Uuid, Row>,
}

impl Table {
    /// Creates an empty table. Name validity is the database's concern.
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Schema::new(),
            rows: IndexMap::new(),
        }
    }

    /// Reconstructs a table from snapshot parts.
    pub(crate) fn from_parts(name: String, columns: Schema, rows: IndexMap<Uuid, Row>) -> Self {
        Self {
            name,
            columns,
            rows,
        }
    }

    /// Returns the table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the column schema, in declaration order.
    pub fn columns(&self) -> &Schema {
        &self.columns
    }

    /// Iterates rows in insertion order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.values()
    }

    /// Looks up a row by identifier.
    pub fn row(&self, id: Uuid) -> Option<&Row> {
        self.rows.get(&id)
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Adds a column to the schema; every existing row gains the new key
    /// with a null value.
    pub fn add_column(&mut self, name: &str, column_type: ColumnType) -> DbResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DbError::structural("column name must not be empty"));
        }
        if self.columns.contains_key(name) {
            return Err(DbError::already_exists(format!(
                "column '{name}' in table '{}'",
                self.name
            )));
        }
        self.columns.insert(name.to_string(), column_type);
        for row in self.rows.values_mut() {
            row.insert_null(name);
        }
        Ok(())
    }

    /// Removes a column from the schema and from every row; rows left with
    /// all-null values are deleted. Returns false (non-fatal) when the
    /// column does not exist.
    pub fn delete_column(&mut self, name: &str) -> bool {
        if self.columns.shift_remove(name).is_none() {
            return false;
        }
        let mut emptied = Vec::new();
        for (id, row) in self.rows.iter_mut() {
            row.remove_column(name);
            if row.is_all_null() {
                emptied.push(*id);
            }
        }
        for id in emptied {
            self.rows.shift_remove(&id);
        }
        true
    }

    /// Validates and inserts a new row, returning its generated identifier.
    ///
    /// The raw values go through schema-membership checks, emptiness
    /// normalization and all-empty detection, then full validation; any
    /// failure leaves the table unchanged.
    pub fn add_row(&mut self, raw: &IndexMap<String, Value>) -> DbResult<Uuid> {
        if self.columns.is_empty() {
            return Err(DbError::structural(format!(
                "cannot add a row to table '{}': no columns defined",
                self.name
            )));
        }
        let trial = self.build_trial_values(raw)?;
        let row = Row::new(trial);
        let id = row.id();
        self.rows.insert(id, row);
        Ok(id)
    }

    /// Atomically replaces a row's values.
    ///
    /// Either every supplied cell normalizes and validates and the stored
    /// values are replaced wholesale, or nothing changes.
    pub fn edit_row(&mut self, id: Uuid, raw: &IndexMap<String, Value>) -> DbResult<()> {
        if !self.rows.contains_key(&id) {
            return Err(DbError::not_found(format!(
                "row '{id}' in table '{}'",
                self.name
            )));
        }
        let trial = self.build_trial_values(raw)?;
        if let Some(row) = self.rows.get_mut(&id) {
            row.replace_values(trial);
        }
        Ok(())
    }

    /// Deletes a row by identifier.
    pub fn delete_row(&mut self, id: Uuid) -> DbResult<()> {
        self.rows
            .shift_remove(&id)
            .map(|_| ())
            .ok_or_else(|| DbError::not_found(format!("row '{id}' in table '{}'", self.name)))
    }

    /// Structural difference: every row of `self` whose full value mapping
    /// has no exact match among `other`'s rows, in `self`'s iteration order.
    ///
    /// Both tables must carry identical schemas, and a table cannot be
    /// compared to itself.
    pub fn difference<'a>(&'a self, other: &Table) -> DbResult<Vec<&'a Row>> {
        if self.columns != other.columns {
            return Err(DbError::structural(format!(
                "tables '{}' and '{}' have different schemas",
                self.name, other.name
            )));
        }
        if self.name == other.name {
            return Err(DbError::structural(
                "cannot compare a table with itself; choose two different tables",
            ));
        }
        Ok(self
            .rows
            .values()
            .filter(|row| {
                !other
                    .rows
                    .values()
                    .any(|candidate| candidate.values() == row.values())
            })
            .collect())
    }

    /// Builds the validated trial value map shared by row insertion and
    /// editing: membership check, normalization, all-empty detection, then
    /// full validation with every offending column collected.
    fn build_trial_values(&self, raw: &IndexMap<String, Value>) -> DbResult<IndexMap<String, Value>> {
        let mut trial = IndexMap::with_capacity(raw.len());
        let mut all_null = true;
        for (column, value) in raw {
            let Some(&column_type) = self.columns.get(column) else {
                return Err(DbError::not_found(format!(
                    "column '{column}' in table '{}'",
                    self.name
                )));
            };
            let normalized = normalize_cell(value, column_type);
            if !normalized.is_null() {
                all_null = false;
            }
            trial.insert(column.clone(), normalized);
        }
        if all_null {
            return Err(DbError::AllFieldsEmpty);
        }

        let invalid = validate_values_in_place(&mut trial, &self.columns);
        if !invalid.is_empty() {
            return Err(DbError::validation(invalid));
        }
        Ok(trial)
    }
}

/// Type-aware emptiness normalization, applied before validation.
///
/// Textual input is trimmed; anything that trims to nothing stores null.
/// A time interval whose two halves are both empty ("-") stores null as
/// well. Non-string values pass through untouched.
fn normalize_cell(value: &Value, column_type: ColumnType) -> Value {
    let Value::String(s) = value else {
        return value.clone();
    };
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if column_type == ColumnType::TimeInterval {
        if let Some((start, end)) = trimmed.split_once('-') {
            if start.trim().is_empty() && end.trim().is_empty() {
                return Value::Null;
            }
        }
    }
    Value::String(trimmed.to_string())
}

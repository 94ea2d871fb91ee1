//! Whole-database JSON snapshots.
//!
//! The persisted document is exactly:
//!
//! ```text
//! {
//!   "name": "<database name>",
//!   "tables": {
//!     "<table name>": {
//!       "columns": { "<col>": "<TypeName>", ... },
//!       "rows": {
//!         "<row uuid>": {
//!           "values": { "<col>": <json value or null>, ... },
//!           "column_types": { "<col>": "<TypeName>", ... }
//!         }, ...
//!       }
//!     }, ...
//!   }
//! }
//! ```
//!
//! Save emits the full current state and never partially succeeds except on
//! I/O. Load is best-effort per row: each persisted row is re-validated
//! against its own `column_types`, and rows with any invalid column are
//! dropped while the load continues. Every drop is recorded in the returned
//! [`LoadReport`] so callers can surface what was lost.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::DbResult;
use crate::schema::Schema;
use crate::table::{Row, Table};

use super::database::Database;

/// Serialized form of a whole database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSnapshot {
    /// Database name
    pub name: String,
    /// Tables keyed by name
    pub tables: IndexMap<String, TableSnapshot>,
}

/// Serialized form of one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Column schema, in declaration order
    pub columns: Schema,
    /// Rows keyed by canonical UUID string
    pub rows: IndexMap<Uuid, RowSnapshot>,
}

/// Serialized form of one row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowSnapshot {
    /// Cell values, possibly null
    pub values: IndexMap<String, Value>,
    /// The column schema the row was validated against at save time
    pub column_types: Schema,
}

/// Outcome of a snapshot load: which rows were dropped, and why
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Rows that failed re-validation and were not loaded
    pub dropped: Vec<DroppedRow>,
}

impl LoadReport {
    /// True when no rows were dropped.
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// One row dropped during load
#[derive(Debug)]
pub struct DroppedRow {
    /// Owning table name
    pub table: String,
    /// Identifier of the dropped row
    pub row_id: Uuid,
    /// Columns whose values failed re-validation
    pub columns: Vec<String>,
}

impl Database {
    /// Emits the full current state as a snapshot document.
    pub fn to_snapshot(&self) -> DatabaseSnapshot {
        let tables = self
            .tables()
            .map(|table| {
                let rows = table
                    .rows()
                    .map(|row| {
                        let snapshot = RowSnapshot {
                            values: row.values().clone(),
                            column_types: table.columns().clone(),
                        };
                        (row.id(), snapshot)
                    })
                    .collect();
                let snapshot = TableSnapshot {
                    columns: table.columns().clone(),
                    rows,
                };
                (table.name().to_string(), snapshot)
            })
            .collect();
        DatabaseSnapshot {
            name: self.name().to_string(),
            tables,
        }
    }

    /// Reconstructs a database from a snapshot document.
    ///
    /// Never fails: rows that no longer validate are dropped and reported,
    /// not raised, favoring availability of the rest of the dataset.
    pub fn from_snapshot(snapshot: DatabaseSnapshot) -> (Database, LoadReport) {
        let mut report = LoadReport::default();
        let mut tables = IndexMap::with_capacity(snapshot.tables.len());
        for (table_name, table_snapshot) in snapshot.tables {
            let mut rows = IndexMap::with_capacity(table_snapshot.rows.len());
            for (row_id, row_snapshot) in table_snapshot.rows {
                let mut row = Row::from_parts(row_id, row_snapshot.values);
                let invalid = row.validate(&row_snapshot.column_types);
                if invalid.is_empty() {
                    rows.insert(row_id, row);
                } else {
                    report.dropped.push(DroppedRow {
                        table: table_name.clone(),
                        row_id,
                        columns: invalid,
                    });
                }
            }
            let table = Table::from_parts(table_name.clone(), table_snapshot.columns, rows);
            tables.insert(table_name, table);
        }
        (Database::from_parts(snapshot.name, tables), report)
    }

    /// Saves the full current state as pretty-printed JSON.
    pub fn save_to_file(&self, path: &Path) -> DbResult<()> {
        let content = serde_json::to_string_pretty(&self.to_snapshot())?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Loads a database from a snapshot file.
    pub fn load_from_file(path: &Path) -> DbResult<(Database, LoadReport)> {
        let content = fs::read_to_string(path)?;
        let snapshot: DatabaseSnapshot = serde_json::from_str(&content)?;
        Ok(Database::from_snapshot(snapshot))
    }
}

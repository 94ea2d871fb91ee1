//! Rows and tables.
//!
//! The table is the single mutation path for both its schema and its rows,
//! which keeps every row consistent with the current schema:
//!
//! - Row mutation is atomic (all cells validate, or nothing changes)
//! - Adding a column backfills null into every row
//! - Deleting a column cascades, removing rows left all-null

mod row;
mod table;

pub use row::Row;
pub use table::Table;

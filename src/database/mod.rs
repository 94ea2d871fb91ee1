//! Databases, snapshots, and the database registry.

mod database;
mod registry;
mod snapshot;

pub use database::Database;
pub use registry::DatabaseRegistry;
pub use snapshot::{DatabaseSnapshot, DroppedRow, LoadReport, RowSnapshot, TableSnapshot};

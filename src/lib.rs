//! celldb - a schema-typed, in-memory tabular data store
//!
//! Named tables carry a fixed, ordered, typed column schema; every row's
//! cells must conform to that schema. The crate covers typed-cell
//! validation, the table-mutation protocol that keeps rows and schema
//! consistent, structural table difference, and whole-database JSON
//! snapshots. Transport layers live elsewhere and map [`error::DbError`]
//! variants to their own statuses.

pub mod database;
pub mod error;
pub mod observability;
pub mod schema;
pub mod table;

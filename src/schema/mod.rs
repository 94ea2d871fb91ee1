//! Column typing and cell validation subsystem.
//!
//! # Design Principles
//!
//! - Column types form a closed sum type; the validator is one exhaustive
//!   match, so a new type is a compiler-checked single-point change
//! - Validation is pure and deterministic
//! - Null always passes; emptiness normalization happens before validation,
//!   at the table layer

mod types;
mod validator;

pub use types::{ColumnType, Schema};
pub use validator::{validate_cell, InvalidValue};

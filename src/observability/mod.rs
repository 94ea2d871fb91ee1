//! Structured logging for lifecycle events.
//!
//! The store itself stays silent; only the registry logs, and only for
//! events a caller cannot otherwise see (snapshot loads, dropped rows).

mod logger;

pub use logger::{Logger, Severity};

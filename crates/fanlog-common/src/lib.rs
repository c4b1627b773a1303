//! fanlog common types.
//!
//! This crate provides the types shared by the redaction engine and the
//! logging core:
//! - Ordered severity levels
//! - Typed field values with a closed set of variants
//! - Immutable log records

pub mod field;
pub mod level;
pub mod record;

pub use field::{merge_fields, Field, FieldValue};
pub use level::Level;
pub use record::Record;

/// Key of the context field that carries a logger's hierarchical name.
pub const LOGGER_FIELD: &str = "logger";

/// Sentinel written in place of a redacted field value.
pub const REDACTED_SENTINEL: &str = "***REDACTED***";

//! Immutable log records.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{Field, Level};

/// A single log entry, built once per logging call and shared by every sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// When the record was created.
    pub timestamp: DateTime<Utc>,

    /// Severity.
    pub level: Level,

    /// Hierarchical logger name (dot-joined).
    pub logger: String,

    /// Message, already redacted.
    pub message: String,

    /// Context and call-site fields; keys are unique.
    pub fields: Vec<Field>,
}

impl Record {
    /// Create a record stamped with the current time.
    pub fn new(
        level: Level,
        logger: impl Into<String>,
        message: impl Into<String>,
        fields: Vec<Field>,
    ) -> Self {
        Record {
            timestamp: Utc::now(),
            level,
            logger: logger.into(),
            message: message.into(),
            fields,
        }
    }

    /// Look up a field by key.
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Copy of this record with a different field list.
    pub fn with_fields(&self, fields: Vec<Field>) -> Self {
        Record {
            timestamp: self.timestamp,
            level: self.level,
            logger: self.logger.clone(),
            message: self.message.clone(),
            fields,
        }
    }
}

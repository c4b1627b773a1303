//! Error types for the logging core.
//!
//! Every failure a caller can observe is one of these variants. Codes are
//! stable and grouped by category:
//! - 10-19: Sink errors
//! - 20-29: Redaction errors
//! - 30-39: Configuration errors
//! - 40-49: I/O errors

use std::path::PathBuf;

use fanlog_redact::RedactionError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for logging operations.
pub type Result<T> = std::result::Result<T, LogError>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Sink creation and delivery.
    Sink,
    /// Redaction rule registration.
    Redaction,
    /// Configuration loading.
    Config,
    /// Other file I/O.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Sink => write!(f, "sink"),
            ErrorCategory::Redaction => write!(f, "redaction"),
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for fanlog.
#[derive(Error, Debug)]
pub enum LogError {
    // Sink errors (10-19)
    /// The destination could not be opened. Only this sink is affected.
    #[error("failed to open log destination {}: {source}", path.display())]
    SinkCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A registered sink failed to persist a record.
    #[error("sink '{sink}' failed to write: {source}")]
    SinkWrite {
        sink: String,
        #[source]
        source: std::io::Error,
    },

    // Redaction errors (20-29)
    #[error("redaction error: {0}")]
    Redaction(#[from] RedactionError),

    // Configuration errors (30-39)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid configuration file {}: {reason}", path.display())]
    InvalidConfigFile { path: PathBuf, reason: String },

    // I/O errors (40-49)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LogError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> u32 {
        match self {
            LogError::SinkCreation { .. } => 10,
            LogError::SinkWrite { .. } => 11,
            LogError::Redaction(_) => 20,
            LogError::Config(_) => 30,
            LogError::InvalidConfigFile { .. } => 31,
            LogError::Io(_) => 40,
        }
    }

    /// Returns the category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            10..=19 => ErrorCategory::Sink,
            20..=29 => ErrorCategory::Redaction,
            30..=39 => ErrorCategory::Config,
            _ => ErrorCategory::Io,
        }
    }

    /// Build a [`LogError::SinkWrite`].
    pub fn sink_write(sink: impl Into<String>, source: std::io::Error) -> Self {
        LogError::SinkWrite {
            sink: sink.into(),
            source,
        }
    }
}

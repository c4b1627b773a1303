//! Error types for the redaction engine.

use thiserror::Error;

/// Result type for redaction operations.
pub type Result<T> = std::result::Result<T, RedactionError>;

/// Errors that can occur while configuring redaction.
///
/// Redaction itself never fails; every error here is raised at
/// registration or load time.
#[derive(Error, Debug)]
pub enum RedactionError {
    /// A text rule pattern did not compile. No rule was installed.
    #[error("invalid redaction pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// I/O error while reading or writing a policy file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON policy parse or serialize error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML policy parse error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML policy serialize error.
    #[error("toml serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Policy file extension is neither `.json` nor `.toml`.
    #[error("unsupported policy format: {0}")]
    UnsupportedFormat(String),
}

impl RedactionError {
    /// Build an [`RedactionError::InvalidPattern`].
    pub fn invalid_pattern(pattern: &str, source: regex::Error) -> Self {
        RedactionError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        }
    }
}

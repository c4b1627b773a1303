//! Text redaction rules.

use regex::Regex;

use crate::{RedactionError, Result};

/// A compiled pattern and the literal replacement for every match.
///
/// The replacement follows the `regex` crate's syntax, so `$1` or
/// `${name}` expand to capture groups and `$$` is a literal dollar sign.
#[derive(Debug, Clone)]
pub struct TextRule {
    pattern: Regex,
    replacement: String,
}

impl TextRule {
    /// Compile `pattern` into a rule.
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        let regex =
            Regex::new(pattern).map_err(|e| RedactionError::invalid_pattern(pattern, e))?;
        Ok(Self::from_regex(regex, replacement))
    }

    /// Wrap an already compiled pattern.
    pub fn from_regex(pattern: Regex, replacement: impl Into<String>) -> Self {
        TextRule {
            pattern,
            replacement: replacement.into(),
        }
    }

    /// Pattern source.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Replacement text.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Replace every match in `input`.
    pub fn apply(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, self.replacement.as_str())
            .into_owned()
    }
}

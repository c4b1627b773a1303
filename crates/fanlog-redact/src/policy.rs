//! Redaction policy configuration.
//!
//! A serializable description of the rules an engine should start with,
//! loadable from JSON or TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Preset, RedactionError};

/// Schema version for the policy file.
pub const POLICY_SCHEMA_VERSION: &str = "1.0.0";

/// Redaction policy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedactionPolicy {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Built-in rules, installed before `text_rules`.
    #[serde(default)]
    pub presets: Vec<Preset>,

    /// Field keys whose textual values are masked.
    #[serde(default)]
    pub field_keys: Vec<String>,

    /// Custom text rules, in application order.
    #[serde(default)]
    pub text_rules: Vec<TextRuleSpec>,
}

fn default_schema_version() -> String {
    POLICY_SCHEMA_VERSION.to_string()
}

/// Uncompiled text rule, as written in a policy file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRuleSpec {
    /// Regular expression.
    pub pattern: String,

    /// Replacement for every match.
    pub replacement: String,
}

impl TextRuleSpec {
    /// Create a rule spec.
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        TextRuleSpec {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

impl Default for RedactionPolicy {
    fn default() -> Self {
        Self {
            schema_version: POLICY_SCHEMA_VERSION.to_string(),
            presets: Vec::new(),
            field_keys: Vec::new(),
            text_rules: Vec::new(),
        }
    }
}

impl RedactionPolicy {
    /// Create a new policy with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load policy from a `.json` or `.toml` file.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match extension(path).as_deref() {
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some("toml") => Ok(toml::from_str(&content)?),
            _ => Err(RedactionError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save policy to a `.json` or `.toml` file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let path = path.as_ref();
        let content = match extension(path).as_deref() {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            _ => return Err(RedactionError::UnsupportedFormat(path.display().to_string())),
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Append a text rule.
    pub fn with_text_rule(
        mut self,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        self.text_rules.push(TextRuleSpec::new(pattern, replacement));
        self
    }

    /// Append a preset.
    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.presets.push(preset);
        self
    }

    /// Append a redacted field key.
    pub fn with_field_key(mut self, key: impl Into<String>) -> Self {
        self.field_keys.push(key.into());
        self
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

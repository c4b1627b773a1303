//! Logger configuration.
//!
//! Supports configuration via:
//! - TOML or JSON files ([`LogConfig::load`])
//! - Environment variables (`FANLOG_LEVEL`, `FANLOG_CONSOLE_LEVEL`, `FANLOG_DEVELOPMENT`)
//! - Builder setters, used by the demo binary for CLI flags

use std::path::{Path, PathBuf};

use fanlog_common::Level;
use fanlog_redact::{Preset, TextRuleSpec};
use serde::{Deserialize, Serialize};

use crate::error::{LogError, Result};

/// Overrides the root threshold.
pub const ENV_LEVEL: &str = "FANLOG_LEVEL";
/// Overrides the console sink threshold. `off` removes the console sink.
pub const ENV_CONSOLE_LEVEL: &str = "FANLOG_CONSOLE_LEVEL";
/// Selects the human console layout when truthy.
pub const ENV_DEVELOPMENT: &str = "FANLOG_DEVELOPMENT";

/// A file destination and its own threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSinkConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub level: Level,
}

/// Everything needed to build a root logger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Root logger name.
    pub name: String,
    /// Root threshold.
    pub level: Level,
    /// Human console layout instead of JSON lines.
    pub development: bool,
    /// Console threshold; `None` (written `"off"`) means no console sink.
    #[serde(with = "console_level_serde")]
    pub console_level: Option<Level>,
    /// Built-in message rules, applied before `redact_patterns`.
    pub presets: Vec<Preset>,
    /// Field keys whose textual values are masked.
    pub redact_fields: Vec<String>,
    /// File destinations, registered in order after the console.
    pub files: Vec<FileSinkConfig>,
    /// Custom message rules, applied in order.
    pub redact_patterns: Vec<TextRuleSpec>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            name: String::new(),
            level: Level::Info,
            development: false,
            console_level: Some(Level::Info),
            presets: Vec::new(),
            redact_fields: Vec::new(),
            files: Vec::new(),
            redact_patterns: Vec::new(),
        }
    }
}

impl LogConfig {
    pub fn new(name: impl Into<String>) -> Self {
        LogConfig {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Load a config file. The format follows the extension (`.toml` or `.json`).
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| invalid_file(path, e))?,
            Some("json") => serde_json::from_str(&content).map_err(|e| invalid_file(path, e))?,
            _ => return Err(invalid_file(path, "expected a .toml or .json extension")),
        };
        tracing::debug!(path = %path.display(), "loaded logging config");
        Ok(config)
    }

    /// Save to a file, choosing the format from the extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::to_string_pretty(self).map_err(|e| LogError::Config(e.to_string()))?,
            Some("json") => {
                serde_json::to_string_pretty(self).map_err(|e| LogError::Config(e.to_string()))?
            }
            _ => return Err(invalid_file(path, "expected a .toml or .json extension")),
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply environment overrides on top of `base`.
    pub fn from_env(base: LogConfig) -> Self {
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup`. Unparseable values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup(ENV_LEVEL) {
            match val.parse::<Level>() {
                Ok(level) => self.level = level,
                Err(err) => tracing::warn!(var = ENV_LEVEL, error = %err, "ignoring override"),
            }
        }

        if let Some(val) = lookup(ENV_CONSOLE_LEVEL) {
            match parse_console_level(&val) {
                Ok(level) => self.console_level = level,
                Err(err) => {
                    tracing::warn!(var = ENV_CONSOLE_LEVEL, error = %err, "ignoring override")
                }
            }
        }

        if let Some(val) = lookup(ENV_DEVELOPMENT) {
            match val.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.development = true,
                "0" | "false" | "no" | "off" => self.development = false,
                other => tracing::warn!(var = ENV_DEVELOPMENT, value = other, "ignoring override"),
            }
        }

        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_development(mut self, enabled: bool) -> Self {
        self.development = enabled;
        self
    }

    pub fn with_console_level(mut self, level: Option<Level>) -> Self {
        self.console_level = level;
        self
    }

    /// Add a file destination.
    pub fn with_file(mut self, path: impl Into<PathBuf>, level: Level) -> Self {
        self.files.push(FileSinkConfig {
            path: path.into(),
            level,
        });
        self
    }

    /// Add a custom message rule.
    pub fn with_redact_pattern(
        mut self,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        self.redact_patterns.push(TextRuleSpec::new(pattern, replacement));
        self
    }

    pub fn with_redact_field(mut self, key: impl Into<String>) -> Self {
        self.redact_fields.push(key.into());
        self
    }

    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.presets.push(preset);
        self
    }
}

/// Parse a console threshold, where `off`, `none` and `quiet` disable the sink.
fn parse_console_level(s: &str) -> std::result::Result<Option<Level>, String> {
    match s.trim().to_lowercase().as_str() {
        "off" | "none" | "quiet" => Ok(None),
        other => other.parse::<Level>().map(Some),
    }
}

/// `Option<Level>` as `"off"` or a level name, so TOML can express the
/// disabled console. JSON `null` is accepted as off too.
mod console_level_serde {
    use fanlog_common::Level;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    const OFF: &str = "off";

    pub fn serialize<S>(level: &Option<Level>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match level {
            Some(level) => level.serialize(serializer),
            None => serializer.serialize_str(OFF),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Level>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => super::parse_console_level(&raw).map_err(serde::de::Error::custom),
        }
    }
}

fn invalid_file(path: &Path, reason: impl std::fmt::Display) -> LogError {
    LogError::InvalidConfigFile {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

//! Record encoders.
//!
//! Two layouts, selected per sink:
//! - Human: `<ts>  <LEVEL>  <logger>  <message>  key=value ...`, with the
//!   level colored when ANSI output is enabled
//! - JSONL: one JSON object per line with `ts`, `level`, `logger`,
//!   `message` and a nested `fields` object
//!
//! Encoding is deterministic for a given record and never fails.

use std::borrow::Cow;

use chrono::SecondsFormat;
use console::Style;
use fanlog_common::{FieldValue, Level, Record, LOGGER_FIELD};

/// Renders a record into a single newline-terminated line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoder {
    /// Human-oriented console layout.
    Human { ansi: bool },
    /// Machine-parseable JSON lines.
    Jsonl,
}

impl Encoder {
    /// Render `record`, including the trailing newline.
    pub fn encode(&self, record: &Record) -> String {
        match self {
            Encoder::Human { ansi } => encode_human(record, *ansi),
            Encoder::Jsonl => encode_jsonl(record),
        }
    }
}

fn level_style(level: Level) -> Style {
    let style = Style::new().force_styling(true);
    match level {
        Level::Debug => style.magenta(),
        Level::Info => style.blue(),
        Level::Warn => style.yellow(),
        Level::Error => style.red(),
        Level::Fatal => style.red().bold(),
    }
}

fn encode_human(record: &Record, ansi: bool) -> String {
    let ts = record
        .timestamp
        .to_rfc3339_opts(SecondsFormat::Millis, true);
    let label = format!("{:<5}", record.level.label());
    let level = if ansi {
        level_style(record.level).apply_to(label).to_string()
    } else {
        label
    };

    let mut line = format!(
        "{}  {}  {}  {}",
        ts,
        level,
        escape_controls(&record.logger),
        escape_controls(&record.message)
    );

    // The logger name is already in the header.
    let mut first = true;
    for field in record.fields.iter().filter(|f| f.key != LOGGER_FIELD) {
        line.push_str(if first { "  " } else { " " });
        first = false;
        line.push_str(&field.key);
        line.push('=');
        line.push_str(&human_value(&field.value));
    }

    line.push('\n');
    line
}

fn human_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) | FieldValue::Error(s) => {
            if needs_quoting(s) {
                format!("{:?}", s)
            } else {
                s.clone()
            }
        }
        other => other.to_string(),
    }
}

/// Keep a header value on one line by escaping control characters.
fn escape_controls(s: &str) -> Cow<'_, str> {
    if !s.chars().any(char::is_control) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        if c.is_control() {
            out.extend(c.escape_debug());
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty() || s.chars().any(|c| c.is_whitespace() || c == '=' || c == '"')
}

fn encode_jsonl(record: &Record) -> String {
    let mut obj = serde_json::Map::new();

    obj.insert(
        "ts".to_string(),
        serde_json::json!(record
            .timestamp
            .to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    obj.insert("level".to_string(), serde_json::json!(record.level));
    obj.insert("logger".to_string(), serde_json::json!(record.logger));
    obj.insert("message".to_string(), serde_json::json!(record.message));

    if !record.fields.is_empty() {
        let fields: serde_json::Map<String, serde_json::Value> = record
            .fields
            .iter()
            .map(|f| (f.key.clone(), f.value.to_json()))
            .collect();
        obj.insert("fields".to_string(), serde_json::Value::Object(fields));
    }

    let mut json = serde_json::to_string(&serde_json::Value::Object(obj)).unwrap_or_default();
    json.push('\n');
    json
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fanlog_common::Field;

    fn sample_record() -> Record {
        Record {
            timestamp: Utc.with_ymd_and_hms(2025, 1, 15, 14, 30, 22).unwrap(),
            level: Level::Warn,
            logger: "app.auth".to_string(),
            message: "login failed".to_string(),
            fields: vec![
                Field::new("logger", "app.auth"),
                Field::new("user", "alice"),
                Field::new("attempts", 3),
                Field::new("reason", "bad password"),
            ],
        }
    }

    #[test]
    fn test_human_plain_layout() {
        let line = Encoder::Human { ansi: false }.encode(&sample_record());
        assert_eq!(
            line,
            "2025-01-15T14:30:22.000Z  WARN   app.auth  login failed  user=alice attempts=3 reason=\"bad password\"\n"
        );
    }

    #[test]
    fn test_human_ansi_colors_level() {
        let line = Encoder::Human { ansi: true }.encode(&sample_record());
        assert!(line.contains("\u{1b}["));
        assert!(line.contains("WARN"));
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn test_human_without_fields() {
        let mut record = sample_record();
        record.fields.clear();
        let line = Encoder::Human { ansi: false }.encode(&record);
        assert!(line.ends_with("login failed\n"));
    }

    #[test]
    fn test_jsonl_layout() {
        let line = Encoder::Jsonl.encode(&sample_record());
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);

        let parsed: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(parsed["ts"], "2025-01-15T14:30:22.000Z");
        assert_eq!(parsed["level"], "warn");
        assert_eq!(parsed["logger"], "app.auth");
        assert_eq!(parsed["message"], "login failed");
        assert_eq!(parsed["fields"]["user"], "alice");
        assert_eq!(parsed["fields"]["attempts"], 3);
        assert_eq!(parsed["fields"]["logger"], "app.auth");
    }

    #[test]
    fn test_jsonl_omits_empty_fields() {
        let mut record = sample_record();
        record.fields.clear();
        let parsed: serde_json::Value =
            serde_json::from_str(Encoder::Jsonl.encode(&record).trim()).unwrap();
        assert!(parsed.get("fields").is_none());
    }

    #[test]
    fn test_jsonl_escapes_newlines_in_message() {
        let mut record = sample_record();
        record.message = "line one\nline two".to_string();
        let line = Encoder::Jsonl.encode(&record);
        assert_eq!(line.matches('\n').count(), 1);
    }

    #[test]
    fn test_human_escapes_control_chars_in_header() {
        let mut record = sample_record();
        record.logger = "app\r\nfake".to_string();
        record.message = "line one\n2025-01-15T00:00:00.000Z  ERROR  app  forged\tentry".to_string();
        record.fields.clear();

        let line = Encoder::Human { ansi: false }.encode(&record);
        assert_eq!(line.matches('\n').count(), 1);
        assert!(!line.contains('\r'));
        assert!(line.ends_with(
            "app\\r\\nfake  line one\\n2025-01-15T00:00:00.000Z  ERROR  app  forged\\tentry\n"
        ));
    }

    #[test]
    fn test_human_leaves_printable_header_untouched() {
        assert!(matches!(escape_controls("plain text: ok"), Cow::Borrowed(_)));
        assert_eq!(escape_controls("tab\there"), "tab\\there");
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let record = sample_record();
        for encoder in [Encoder::Human { ansi: false }, Encoder::Jsonl] {
            assert_eq!(encoder.encode(&record), encoder.encode(&record));
        }
    }
}

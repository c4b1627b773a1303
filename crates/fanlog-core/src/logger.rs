//! Logger façade.
//!
//! A [`Logger`] owns a name and a list of context fields, and shares three
//! things with every logger derived from it: the [`Threshold`], the
//! [`RedactionEngine`] and the [`SinkRegistry`]. Deriving a logger copies the
//! name and fields; changing the level, adding a sink or adding a rule on
//! any member of the lineage is visible to all of them.

use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

use fanlog_common::{merge_fields, Field, Level, Record, LOGGER_FIELD};
use fanlog_redact::{Preset, RedactionEngine};

use crate::config::LogConfig;
use crate::encode::Encoder;
use crate::error::Result;
use crate::registry::SinkRegistry;
use crate::sink::{RedactingSink, Sink, WriterSink};
use crate::threshold::Threshold;

/// Exit status used by [`Logger::fatal`].
pub const FATAL_EXIT_CODE: i32 = 1;

/// Structured logger with redaction and fan-out to many sinks.
#[derive(Clone)]
pub struct Logger {
    name: String,
    context: Vec<Field>,
    redaction: Arc<RedactionEngine>,
    threshold: Threshold,
    sinks: Arc<SinkRegistry>,
}

impl Logger {
    /// Create a root logger with no sinks and no redaction rules.
    pub fn new(name: impl Into<String>, level: Level) -> Self {
        let name = name.into();
        Logger {
            context: vec![Field::new(LOGGER_FIELD, name.as_str())],
            name,
            redaction: Arc::new(RedactionEngine::new()),
            threshold: Threshold::new(level),
            sinks: Arc::new(SinkRegistry::new()),
        }
    }

    /// Build a root logger from configuration.
    ///
    /// Sinks are registered console first, then files in order. The first
    /// file that cannot be opened or pattern that does not compile aborts
    /// construction.
    pub fn from_config(config: &LogConfig) -> Result<Self> {
        let logger = Logger::new(config.name.clone(), config.level);

        for preset in &config.presets {
            logger.add_redaction_preset(*preset);
        }
        for rule in &config.redact_patterns {
            logger.add_redaction(&rule.pattern, rule.replacement.clone())?;
        }
        logger.add_field_redaction(config.redact_fields.iter().cloned());

        if let Some(level) = config.console_level {
            logger.add_console_sink(level, config.development);
        }
        for file in &config.files {
            logger.add_file_sink(&file.path, file.level)?;
        }

        tracing::debug!(
            logger = %logger.name,
            level = %config.level,
            sinks = logger.sinks.len(),
            rules = logger.redaction.rule_count(),
            "logger configured"
        );
        Ok(logger)
    }

    /// Hierarchical name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Persistent context fields, in order.
    pub fn context(&self) -> &[Field] {
        &self.context
    }

    /// Shared threshold handle.
    pub fn threshold(&self) -> &Threshold {
        &self.threshold
    }

    /// Shared redaction engine.
    pub fn redaction(&self) -> &Arc<RedactionEngine> {
        &self.redaction
    }

    /// Shared sink registry.
    pub fn sinks(&self) -> &Arc<SinkRegistry> {
        &self.sinks
    }

    // ── Verbs ───────────────────────────────────────────────────────

    /// Log at debug level.
    pub fn debug<I>(&self, message: &str, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = Field>,
    {
        self.log(Level::Debug, message, fields)
    }

    /// Log at info level.
    pub fn info<I>(&self, message: &str, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = Field>,
    {
        self.log(Level::Info, message, fields)
    }

    /// Log at warn level.
    pub fn warn<I>(&self, message: &str, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = Field>,
    {
        self.log(Level::Warn, message, fields)
    }

    /// Log at error level.
    pub fn error<I>(&self, message: &str, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = Field>,
    {
        self.log(Level::Error, message, fields)
    }

    /// Log at fatal level, flush every sink, then exit the process.
    ///
    /// Delivery is attempted before exiting; a delivery or flush failure is
    /// reported on stderr and does not prevent the exit.
    pub fn fatal<I>(&self, message: &str, fields: I) -> !
    where
        I: IntoIterator<Item = Field>,
    {
        if let Err(err) = self.log(Level::Fatal, message, fields) {
            tracing::error!(logger = %self.name, error = %err, "fatal record not fully delivered");
            eprintln!("fanlog: fatal record not fully delivered: {}", err);
        }
        if let Err(err) = self.sinks.flush() {
            eprintln!("fanlog: flush before exit failed: {}", err);
        }
        std::process::exit(FATAL_EXIT_CODE)
    }

    /// Log at `level`.
    ///
    /// A level below the threshold, or one no sink accepts, returns `Ok(())`
    /// without redacting or building anything. Otherwise the message is
    /// redacted once, call fields are merged over the context fields by key,
    /// and the record is handed to the registry. A call field named `logger`
    /// is dropped; the name only changes through [`Logger::child`]. A sink failure is returned;
    /// sinks after the failing one do not receive the record.
    pub fn log<I>(&self, level: Level, message: &str, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = Field>,
    {
        if !self.threshold.is_enabled(level) || !self.sinks.accepts(level) {
            return Ok(());
        }

        let message = self.redaction.redact_text(message);
        let fields = merge_fields(&self.context, without_logger_field(fields));
        let record = Record::new(level, self.name.as_str(), message, fields);

        self.sinks.write(&record)
    }

    /// Whether a record at `level` would currently be delivered anywhere.
    pub fn enabled(&self, level: Level) -> bool {
        self.threshold.is_enabled(level) && self.sinks.accepts(level)
    }

    // ── Derivation ──────────────────────────────────────────────────

    /// Derive a child logger named `<parent>.<name>` (or `name` when the
    /// parent is unnamed).
    pub fn child(&self, name: &str) -> Logger {
        let child_name = if self.name.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.name, name)
        };

        let mut context = self.context.clone();
        match context.iter_mut().find(|f| f.key == LOGGER_FIELD) {
            Some(field) => field.value = child_name.as_str().into(),
            None => context.insert(0, Field::new(LOGGER_FIELD, child_name.as_str())),
        }

        Logger {
            name: child_name,
            context,
            redaction: Arc::clone(&self.redaction),
            threshold: self.threshold.clone(),
            sinks: Arc::clone(&self.sinks),
        }
    }

    /// Derive a logger with extra context fields.
    ///
    /// Keys already present take the new value in the derived logger only.
    /// A `logger` field is ignored so the name field always matches the name.
    pub fn with_context<I>(&self, fields: I) -> Logger
    where
        I: IntoIterator<Item = Field>,
    {
        Logger {
            name: self.name.clone(),
            context: merge_fields(&self.context, without_logger_field(fields)),
            redaction: Arc::clone(&self.redaction),
            threshold: self.threshold.clone(),
            sinks: Arc::clone(&self.sinks),
        }
    }

    // ── Runtime level ───────────────────────────────────────────────

    /// Change the threshold for this logger's whole lineage.
    pub fn set_level(&self, level: Level) {
        let previous = self.threshold.get();
        self.threshold.set(level);
        if previous != level {
            tracing::debug!(logger = %self.name, from = %previous, to = %level, "log level changed");
        }
    }

    /// Current threshold.
    pub fn level(&self) -> Level {
        self.threshold.get()
    }

    // ── Sink registration ───────────────────────────────────────────

    /// Register a sink as-is, with no field redaction in front of it.
    pub fn add_sink(&self, sink: Arc<dyn Sink>) {
        self.sinks.add_sink(sink);
    }

    /// Register `sink` behind a [`RedactingSink`] sharing this lineage's
    /// redaction engine.
    pub fn add_redacted_sink<S: Sink + 'static>(&self, sink: S) {
        let chain = RedactingSink::new(sink, Arc::clone(&self.redaction));
        self.sinks.add_sink(Arc::new(chain));
    }

    /// Register a standard output sink.
    ///
    /// `development` selects the human layout (colored when stdout is a
    /// terminal); otherwise records are written as JSON lines.
    pub fn add_console_sink(&self, level: Level, development: bool) {
        let encoder = if development {
            Encoder::Human {
                ansi: std::io::stdout().is_terminal(),
            }
        } else {
            Encoder::Jsonl
        };
        self.add_redacted_sink(WriterSink::stdout(level, encoder));
    }

    /// Register a JSON-lines file sink appending to `path`.
    ///
    /// An open failure is returned and leaves existing sinks untouched.
    pub fn add_file_sink<P: AsRef<Path>>(&self, path: P, level: Level) -> Result<()> {
        let sink = WriterSink::file(path, level, Encoder::Jsonl)?;
        self.add_redacted_sink(sink);
        Ok(())
    }

    // ── Redaction ───────────────────────────────────────────────────

    /// Append a message redaction rule. Malformed patterns are rejected.
    pub fn add_redaction(&self, pattern: &str, replacement: impl Into<String>) -> Result<()> {
        self.redaction.add_text_rule(pattern, replacement)?;
        Ok(())
    }

    /// Append a built-in message redaction rule.
    pub fn add_redaction_preset(&self, preset: Preset) {
        self.redaction.add_preset(preset);
    }

    /// Mask textual values of these field keys in every redacted sink.
    pub fn add_field_redaction<I, S>(&self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.redaction.add_field_redaction(keys);
    }

    /// Flush every sink.
    pub fn flush(&self) -> Result<()> {
        self.sinks.flush()
    }
}

fn without_logger_field<I>(fields: I) -> impl Iterator<Item = Field>
where
    I: IntoIterator<Item = Field>,
{
    fields.into_iter().filter(|f| f.key != LOGGER_FIELD)
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.threshold.get())
            .field("context", &self.context)
            .field("sinks", &self.sinks)
            .finish()
    }
}

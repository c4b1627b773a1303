//! Log sinks.
//!
//! A sink accepts finished records at or above its own threshold and writes
//! them to a destination. Sinks compose explicitly: a [`RedactingSink`]
//! wraps another sink, rewrites field values, then delegates.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use fanlog_common::{Level, Record};
use fanlog_redact::RedactionEngine;

use crate::encode::Encoder;
use crate::error::{LogError, Result};

/// A destination for log records.
pub trait Sink: Send + Sync {
    /// Short name used in diagnostics and errors.
    fn name(&self) -> &str;

    /// Whether a record at `level` would be written.
    fn accepts(&self, level: Level) -> bool;

    /// Render and write one record. No retry is attempted on failure.
    fn write(&self, record: &Record) -> Result<()>;

    /// Flush buffered output, if any.
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn accepts(&self, level: Level) -> bool {
        (**self).accepts(level)
    }

    fn write(&self, record: &Record) -> Result<()> {
        (**self).write(record)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn accepts(&self, level: Level) -> bool {
        (**self).accepts(level)
    }

    fn write(&self, record: &Record) -> Result<()> {
        (**self).write(record)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }
}

/// Base sink writing encoded lines to any `Write` destination.
pub struct WriterSink<W: Write + Send> {
    name: String,
    level: Level,
    encoder: Encoder,
    writer: Mutex<W>,
}

impl WriterSink<io::Stdout> {
    /// Sink writing to standard output.
    pub fn stdout(level: Level, encoder: Encoder) -> Self {
        WriterSink::new("stdout", io::stdout(), level, encoder)
    }
}

impl WriterSink<io::Stderr> {
    /// Sink writing to standard error.
    pub fn stderr(level: Level, encoder: Encoder) -> Self {
        WriterSink::new("stderr", io::stderr(), level, encoder)
    }
}

impl WriterSink<File> {
    /// Sink appending to `path`, creating the file if needed.
    ///
    /// Parent directories are not created; a missing directory or a
    /// permission problem surfaces as [`LogError::SinkCreation`].
    pub fn file<P: AsRef<Path>>(path: P, level: Level, encoder: Encoder) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|source| LogError::SinkCreation {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(WriterSink::new(
            format!("file:{}", path.display()),
            file,
            level,
            encoder,
        ))
    }
}

impl<W: Write + Send> WriterSink<W> {
    /// Sink over an arbitrary writer.
    pub fn new(name: impl Into<String>, writer: W, level: Level, encoder: Encoder) -> Self {
        WriterSink {
            name: name.into(),
            level,
            encoder,
            writer: Mutex::new(writer),
        }
    }

    /// This sink's own threshold.
    pub fn level(&self) -> Level {
        self.level
    }

    /// This sink's encoder.
    pub fn encoder(&self) -> Encoder {
        self.encoder
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn accepts(&self, level: Level) -> bool {
        level >= self.level
    }

    fn write(&self, record: &Record) -> Result<()> {
        // Fully rendered before the destination is touched.
        let line = self.encoder.encode(record);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer
            .write_all(line.as_bytes())
            .map_err(|e| LogError::sink_write(&self.name, e))
    }

    fn flush(&self) -> Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer
            .flush()
            .map_err(|e| LogError::sink_write(&self.name, e))
    }
}

impl<W: Write + Send> std::fmt::Debug for WriterSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterSink")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("encoder", &self.encoder)
            .finish()
    }
}

/// Decorator that masks redacted field keys before delegating.
pub struct RedactingSink<S> {
    inner: S,
    engine: Arc<RedactionEngine>,
}

impl<S: Sink> RedactingSink<S> {
    /// Wrap `inner`, using the key set of `engine`.
    ///
    /// The engine is shared, so keys added later apply to later writes.
    pub fn new(inner: S, engine: Arc<RedactionEngine>) -> Self {
        RedactingSink { inner, engine }
    }

    /// The wrapped sink.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Sink> Sink for RedactingSink<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn accepts(&self, level: Level) -> bool {
        self.inner.accepts(level)
    }

    fn write(&self, record: &Record) -> Result<()> {
        if !self.engine.has_field_redaction() {
            return self.inner.write(record);
        }
        let redacted = record.with_fields(self.engine.redact_fields(&record.fields));
        self.inner.write(&redacted)
    }

    fn flush(&self) -> Result<()> {
        self.inner.flush()
    }
}

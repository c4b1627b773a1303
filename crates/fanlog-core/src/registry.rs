//! Sink registry: fan-out of one record to many sinks.
//!
//! The registry is itself a [`Sink`], so a logger never special-cases one
//! sink versus many. Membership only grows.
//!
//! # Partial delivery
//!
//! `write` stops at the first failing sink and returns its error. Sinks
//! registered after the failing one do not receive that record. Callers that
//! need independent delivery per destination should register a sink that
//! handles its own failures.

use std::sync::{Arc, PoisonError, RwLock};

use fanlog_common::{Level, Record};

use crate::error::Result;
use crate::sink::Sink;

/// Thread-safe, append-only collection of sinks.
#[derive(Default)]
pub struct SinkRegistry {
    sinks: RwLock<Vec<Arc<dyn Sink>>>,
}

impl SinkRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sink. Writes already in flight keep their snapshot.
    pub fn add_sink(&self, sink: Arc<dyn Sink>) {
        let mut sinks = self.sinks.write().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(sink = sink.name(), position = sinks.len(), "sink registered");
        sinks.push(sink);
    }

    /// Number of registered sinks.
    pub fn len(&self) -> usize {
        self.sinks.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether no sinks are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of registered sinks, in registration order.
    pub fn sink_names(&self) -> Vec<String> {
        self.snapshot()
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }

    /// Consistent copy of the member list, taken under the read lock.
    fn snapshot(&self) -> Vec<Arc<dyn Sink>> {
        self.sinks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Sink for SinkRegistry {
    fn name(&self) -> &str {
        "registry"
    }

    /// True iff any member accepts `level`; false when empty.
    fn accepts(&self, level: Level) -> bool {
        self.sinks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|s| s.accepts(level))
    }

    fn write(&self, record: &Record) -> Result<()> {
        for sink in self.snapshot() {
            if !sink.accepts(record.level) {
                continue;
            }
            if let Err(err) = sink.write(record) {
                tracing::warn!(
                    sink = sink.name(),
                    level = %record.level,
                    logger = %record.logger,
                    error = %err,
                    "sink write failed; remaining sinks skipped"
                );
                return Err(err);
            }
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        for sink in self.snapshot() {
            sink.flush()?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for SinkRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkRegistry")
            .field("sinks", &self.sink_names())
            .finish()
    }
}

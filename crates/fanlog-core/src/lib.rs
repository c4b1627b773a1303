//! fanlog core library
//!
//! This library provides the logging façade and its plumbing:
//! - Loggers with hierarchical names, context fields and a shared level
//! - Sinks writing human or JSON-lines output to stdout, stderr or files
//! - A registry fanning each record out to every accepting sink
//! - Message and field redaction in front of every sink
//! - Configuration loading from files and the environment
//!
//! The demo binary entry point is in `main.rs`.
//!
//! # Example
//!
//! ```
//! use fanlog_core::{fields, Encoder, Level, Logger, WriterSink};
//!
//! let logger = Logger::new("app", Level::Info);
//! logger.add_field_redaction(["password"]);
//! logger.add_redacted_sink(WriterSink::new("buffer", Vec::new(), Level::Debug, Encoder::Jsonl));
//!
//! let auth = logger.child("auth");
//! auth.warn("login failed", fields! { "user" => "alice", "password" => "hunter2" })
//!     .unwrap();
//! ```

pub mod config;
pub mod encode;
pub mod error;
pub mod logger;
pub mod registry;
pub mod sink;
pub mod threshold;

#[cfg(test)]
mod test_support;

pub use config::{FileSinkConfig, LogConfig};
pub use encode::Encoder;
pub use error::{ErrorCategory, LogError, Result};
pub use logger::{Logger, FATAL_EXIT_CODE};
pub use registry::SinkRegistry;
pub use sink::{RedactingSink, Sink, WriterSink};
pub use threshold::Threshold;

pub use fanlog_common::{fields, Field, FieldValue, Level, Record};
pub use fanlog_redact::{Preset, RedactionEngine};

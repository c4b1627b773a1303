//! Redaction engine for fanlog.
//!
//! Two independent passes scrub sensitive data before a record is final:
//!
//! - **Text rules**: ordered regex → replacement pairs applied to messages.
//!   Rules compose: each rule sees the output of the one before it.
//! - **Field keys**: a set of field names whose textual values are replaced
//!   with [`REDACTED_SENTINEL`] regardless of content.
//!
//! Both passes return new values and never mutate their input, so context
//! fields shared between loggers stay intact.
//!
//! # Example
//!
//! ```
//! use fanlog_redact::{Preset, RedactionEngine};
//!
//! let engine = RedactionEngine::new();
//! engine.add_preset(Preset::CreditCard);
//! engine.add_text_rule(r"secret-\w+", "[SECRET]").unwrap();
//!
//! let out = engine.redact_text("card 4111-1111-1111-1111 key secret-abc");
//! assert_eq!(out, "card XXXX-XXXX-XXXX-XXXX key [SECRET]");
//! ```

pub mod engine;
pub mod error;
pub mod policy;
pub mod preset;
pub mod rule;

pub use engine::RedactionEngine;
pub use error::{RedactionError, Result};
pub use fanlog_common::REDACTED_SENTINEL;
pub use policy::{RedactionPolicy, TextRuleSpec, POLICY_SCHEMA_VERSION};
pub use preset::Preset;
pub use rule::TextRule;

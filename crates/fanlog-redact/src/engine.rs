//! Main redaction engine.
//!
//! The RedactionEngine holds the ordered text rules applied to messages and
//! the set of field keys whose textual values are masked. Rules and keys can
//! be added while loggers sharing the engine are live; reads take shared
//! locks and registration takes exclusive locks.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use fanlog_common::{Field, FieldValue, REDACTED_SENTINEL};
use regex::Regex;

use crate::{Preset, RedactionPolicy, Result, TextRule};

/// Thread-safe text and field redaction.
#[derive(Debug, Default)]
pub struct RedactionEngine {
    /// Text rules, in application order.
    rules: RwLock<Vec<TextRule>>,

    /// Field keys whose textual values are masked.
    redacted_keys: RwLock<HashSet<String>>,
}

impl RedactionEngine {
    /// Create an engine with no rules and no redacted keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine from a policy.
    ///
    /// Presets are installed first, then the policy's text rules in order.
    /// The first malformed pattern aborts construction.
    pub fn from_policy(policy: &RedactionPolicy) -> Result<Self> {
        let engine = Self::new();
        for preset in &policy.presets {
            engine.add_preset(*preset);
        }
        for spec in &policy.text_rules {
            engine.add_text_rule(&spec.pattern, spec.replacement.clone())?;
        }
        engine.add_field_redaction(policy.field_keys.iter().cloned());
        Ok(engine)
    }

    /// Compile and append a text rule.
    ///
    /// A malformed pattern is rejected and nothing is installed.
    pub fn add_text_rule(&self, pattern: &str, replacement: impl Into<String>) -> Result<()> {
        let rule = TextRule::new(pattern, replacement)?;
        self.push_rule(rule);
        Ok(())
    }

    /// Append a rule built from an already compiled pattern.
    pub fn add_compiled_rule(&self, pattern: Regex, replacement: impl Into<String>) {
        self.push_rule(TextRule::from_regex(pattern, replacement));
    }

    /// Append a built-in rule.
    pub fn add_preset(&self, preset: Preset) {
        self.push_rule(preset.rule());
    }

    fn push_rule(&self, rule: TextRule) {
        self.write_rules().push(rule);
    }

    /// Apply every rule, in registration order, to `message`.
    ///
    /// Each rule replaces all of its matches and hands its output to the
    /// next rule.
    pub fn redact_text(&self, message: &str) -> String {
        let rules = self.read_rules();
        let mut redacted = message.to_string();
        for rule in rules.iter() {
            redacted = rule.apply(&redacted);
        }
        redacted
    }

    /// Number of installed text rules.
    pub fn rule_count(&self) -> usize {
        self.read_rules().len()
    }

    /// Add keys to the redacted field set.
    pub fn add_field_redaction<I, S>(&self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = self
            .redacted_keys
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        set.extend(keys.into_iter().map(Into::into));
    }

    /// Whether values under `key` are masked.
    pub fn is_redacted_key(&self, key: &str) -> bool {
        self.read_keys().contains(key)
    }

    /// Whether any field keys are registered.
    pub fn has_field_redaction(&self) -> bool {
        !self.read_keys().is_empty()
    }

    /// Return a copy of `fields` with textual values of redacted keys masked.
    ///
    /// Non-textual values keep their value even when their key is redacted.
    pub fn redact_fields(&self, fields: &[Field]) -> Vec<Field> {
        let keys = self.read_keys();
        fields
            .iter()
            .map(|field| match &field.value {
                FieldValue::Text(_) if keys.contains(field.key.as_str()) => Field {
                    key: field.key.clone(),
                    value: FieldValue::Text(REDACTED_SENTINEL.to_string()),
                },
                FieldValue::Text(_)
                | FieldValue::Integer(_)
                | FieldValue::Boolean(_)
                | FieldValue::Structured(_)
                | FieldValue::Error(_) => field.clone(),
            })
            .collect()
    }

    fn read_rules(&self) -> RwLockReadGuard<'_, Vec<TextRule>> {
        self.rules.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_rules(&self) -> RwLockWriteGuard<'_, Vec<TextRule>> {
        self.rules.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_keys(&self) -> RwLockReadGuard<'_, HashSet<String>> {
        self.redacted_keys
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RedactionError;

    #[test]
    fn test_empty_engine_is_identity() {
        let engine = RedactionEngine::new();
        assert_eq!(engine.redact_text("nothing to see"), "nothing to see");
        assert_eq!(engine.rule_count(), 0);
    }

    #[test]
    fn test_rules_apply_sequentially() {
        let engine = RedactionEngine::new();
        engine.add_text_rule("cat", "dog").unwrap();
        engine.add_text_rule("dog", "bird").unwrap();

        // The second rule sees the first rule's output.
        assert_eq!(engine.redact_text("cat and dog"), "bird and bird");
    }

    #[test]
    fn test_rule_order_matters() {
        let forward = RedactionEngine::new();
        forward.add_text_rule("ab", "X").unwrap();
        forward.add_text_rule("Xc", "Y").unwrap();

        let reverse = RedactionEngine::new();
        reverse.add_text_rule("Xc", "Y").unwrap();
        reverse.add_text_rule("ab", "X").unwrap();

        assert_eq!(forward.redact_text("abc"), "Y");
        assert_eq!(reverse.redact_text("abc"), "Xc");
    }

    #[test]
    fn test_invalid_rule_not_installed() {
        let engine = RedactionEngine::new();
        engine.add_text_rule("ok", "fine").unwrap();
        let err = engine.add_text_rule("[broken", "x").unwrap_err();
        assert!(matches!(err, RedactionError::InvalidPattern { .. }));
        assert_eq!(engine.rule_count(), 1);
    }

    #[test]
    fn test_compiled_rule_and_preset() {
        let engine = RedactionEngine::new();
        engine.add_compiled_rule(Regex::new("token-[0-9]+").unwrap(), "token-?");
        engine.add_preset(Preset::Email);
        assert_eq!(
            engine.redact_text("token-42 sent to a@b.io"),
            "token-? sent to [EMAIL REDACTED]"
        );
    }

    #[test]
    fn test_redact_fields_masks_text_only() {
        let engine = RedactionEngine::new();
        engine.add_field_redaction(["password", "pin"]);

        let fields = vec![
            Field::new("password", "secret123"),
            Field::new("user", "alice"),
            Field::new("pin", 1234),
        ];
        let redacted = engine.redact_fields(&fields);

        assert_eq!(redacted[0], Field::new("password", REDACTED_SENTINEL));
        assert_eq!(redacted[1], Field::new("user", "alice"));
        assert_eq!(redacted[2], Field::new("pin", 1234));
        // input untouched
        assert_eq!(fields[0], Field::new("password", "secret123"));
    }

    #[test]
    fn test_field_keys_merge() {
        let engine = RedactionEngine::new();
        assert!(!engine.has_field_redaction());
        engine.add_field_redaction(vec!["a".to_string()]);
        engine.add_field_redaction(["b"]);
        assert!(engine.is_redacted_key("a"));
        assert!(engine.is_redacted_key("b"));
        assert!(!engine.is_redacted_key("c"));
    }

    #[test]
    fn test_from_policy() {
        let mut policy = RedactionPolicy::default();
        policy.presets.push(Preset::CreditCard);
        policy.text_rules.push(crate::TextRuleSpec::new("internal-\\d+", "internal-*"));
        policy.field_keys.push("password".to_string());

        let engine = RedactionEngine::from_policy(&policy).unwrap();
        assert_eq!(engine.rule_count(), 2);
        assert!(engine.is_redacted_key("password"));
        assert_eq!(
            engine.redact_text("internal-77 paid 4111-1111-1111-1111"),
            "internal-* paid XXXX-XXXX-XXXX-XXXX"
        );
    }

    #[test]
    fn test_from_policy_rejects_bad_pattern() {
        let mut policy = RedactionPolicy::default();
        policy.text_rules.push(crate::TextRuleSpec::new("(", "x"));
        assert!(RedactionEngine::from_policy(&policy).is_err());
    }

    #[test]
    fn test_concurrent_add_and_redact() {
        use std::sync::Arc;
        use std::thread;

        let engine = Arc::new(RedactionEngine::new());
        engine.add_text_rule("secret", "***").unwrap();

        let mut handles = Vec::new();
        for i in 0..4 {
            let engine = Arc::clone(&engine);
            handles.push(thread::spawn(move || {
                engine.add_text_rule(&format!("word{}", i), "w").unwrap();
                for _ in 0..100 {
                    let out = engine.redact_text("a secret here");
                    assert!(!out.contains("secret"));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(engine.rule_count(), 5);
    }
}

//! Built-in text rules for common sensitive values.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::TextRule;

// Pre-compiled preset patterns
static CREDIT_CARD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:\d{4}[-\s]?){3}\d{4}\b").unwrap());

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});

static BEARER_TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Bearer\s+[A-Za-z0-9\-_\.=]+").unwrap());

/// Named, pre-compiled redaction rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// 16-digit card numbers, optionally grouped by dashes or spaces.
    CreditCard,
    /// Email addresses.
    Email,
    /// `Bearer <token>` authorization values.
    BearerToken,
}

impl Preset {
    /// Every preset, in the order they are usually installed.
    pub const ALL: [Preset; 3] = [Preset::CreditCard, Preset::Email, Preset::BearerToken];

    /// The replacement written over each match.
    pub fn replacement(&self) -> &'static str {
        match self {
            Preset::CreditCard => "XXXX-XXXX-XXXX-XXXX",
            Preset::Email => "[EMAIL REDACTED]",
            Preset::BearerToken => "Bearer [TOKEN REDACTED]",
        }
    }

    /// The compiled pattern.
    pub fn pattern(&self) -> &'static Regex {
        match self {
            Preset::CreditCard => &CREDIT_CARD_PATTERN,
            Preset::Email => &EMAIL_PATTERN,
            Preset::BearerToken => &BEARER_TOKEN_PATTERN,
        }
    }

    /// Build a [`TextRule`] for this preset.
    pub fn rule(&self) -> TextRule {
        TextRule::from_regex(self.pattern().clone(), self.replacement())
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "credit_card" | "card" => Ok(Preset::CreditCard),
            "email" => Ok(Preset::Email),
            "bearer_token" | "bearer" => Ok(Preset::BearerToken),
            _ => Err(format!("unknown redaction preset: {}", s)),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Preset::CreditCard => "credit_card",
            Preset::Email => "email",
            Preset::BearerToken => "bearer_token",
        };
        write!(f, "{}", s)
    }
}

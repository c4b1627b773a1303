//! Typed key/value fields attached to log records.
//!
//! Field values form a closed set of variants so that redaction and
//! rendering can match on them exhaustively.

use serde::Serialize;

/// Value carried by a [`Field`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Free text. The only variant subject to field-key redaction.
    Text(String),
    /// Signed integer.
    Integer(i64),
    /// Boolean flag.
    Boolean(bool),
    /// Arbitrary structured data.
    Structured(serde_json::Value),
    /// Rendered error message.
    Error(String),
}

impl FieldValue {
    /// Capture an error as its display string.
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        FieldValue::Error(err.to_string())
    }

    /// Whether this value is free text.
    pub fn is_text(&self) -> bool {
        matches!(self, FieldValue::Text(_))
    }

    /// Borrow the text of a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert into a JSON value, keeping native JSON types where possible.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Text(s) | FieldValue::Error(s) => serde_json::Value::String(s.clone()),
            FieldValue::Integer(n) => serde_json::Value::Number((*n).into()),
            FieldValue::Boolean(b) => serde_json::Value::Bool(*b),
            FieldValue::Structured(v) => v.clone(),
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) | FieldValue::Error(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Structured(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

macro_rules! impl_from_lossless_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::Integer(i64::from(value))
                }
            }
        )*
    };
}

impl_from_lossless_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => FieldValue::Integer(n),
            Err(_) => FieldValue::Structured(serde_json::Value::Number(value.into())),
        }
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        FieldValue::from(value as u64)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        FieldValue::Structured(value)
    }
}

/// A single key/value pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    /// Create a field from anything convertible to a [`FieldValue`].
    pub fn new(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Field {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create an error-valued field.
    pub fn error<E: std::error::Error + ?Sized>(key: impl Into<String>, err: &E) -> Self {
        Field {
            key: key.into(),
            value: FieldValue::from_error(err),
        }
    }
}

impl<K: Into<String>, V: Into<FieldValue>> From<(K, V)> for Field {
    fn from((key, value): (K, V)) -> Self {
        Field::new(key, value)
    }
}

/// Merge `extra` into a copy of `base`, keyed by field name.
///
/// A key already present keeps its position and takes the later value;
/// new keys are appended in iteration order. `base` is never modified.
pub fn merge_fields<I>(base: &[Field], extra: I) -> Vec<Field>
where
    I: IntoIterator<Item = Field>,
{
    let mut merged = base.to_vec();
    for field in extra {
        match merged.iter_mut().find(|f| f.key == field.key) {
            Some(existing) => existing.value = field.value,
            None => merged.push(field),
        }
    }
    merged
}

/// Build a `Vec<Field>` from `key => value` pairs.
///
/// ```
/// let fields = fanlog_common::fields! { "user" => "alice", "attempts" => 3 };
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        ::std::vec::Vec::<$crate::Field>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Field::new($key, $value)),+]
    };
}

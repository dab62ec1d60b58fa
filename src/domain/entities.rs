//! Domain entities: raw input records, attribute values, node identifiers

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use crate::domain::error::DomainError;

/// A single attribute value.
///
/// Input attributes are free-form. Scalars keep their type; objects and
/// arrays are kept as their compact JSON text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl AttrValue {
    /// Whether the value counts as present for display purposes.
    ///
    /// `null`, `false`, zero and the empty string are not.
    pub fn is_truthy(&self) -> bool {
        match self {
            AttrValue::Null => false,
            AttrValue::Bool(b) => *b,
            AttrValue::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
            AttrValue::String(s) => !s.is_empty(),
        }
    }
}

impl From<Value> for AttrValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => AttrValue::Null,
            Value::Bool(b) => AttrValue::Bool(b),
            Value::Number(n) => AttrValue::Number(n),
            Value::String(s) => AttrValue::String(s),
            nested @ (Value::Array(_) | Value::Object(_)) => AttrValue::String(nested.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for AttrValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(AttrValue::from)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Null => write!(f, "null"),
            AttrValue::Bool(b) => write!(f, "{}", b),
            AttrValue::Number(n) => write!(f, "{}", n),
            AttrValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::String(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::String(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        AttrValue::Number(n.into())
    }
}

/// Attribute map of a record, in document key order.
pub type Attributes = IndexMap<String, AttrValue>;

/// One record as it appears in the input document.
///
/// `children` stays untyped: each value should be a group object holding a
/// `records` array, but malformed groups must reach the builder so its
/// policy can decide whether to skip or reject them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub data: Option<Attributes>,
    #[serde(default)]
    pub children: Option<Value>,
}

/// Node identifier, unique within one build.
///
/// Rendered and parsed as a decimal string ("1", "2", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uid(pub u64);

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Uid {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Uid)
            .map_err(|_| DomainError::InvalidUid(s.to_string()))
    }
}

use std::fmt;

use rusqlite::types::ValueRef;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    pub fn as_display(&self) -> String {
        match self {
            Value::Integer(i) => i.to_string(),
            // Debug keeps the decimal point on whole reals ("3.0").
            Value::Real(f) => format!("{f:?}"),
            Value::Text(s) => s.clone(),
        }
    }

    /// Numeric view of the value. Text counts as numeric when it parses as a
    /// finite float after trimming.
    pub fn as_f64(&self) -> Option<f64> {
        let parsed = match self {
            Value::Integer(i) => *i as f64,
            Value::Real(f) => *f,
            Value::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        parsed.is_finite().then_some(parsed)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Real(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            Value::Real(_) => None,
            Value::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_empty_text(&self) -> bool {
        matches!(self, Value::Text(s) if s.is_empty())
    }

    pub fn from_sql(value: ValueRef<'_>) -> Option<Value> {
        match value {
            ValueRef::Null => None,
            ValueRef::Integer(i) => Some(Value::Integer(i)),
            ValueRef::Real(f) => Some(Value::Real(f)),
            ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                Some(Value::Text(String::from_utf8_lossy(bytes).into_owned()))
            }
        }
    }

    /// Converts a JSON scalar. Nested arrays and objects are kept as their
    /// serialized text.
    pub fn from_json(value: &serde_json::Value) -> Option<Value> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::Bool(b) => Some(Value::Integer(i64::from(*b))),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Some(Value::Integer(i)),
                None => n.as_f64().map(Value::Real),
            },
            serde_json::Value::String(s) => Some(Value::Text(s.clone())),
            other => Some(Value::Text(other.to_string())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

/// Outcome of looking a field up in a record. A key that is not in the record
/// and a key whose value is null are kept apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    Missing,
    Null,
    Present(&'a Value),
}

impl<'a> Field<'a> {
    pub fn value(self) -> Option<&'a Value> {
        match self {
            Field::Present(value) => Some(value),
            Field::Missing | Field::Null => None,
        }
    }

    pub fn is_absent(self) -> bool {
        !matches!(self, Field::Present(_))
    }
}

//! Backend identifiers.
//!
//! Ids arrive as JSON numbers on some endpoints and as strings on others, so
//! they are kept in whichever form the backend sent and compared through
//! [`EntityId::key`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Identifier of a BOQ, label, ticket, project or employee.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl EntityId {
    /// Coerce a raw JSON value into an id.
    ///
    /// Returns `None` for `null`, booleans, arrays, objects and blank strings.
    /// Integral floats collapse to [`EntityId::Number`].
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Some(Self::Number(i));
                }
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                        Some(Self::Number(f as i64))
                    }
                    _ => Some(Self::Text(n.to_string())),
                }
            }
            Value::String(s) if !s.trim().is_empty() => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// Canonical comparison key. `5` and `"5"` share the key `"5"`.
    pub fn key(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

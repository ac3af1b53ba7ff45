//! Payload shapes at the API boundary.
//!
//! Backend endpoints answer with either one record or a list of records, and
//! individual fields are frequently missing, `null`, or typed inconsistently.
//! [`OneOrMany`] captures the first problem once at ingestion; the [`lenient`]
//! field deserializers absorb the second so that shaping never fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Either a single record or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    Single(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::Single(item) => vec![item],
        }
    }

    /// The first record, if any.
    pub fn into_first(self) -> Option<T> {
        match self {
            Self::Many(items) => items.into_iter().next(),
            Self::Single(item) => Some(item),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Many(items) => items.len(),
            Self::Single(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OneOrMany<Value> {
    /// Classify a raw payload. `null` carries no records at all.
    pub fn from_payload(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Array(items) => Some(Self::Many(items)),
            other => Some(Self::Single(other)),
        }
    }
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        value.into_vec()
    }
}

/// Strip a `{ "data": ... }` response envelope if present.
///
/// Objects without a non-null `data` field are returned untouched, since some
/// callers already hand over the unwrapped payload.
pub fn unwrap_data_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(inner) if !inner.is_null() => inner,
            removed => {
                if let Some(null) = removed {
                    map.insert("data".to_string(), null);
                }
                Value::Object(map)
            }
        },
        other => other,
    }
}

/// Field deserializers that never fail.
///
/// Each one reads the field as an arbitrary JSON value and coerces what it can,
/// so a record with odd field types still yields a value with those fields absent.
pub mod lenient {
    use chrono::{DateTime, Utc};
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use crate::id::EntityId;

    /// Decode a record, falling back to `T::default()` for non-objects.
    pub fn record<T>(value: Value) -> T
    where
        T: DeserializeOwned + Default,
    {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => T::default(),
        }
    }

    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            _ => None,
        })
    }

    pub fn entity_id<'de, D>(deserializer: D) -> Result<Option<EntityId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(EntityId::from_value(&value))
    }

    pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(crate::timestamp::parse_value(&value))
    }

    /// A list of records. Non-arrays read as empty; non-object entries read as
    /// `T::default()` and keep their position.
    pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Array(items) => items.into_iter().map(record).collect(),
            _ => Vec::new(),
        })
    }

    /// A list kept as raw JSON for later shaping. Non-arrays read as empty.
    pub fn raw_list<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Array(items) => items,
            _ => Vec::new(),
        })
    }
}

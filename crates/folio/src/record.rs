//! Partial records and position updates: the inputs of the statement builders.

use crate::error::{FolioError, FolioResult};
use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// An insertion-ordered set of `external field name → value` pairs.
///
/// Key order is significant: it decides placeholder numbering in the
/// generated statement. Setting a key that is already present replaces its
/// value without moving it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartialRecord {
    fields: IndexMap<String, Value>,
}

impl PartialRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a JSON document into a record.
    ///
    /// Anything but an object is rejected, as is any field whose value is not a
    /// non-null scalar. Records never clear a column, so `null` gets its own
    /// message.
    pub fn from_json(json: serde_json::Value) -> FolioResult<Self> {
        let serde_json::Value::Object(map) = json else {
            return Err(FolioError::invalid_argument("Invalid input type."));
        };

        let mut record = Self::new();
        for (field, value) in map {
            if value.is_null() {
                return Err(FolioError::invalid_argument(format!(
                    "Field '{field}' cannot be null; omit it to leave the value unchanged."
                )));
            }
            let value = Value::deserialize(&value).map_err(|_| {
                FolioError::invalid_argument(format!("Invalid value for field '{field}'."))
            })?;
            record.fields.insert(field, value);
        }
        Ok(record)
    }

    /// Set a field (consuming version), convenient for building literals.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Remove a field, keeping the order of the remaining ones.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.shift_remove(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for PartialRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.set(k, v);
        }
        record
    }
}

/// Target ordering value for a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionUpdate {
    #[serde(deserialize_with = "coerce_i32")]
    pub id: i32,
    #[serde(deserialize_with = "coerce_i32")]
    pub position: i32,
}

impl PositionUpdate {
    pub fn new(id: i32, position: i32) -> Self {
        Self { id, position }
    }

    /// Parse a batch of updates from an untyped JSON document.
    ///
    /// The document must be an array; strings, objects, numbers and `null`
    /// are rejected before any element is looked at.
    pub fn parse_batch(json: &serde_json::Value) -> FolioResult<Vec<Self>> {
        let serde_json::Value::Array(items) = json else {
            return Err(FolioError::invalid_argument("Invalid input type."));
        };

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                Self::deserialize(item).map_err(|e| {
                    FolioError::invalid_argument(format!(
                        "Invalid position update at index {i}: {e}"
                    ))
                })
            })
            .collect()
    }
}

/// Accept JSON numbers or numeric strings; reject fractions and overflow.
fn coerce_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Numeric {
        Int(i64),
        Float(f64),
        Text(String),
    }

    let n = match Numeric::deserialize(deserializer)? {
        Numeric::Int(v) => v,
        Numeric::Float(v) if v.fract() == 0.0 && v.is_finite() => v as i64,
        Numeric::Float(v) => return Err(D::Error::custom(format!("{v} is not an integer"))),
        Numeric::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("'{s}' is not numeric")))?,
    };
    i32::try_from(n).map_err(|_| D::Error::custom(format!("{n} is out of range")))
}

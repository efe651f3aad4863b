//! Schema-free records.

use crate::collection::codec::Record;
use crate::entity::{LooseId, RecordId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Error returned when a JSON value is not an object.
#[derive(Debug, Error)]
#[error("record must be a JSON object, got {found}")]
pub struct NotAnObject {
    /// JSON type that was found instead.
    pub found: &'static str,
}

/// A record whose fields are whatever JSON object the caller supplied.
///
/// The store only touches `id`; every other field passes through
/// unchanged. This lets one store type serve every entity kind when the
/// record shape is only known at runtime.
///
/// ```rust
/// use recordbook_core::{JsonRecord, Record};
/// use serde_json::json;
///
/// let park = JsonRecord::from_value(json!({"name": "Zion", "state": "Utah"})).unwrap();
/// assert!(park.id().is_absent());
/// let park = park.with_id(3);
/// assert_eq!(park.get("id"), Some(&json!(3)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonRecord(Map<String, Value>);

impl JsonRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a JSON value, which must be an object.
    ///
    /// # Errors
    ///
    /// Returns [`NotAnObject`] for any other JSON type.
    pub fn from_value(value: Value) -> Result<Self, NotAnObject> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(NotAnObject {
                found: json_type(&other),
            }),
        }
    }

    /// Returns a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Sets a field, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    /// Removes a field.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// Returns the underlying map.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Returns the fields other than `id`.
    #[must_use]
    pub fn fields_without_id(&self) -> Map<String, Value> {
        self.0
            .iter()
            .filter(|(k, _)| k.as_str() != "id")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Converts the record into a JSON object value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl Record for JsonRecord {
    fn id(&self) -> LooseId {
        self.0.get("id").map_or(LooseId::Absent, LooseId::from_json)
    }

    fn assign_id(&mut self, id: RecordId) {
        self.0.insert("id".to_string(), Value::from(id));
    }
}

impl From<Map<String, Value>> for JsonRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for JsonRecord {
    type Error = NotAnObject;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

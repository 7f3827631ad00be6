//! CMS entries as ordered field maps

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ContentError, Result};

/// One entry of a CMS feed
///
/// Fields keep the order of the export. Inserting an existing field keeps its
/// position, new fields are appended, and removal preserves the order of the
/// rest, so the serialized front-matter is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entry {
    fields: IndexMap<String, Value>,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an entry from a JSON value, if it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(map.into_iter().collect()),
            _ => None,
        }
    }

    /// Convert back into a JSON object
    pub fn into_value(self) -> Value {
        Value::Object(self.fields.into_iter().collect())
    }

    /// The CMS-assigned unique identifier
    pub fn uid(&self) -> Option<&str> {
        self.get("uid").and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.shift_remove(field)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A string field that must be present
    pub fn require_str(&self, field: &str) -> Result<&str> {
        self.opt_str(field)?.ok_or_else(|| ContentError::MissingField {
            field: field.to_string(),
        })
    }

    /// A string field that may be absent or null
    pub fn opt_str(&self, field: &str) -> Result<Option<&str>> {
        match self.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(ContentError::FieldType {
                field: field.to_string(),
                expected: "a string",
            }),
        }
    }

    /// Walk a dotted path through nested objects, e.g. `seo.meta_title`
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }
}

impl FromIterator<(String, Value)> for Entry {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl From<Entry> for Value {
    fn from(entry: Entry) -> Self {
        entry.into_value()
    }
}

/// The UID a reference points to
///
/// References are exported either as bare UID strings or as reference
/// objects carrying a `uid` key.
pub fn reference_uid(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s),
        Value::Object(map) => map.get("uid").and_then(Value::as_str),
        _ => None,
    }
}

/// Whether a field value stands for "no value"
pub fn is_null_marker(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty() || s == "null",
        _ => false,
    }
}

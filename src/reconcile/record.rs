use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::reconcile::{
    identity::{Identified, Merge},
    reconciler::reconcile,
};

/// Identity of a dynamic record: the compact JSON text of its `id` value.
///
/// JSON types never collide (`1` and `"1"` are different ids), but numbers
/// compare by value, so `1`, `1.0`, `1e0` and `-0`/`0` pair up. A record
/// without an `id` field gets the id of JSON `null`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Number(n) => RecordId(number_key(n)),
            other => RecordId(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn number_key(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }

    match n.as_f64() {
        // Integral floats within i64 range print as integers; -0.0 lands on 0.
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A schemaless record: a JSON object with an `id` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Record {
    id: RecordId,
    fields: Map<String, Value>,
}

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        let id = RecordId::of(fields.get("id").unwrap_or(&Value::Null));
        Self { id, fields }
    }

    /// Wrap a JSON value. Anything but an object is rejected.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self::new(fields)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

impl From<Record> for Map<String, Value> {
    fn from(record: Record) -> Self {
        record.fields
    }
}

impl Identified for Record {
    type Id = RecordId;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Merge for Record {
    fn merged_with(&self, newer: &Self) -> Self {
        let mut fields = self.fields.clone();
        fields.extend(newer.fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self::new(fields)
    }
}

/// Read a JSON value as a collection of records.
///
/// Returns `None` unless the value is an array whose every element is an
/// object.
pub fn parse_collection(value: &Value) -> Option<Vec<Record>> {
    value
        .as_array()?
        .iter()
        .map(|item| Record::from_value(item.clone()))
        .collect()
}

/// `reconcile` over untyped JSON input. Values that are not collections of
/// objects count as absent.
pub fn reconcile_values(previous: Option<&Value>, next: Option<&Value>) -> Vec<Record> {
    let previous = previous.and_then(parse_collection);
    let next = next.and_then(parse_collection);
    reconcile(previous.as_deref(), next.as_deref())
}

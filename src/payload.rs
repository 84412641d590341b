//! Result payloads
//!
//! A payload is the mapping surfaced by a node's `success` or `fail` key.
//! Payloads of nested nodes merge left to right with [`Semigroup::combine`]:
//! keys from the right-hand side replace same-named keys on the left.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Semigroup;

/// A mapping surfaced by a node when it is run.
///
/// # Examples
///
/// ```
/// use assertree::{Payload, Semigroup};
/// use serde_json::json;
///
/// let parent = Payload::from_value(json!({"a": 1, "shared": "parent"})).unwrap();
/// let child = Payload::from_value(json!({"b": 2, "shared": "child"})).unwrap();
///
/// let merged = parent.combine(child);
/// assert_eq!(merged.get("shared"), Some(&json!("child")));
/// assert_eq!(merged.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// An empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON object; anything else yields `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert an entry, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Borrow the underlying mapping.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Unwrap the underlying mapping.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl Semigroup for Payload {
    fn combine(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        Value::Object(payload.0)
    }
}

use serde::Serialize;
use serde_json::{Map, Value};

/// Flat, ordered mapping of named values extracted from a request.
///
/// Produced fresh per invocation and exposed to logging and name templating
/// independent of the materialized parameter value. Keys are unique; insertion
/// order follows source precedence, so `insert` keeps the first value seen for
/// a key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BindingData(Map<String, Value>);

impl BindingData {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Insert unless the key was already bound by a higher-precedence source.
    pub fn insert(&mut self, key: String, value: Value) {
        self.0.entry(key).or_insert(value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// The mapping as a JSON object, for templating and logs.
    pub fn as_object(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl IntoIterator for BindingData {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

//! Loosely-typed search documents

use serde_json::{Map, Value};

/// A single search hit, reduced to its id and `_source` object.
///
/// Accessors never fail: a missing key and a key holding the wrong JSON
/// type both read as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    id: Option<String>,
    source: Map<String, Value>,
}

impl Document {
    /// Build a document from a raw hit as returned under `hits.hits[]`.
    ///
    /// A hit without an object `_source` yields an empty document.
    pub fn from_hit(hit: Value) -> Self {
        let Value::Object(mut hit) = hit else {
            tracing::debug!("Search hit is not an object, treating as empty");
            return Self::default();
        };

        let id = match hit.remove("_id") {
            Some(Value::String(id)) => Some(id),
            _ => None,
        };
        let source = match hit.remove("_source") {
            Some(Value::Object(source)) => source,
            Some(other) => {
                tracing::debug!("Hit {:?} has non-object _source: {}", id, other);
                Map::new()
            }
            None => Map::new(),
        };

        Self { id, source }
    }

    /// Build a document directly from a `_source` object
    pub fn from_source(source: Value) -> Self {
        let source = match source {
            Value::Object(source) => source,
            _ => Map::new(),
        };
        Self { id: None, source }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Read a string field; wrong-typed values read as `None`
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.source.get(key)? {
            Value::String(s) => Some(s.as_str()),
            other => {
                tracing::debug!("Field '{}' is not a string ({}), ignoring", key, other);
                None
            }
        }
    }

    /// Iterate over every string-valued field in the source
    pub fn string_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.source.iter().filter_map(|(k, v)| match v {
            Value::String(s) => Some((k.as_str(), s.as_str())),
            _ => None,
        })
    }
}

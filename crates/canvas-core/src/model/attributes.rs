use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{CanvasError, Result};

/// Free-form attribute map attached to a post
///
/// Stores arbitrary JSON values under string keys without schema validation.
/// Serializes as a plain JSON object; keys are kept sorted so the stored text
/// is stable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes {
    data: BTreeMap<String, serde_json::Value>,
}

impl Attributes {
    /// Create an empty attribute map
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    /// Parse attributes from stored or caller-supplied JSON text
    ///
    /// Empty or whitespace-only text yields an empty map. Anything that is not
    /// a JSON object is rejected.
    ///
    /// # Errors
    /// * `InvalidAttributes` - text is not a JSON object
    pub fn from_json_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }
        serde_json::from_str(text).map_err(|e| CanvasError::InvalidAttributes {
            reason: e.to_string(),
        })
    }

    /// Serialize to compact JSON object text
    pub fn to_json_string(&self) -> String {
        // A string-keyed map of JSON values always serializes
        serde_json::to_string(&self.data).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Set a value by key
    pub fn set(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }

    /// Remove a value by key
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.data.remove(key)
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<BTreeMap<String, serde_json::Value>> for Attributes {
    fn from(data: BTreeMap<String, serde_json::Value>) -> Self {
        Self { data }
    }
}

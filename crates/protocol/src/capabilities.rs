//! Capability sets exchanged when creating a session.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A set of WebDriver capabilities.
///
/// Capabilities are free-form JSON objects; which keys mean anything is up
/// to the driver binary on the other end. Serializes as the bare object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capabilities(Map<String, Value>);

impl Capabilities {
    /// Creates an empty capability set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a capability, replacing any previous value for the key.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns true if no capabilities are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of capability entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Map<String, Value>> for Capabilities {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

//! Session identity as it appears on the wire.

use crate::Capabilities;
use serde::{Deserialize, Serialize};

/// Opaque identifier the remote end assigns to a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wraps a raw identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One session as reported by the remote end.
///
/// The same shape serves as a create-session reply and as one element of a
/// list-sessions reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Identifier assigned by the remote end.
    pub id: SessionId,
    /// Capabilities the remote end actually negotiated.
    pub capabilities: Capabilities,
}

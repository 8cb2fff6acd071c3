//! Unique identifiers for bridge entities

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Correlation id for one in-flight remote call
///
/// A fresh id is minted per stub invocation and must stay unique among
/// calls that have not yet been resolved; the matching response carries
/// the same id back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(Uuid);

impl CallId {
    /// Creates a new random call ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a call ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Call({})", self.0)
    }
}

/// Token for a handler completion that has been deferred
///
/// A handler that cannot answer synchronously mints a token, keeps it,
/// and later hands it back together with the outcome. Tokens never cross
/// the bus; they are local to the responder side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeferredToken(Uuid);

impl DeferredToken {
    /// Creates a new random deferred token
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DeferredToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DeferredToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deferred({})", self.0)
    }
}

/// Well-known name a bus is published and discovered under
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusId(String);

impl BusId {
    /// Creates a new bus ID
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bus({})", self.0)
    }
}

impl From<&str> for BusId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_id_creation() {
        let id1 = CallId::new();
        let id2 = CallId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_call_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = CallId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), uuid);
    }

    #[test]
    fn test_deferred_token_creation() {
        let tok1 = DeferredToken::new();
        let tok2 = DeferredToken::new();
        assert_ne!(tok1, tok2);
    }

    #[test]
    fn test_call_id_display() {
        let id = CallId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("Call("));
    }

    #[test]
    fn test_bus_id_display() {
        let id = BusId::new("bridge_bus");
        assert_eq!(id.as_str(), "bridge_bus");
        assert_eq!(format!("{}", id), "Bus(bridge_bus)");
    }

    #[test]
    fn test_bus_id_equality() {
        assert_eq!(BusId::from("a"), BusId::new("a"));
        assert_ne!(BusId::from("a"), BusId::from("b"));
    }
}

//! Wire messages exchanged over the bus
//!
//! These three shapes are the only data that crosses the context
//! boundary. Arguments and results are [`serde_json::Value`], which keeps
//! the crossing point restricted to structurally-cloneable data.

use core_types::{CallId, Origin};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Schema version stamped on registrations
///
/// Compatibility follows the major version: a peer ignores registrations
/// whose major differs from its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version (breaking changes)
    pub major: u32,
    /// Minor version (backward-compatible additions)
    pub minor: u32,
}

impl SchemaVersion {
    /// Creates a new schema version
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Checks if this version is compatible with another
    pub fn is_compatible_with(&self, other: &SchemaVersion) -> bool {
        self.major == other.major
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}", self.major, self.minor)
    }
}

/// Current bridge protocol version (v1.0).
pub const BRIDGE_SCHEMA_VERSION: SchemaVersion = SchemaVersion::new(1, 0);

/// A message crossing the context boundary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum BusMessage {
    /// Announces a service and its callable methods to the peer
    RegisterApi {
        /// Public service name
        service: String,
        /// Exposed method names, unique within the service
        methods: Vec<String>,
        /// Protocol version of the announcing side
        schema: SchemaVersion,
    },
    /// Invokes a method on a remote service
    ApiCall {
        /// Target service name
        service: String,
        /// Method to invoke
        action: String,
        /// Positional arguments
        args: Vec<Value>,
        /// Correlation id, unique per in-flight call
        id: CallId,
        /// Side that issued the call
        origin: Origin,
    },
    /// Answers a previously issued call
    ApiResponse {
        /// Correlation id of the call being answered
        id: CallId,
        /// Service that handled the call
        service: String,
        /// Exactly one of value or error message
        outcome: Result<Value, String>,
        /// Side that produced the response
        origin: Origin,
    },
}

impl BusMessage {
    /// Creates a registration announcement at the current protocol version
    pub fn register(service: impl Into<String>, methods: Vec<String>) -> Self {
        BusMessage::RegisterApi {
            service: service.into(),
            methods,
            schema: BRIDGE_SCHEMA_VERSION,
        }
    }

    /// Creates a call message with a fresh correlation id
    pub fn call(
        service: impl Into<String>,
        action: impl Into<String>,
        args: Vec<Value>,
        origin: Origin,
    ) -> Self {
        BusMessage::ApiCall {
            service: service.into(),
            action: action.into(),
            args,
            id: CallId::new(),
            origin,
        }
    }

    /// Creates a response carrying the given outcome
    pub fn response(
        id: CallId,
        service: impl Into<String>,
        outcome: Result<Value, String>,
        origin: Origin,
    ) -> Self {
        BusMessage::ApiResponse {
            id,
            service: service.into(),
            outcome,
            origin,
        }
    }

    /// Returns the origin tag, if this message type carries one
    pub fn origin(&self) -> Option<Origin> {
        match self {
            BusMessage::RegisterApi { .. } => None,
            BusMessage::ApiCall { origin, .. } => Some(*origin),
            BusMessage::ApiResponse { origin, .. } => Some(*origin),
        }
    }

    /// Checks if this is a registration announcement
    pub fn is_registration(&self) -> bool {
        matches!(self, BusMessage::RegisterApi { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_version_compatibility() {
        let v1_0 = SchemaVersion::new(1, 0);
        let v1_3 = SchemaVersion::new(1, 3);
        let v2_0 = SchemaVersion::new(2, 0);

        assert!(v1_0.is_compatible_with(&v1_3));
        assert!(v1_3.is_compatible_with(&v1_0));
        assert!(!v1_0.is_compatible_with(&v2_0));
    }

    #[test]
    fn test_register_carries_current_schema() {
        let msg = BusMessage::register("mathService", vec!["add".to_string()]);
        match msg {
            BusMessage::RegisterApi {
                service,
                methods,
                schema,
            } => {
                assert_eq!(service, "mathService");
                assert_eq!(methods, vec!["add"]);
                assert_eq!(schema, BRIDGE_SCHEMA_VERSION);
            }
            _ => panic!("expected RegisterApi"),
        }
    }

    #[test]
    fn test_call_mints_unique_ids() {
        let a = BusMessage::call("svc", "m", vec![], Origin::Client);
        let b = BusMessage::call("svc", "m", vec![], Origin::Client);
        match (a, b) {
            (
                BusMessage::ApiCall { id: id_a, .. },
                BusMessage::ApiCall { id: id_b, .. },
            ) => assert_ne!(id_a, id_b),
            _ => panic!("expected ApiCall"),
        }
    }

    #[test]
    fn test_origin_tags() {
        let reg = BusMessage::register("svc", vec![]);
        assert_eq!(reg.origin(), None);

        let call = BusMessage::call("svc", "m", vec![], Origin::Client);
        assert_eq!(call.origin(), Some(Origin::Client));

        let resp = BusMessage::response(
            CallId::new(),
            "svc",
            Ok(json!(5)),
            Origin::Provider,
        );
        assert_eq!(resp.origin(), Some(Origin::Provider));
    }

    #[test]
    fn test_response_outcome_is_exclusive() {
        let ok = BusMessage::response(CallId::new(), "svc", Ok(json!("v")), Origin::Provider);
        let err = BusMessage::response(
            CallId::new(),
            "svc",
            Err("kaboom".to_string()),
            Origin::Provider,
        );
        match (ok, err) {
            (
                BusMessage::ApiResponse { outcome: Ok(v), .. },
                BusMessage::ApiResponse {
                    outcome: Err(e), ..
                },
            ) => {
                assert_eq!(v, json!("v"));
                assert_eq!(e, "kaboom");
            }
            _ => panic!("expected ApiResponse pair"),
        }
    }

    #[test]
    fn test_message_json_round_trip() {
        let msg = BusMessage::call("svc", "add", vec![json!(2), json!(3)], Origin::Client);
        let bytes = serde_json::to_vec(&msg).unwrap();
        let back: BusMessage = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, msg);
    }
}

//! Bridge error taxonomy

use core_types::DeferredToken;
use thiserror::Error;

/// Error constructing a service manifest
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    /// Service name must be non-empty
    #[error("service name must not be empty")]
    EmptyServiceName,

    /// Method names must be unique within a service
    #[error("duplicate method '{method}' in manifest for service '{service}'")]
    DuplicateMethod { service: String, method: String },
}

/// Error exposing a service on the responder side
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExposeError {
    /// A service is already exposed under this name
    #[error("service '{0}' is already exposed")]
    AlreadyExposed(String),
}

/// Error issuing a call from the caller side
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// No stub exists under this service name
    #[error("no stub for service '{0}'; registration has not arrived")]
    UnknownService(String),

    /// The stub does not expose this method
    #[error("service '{service}' does not expose method '{method}'")]
    UnknownMethod { service: String, method: String },
}

/// Error completing deferred handler work
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeferredError {
    /// The token does not name in-flight deferred work
    #[error("no deferred call for token {0}")]
    UnknownToken(DeferredToken),
}

/// Failure reported by the remote handler
///
/// Carries exactly the human-readable message the responding side put on
/// the wire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct RemoteError(pub String);

impl RemoteError {
    /// Returns the remote error message
    pub fn message(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_message_is_verbatim() {
        let err = RemoteError("kaboom".to_string());
        assert_eq!(err.message(), "kaboom");
        assert_eq!(format!("{}", err), "kaboom");
    }

    #[test]
    fn test_call_error_display() {
        let err = CallError::UnknownMethod {
            service: "mathService".to_string(),
            method: "pow".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("mathService"));
        assert!(msg.contains("pow"));
    }
}

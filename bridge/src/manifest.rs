//! Service manifests and the handler contract
//!
//! A manifest is the statically declared callable surface of a service.
//! The responder gates incoming calls against it, and its method list is
//! what the registration announcement carries to the peer.

use crate::error::ManifestError;
use core_types::DeferredToken;
use serde_json::Value;
use std::collections::HashSet;

/// Declared name and method list of a service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceManifest {
    name: String,
    methods: Vec<String>,
}

impl ServiceManifest {
    /// Creates a manifest, validating name and method uniqueness
    pub fn new<I, S>(name: impl Into<String>, methods: I) -> Result<Self, ManifestError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(ManifestError::EmptyServiceName);
        }

        let methods: Vec<String> = methods.into_iter().map(Into::into).collect();
        let mut seen = HashSet::new();
        for method in &methods {
            if !seen.insert(method.as_str()) {
                return Err(ManifestError::DuplicateMethod {
                    service: name,
                    method: method.clone(),
                });
            }
        }

        Ok(Self { name, methods })
    }

    /// Returns the public service name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared method names, in declaration order
    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    /// Checks whether the manifest declares `method`
    pub fn has_method(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m == method)
    }
}

/// Outcome of one handler invocation
#[derive(Debug)]
pub enum HandlerReply {
    /// The handler finished; the outcome can be answered immediately
    Ready(Result<Value, String>),
    /// The handler is still working; the host completes it later via
    /// `ResponderRegistry::complete` with the same token
    Deferred(DeferredToken),
}

impl HandlerReply {
    /// Convenience constructor for a successful immediate reply
    pub fn ok(value: Value) -> Self {
        HandlerReply::Ready(Ok(value))
    }

    /// Convenience constructor for a failed immediate reply
    pub fn err(message: impl Into<String>) -> Self {
        HandlerReply::Ready(Err(message.into()))
    }
}

/// A locally held service the registry can dispatch calls into
///
/// Handlers receive only what crossed the wire: the action name and the
/// positional arguments. A handler that cannot answer within the call
/// returns a deferred token and reports the outcome later.
pub trait ServiceHandler {
    /// Invokes `action` with positional `args`
    fn invoke(&mut self, action: &str, args: Vec<Value>) -> HandlerReply;
}

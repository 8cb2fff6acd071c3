//! Caller side: stub synthesis and pending-call correlation
//!
//! The proxy turns registration announcements into local stubs and stub
//! invocations into correlated call messages. Responses settle pending
//! entries strictly by correlation id; arrival order carries no meaning.

use crate::error::{CallError, RemoteError};
use crate::trace::{TraceEntry, TraceLevel, TraceLog};
use bus::{BusMessage, Channel, EventBus, BRIDGE_SCHEMA_VERSION};
use core_types::{CallId, Origin};
use serde_json::Value;
use std::collections::HashMap;

/// Locally synthesized stand-in for a remote service
///
/// Holds the method set announced at registration time; that set never
/// changes afterward, even if the peer re-announces the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStub {
    service: String,
    methods: Vec<String>,
}

impl ServiceStub {
    /// Returns the remote service name
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Returns the announced method names
    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    /// Checks whether the stub exposes `method`
    pub fn has_method(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m == method)
    }
}

/// Handle for one issued call, redeemable once for its outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallHandle {
    id: CallId,
    service: String,
    action: String,
}

impl CallHandle {
    /// Returns the correlation id of the call
    pub fn id(&self) -> CallId {
        self.id
    }

    /// Returns the target service name
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Returns the invoked method name
    pub fn action(&self) -> &str {
        &self.action
    }
}

enum PendingState {
    Waiting,
    Settled(Result<Value, RemoteError>),
}

/// Proxy synthesizing stubs and correlating calls with responses
pub struct CallerProxy {
    origin: Origin,
    stubs: HashMap<String, ServiceStub>,
    pending: HashMap<CallId, PendingState>,
    trace: TraceLog,
}

impl CallerProxy {
    /// Creates a proxy and attaches its endpoint to the bus
    pub fn new(origin: Origin, bus: &mut EventBus) -> Self {
        bus.attach(origin);
        Self {
            origin,
            stubs: HashMap::new(),
            pending: HashMap::new(),
            trace: TraceLog::default(),
        }
    }

    /// Drains both channels: builds stubs from registrations and settles
    /// pending calls from responses
    pub fn process(&mut self, bus: &mut EventBus) {
        for message in bus.drain(self.origin, Channel::Call) {
            if let BusMessage::RegisterApi {
                service,
                methods,
                schema,
            } = message
            {
                self.handle_registration(service, methods, schema);
            }
            // ApiCall traffic is addressed to the responder side.
        }

        for message in bus.drain(self.origin, Channel::Response) {
            if let BusMessage::ApiResponse {
                id,
                outcome,
                origin,
                ..
            } = message
            {
                if origin == self.origin {
                    continue;
                }
                self.handle_response(id, outcome);
            }
        }
    }

    fn handle_registration(
        &mut self,
        service: String,
        methods: Vec<String>,
        schema: bus::SchemaVersion,
    ) {
        if !schema.is_compatible_with(&BRIDGE_SCHEMA_VERSION) {
            self.trace.record(
                TraceEntry::new(TraceLevel::Warn, "ignored registration with incompatible schema")
                    .with_field("service", service)
                    .with_field("schema", schema.to_string()),
            );
            return;
        }
        if self.stubs.contains_key(&service) {
            // First registration wins; a repeat is a no-op, not an update.
            self.trace.record(
                TraceEntry::new(TraceLevel::Info, "ignored repeat registration")
                    .with_field("service", service),
            );
            return;
        }
        self.stubs.insert(
            service.clone(),
            ServiceStub {
                service,
                methods,
            },
        );
    }

    fn handle_response(&mut self, id: CallId, outcome: Result<Value, String>) {
        match self.pending.get_mut(&id) {
            Some(state @ PendingState::Waiting) => {
                *state = PendingState::Settled(outcome.map_err(RemoteError));
            }
            Some(PendingState::Settled(_)) | None => {
                // Stale or duplicate delivery; expected, not an error.
                self.trace.record(
                    TraceEntry::new(TraceLevel::Debug, "ignored stale response")
                        .with_field("id", id.to_string()),
                );
            }
        }
    }

    /// Returns the stub for `service`, if its registration has arrived
    pub fn stub(&self, service: &str) -> Option<&ServiceStub> {
        self.stubs.get(service)
    }

    /// Issues a call through a stub
    ///
    /// Fails locally if no stub exists or the stub does not expose the
    /// method; otherwise records a pending entry and emits the call.
    pub fn invoke(
        &mut self,
        service: &str,
        action: &str,
        args: Vec<Value>,
        bus: &mut EventBus,
    ) -> Result<CallHandle, CallError> {
        let stub = self
            .stubs
            .get(service)
            .ok_or_else(|| CallError::UnknownService(service.to_string()))?;
        if !stub.has_method(action) {
            return Err(CallError::UnknownMethod {
                service: service.to_string(),
                method: action.to_string(),
            });
        }

        let id = CallId::new();
        self.pending.insert(id, PendingState::Waiting);
        bus.publish(
            self.origin,
            Channel::Call,
            BusMessage::ApiCall {
                service: service.to_string(),
                action: action.to_string(),
                args,
                id,
                origin: self.origin,
            },
        );
        Ok(CallHandle {
            id,
            service: service.to_string(),
            action: action.to_string(),
        })
    }

    /// Checks whether a call's response has arrived
    pub fn is_settled(&self, handle: &CallHandle) -> bool {
        matches!(
            self.pending.get(&handle.id),
            Some(PendingState::Settled(_))
        )
    }

    /// Takes the outcome of a settled call, removing its entry
    ///
    /// Returns `None` while the call is still waiting (or was already
    /// taken). A call whose response never arrives stays pending forever;
    /// there is no timeout.
    pub fn take_result(&mut self, handle: &CallHandle) -> Option<Result<Value, RemoteError>> {
        if !self.is_settled(handle) {
            return None;
        }
        match self.pending.remove(&handle.id) {
            Some(PendingState::Settled(outcome)) => Some(outcome),
            _ => None,
        }
    }

    /// Returns the number of calls still awaiting a response
    pub fn pending_calls(&self) -> usize {
        self.pending
            .values()
            .filter(|state| matches!(state, PendingState::Waiting))
            .count()
    }

    /// Returns the number of known stubs
    pub fn stub_count(&self) -> usize {
        self.stubs.len()
    }

    /// Returns the diagnostic trace
    pub fn trace(&self) -> &TraceLog {
        &self.trace
    }
}

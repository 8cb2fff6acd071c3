//! Responder side: service table, readiness queue, call dispatch
//!
//! The registry owns the live service handlers. Registrations announced
//! before the peer signals readiness are held in a FIFO backlog and
//! flushed once, in order, when the signal arrives; the queue is bypassed
//! for the rest of the process lifetime.

use crate::error::{DeferredError, ExposeError};
use crate::manifest::{HandlerReply, ServiceHandler, ServiceManifest};
use crate::trace::{TraceEntry, TraceLevel, TraceLog};
use bus::{BusMessage, Channel, EventBus};
use core_types::{CallId, DeferredToken, Origin};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};

/// What to do with a call naming no exposed service or method
///
/// The default is to drop such calls silently, which leaves the
/// caller's pending entry unresolved forever. Hosts that prefer a
/// hard failure opt into `Reject`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownCallPolicy {
    /// Drop the call without a response
    #[default]
    Ignore,
    /// Answer with an explicit error response
    Reject,
}

struct ServiceEntry {
    manifest: ServiceManifest,
    handler: Box<dyn ServiceHandler>,
}

struct DeferredCall {
    id: CallId,
    service: String,
}

/// Registry of exposed services on one side of the bridge
pub struct ResponderRegistry {
    origin: Origin,
    services: HashMap<String, ServiceEntry>,
    backlog: VecDeque<BusMessage>,
    remote_ready: bool,
    deferred: HashMap<DeferredToken, DeferredCall>,
    policy: UnknownCallPolicy,
    trace: TraceLog,
}

impl ResponderRegistry {
    /// Creates a registry and attaches its endpoint to the bus
    pub fn new(origin: Origin, bus: &mut EventBus) -> Self {
        Self::with_policy(origin, bus, UnknownCallPolicy::default())
    }

    /// Creates a registry with an explicit unknown-call policy
    pub fn with_policy(origin: Origin, bus: &mut EventBus, policy: UnknownCallPolicy) -> Self {
        bus.attach(origin);
        Self {
            origin,
            services: HashMap::new(),
            backlog: VecDeque::new(),
            remote_ready: false,
            deferred: HashMap::new(),
            policy,
            trace: TraceLog::default(),
        }
    }

    /// Exposes a service under its manifest name
    ///
    /// The registration announcement is published immediately if the
    /// peer has signaled readiness, otherwise queued.
    pub fn expose(
        &mut self,
        manifest: ServiceManifest,
        handler: Box<dyn ServiceHandler>,
        bus: &mut EventBus,
    ) -> Result<(), ExposeError> {
        let name = manifest.name().to_string();
        if self.services.contains_key(&name) {
            return Err(ExposeError::AlreadyExposed(name));
        }

        let announcement = BusMessage::register(name.clone(), manifest.methods().to_vec());
        self.services.insert(name.clone(), ServiceEntry { manifest, handler });

        if self.remote_ready {
            bus.publish(self.origin, Channel::Call, announcement);
        } else {
            self.backlog.push_back(announcement);
            self.trace.record(
                TraceEntry::new(TraceLevel::Info, "queued registration until peer is ready")
                    .with_field("service", name),
            );
        }
        Ok(())
    }

    /// Marks the peer ready and flushes queued registrations in FIFO order
    ///
    /// The transition is one-way; repeat signals are no-ops.
    pub fn mark_remote_ready(&mut self, bus: &mut EventBus) {
        if self.remote_ready {
            return;
        }
        self.remote_ready = true;

        let flushed = self.backlog.len();
        while let Some(announcement) = self.backlog.pop_front() {
            bus.publish(self.origin, Channel::Call, announcement);
        }
        self.trace.record(
            TraceEntry::new(TraceLevel::Info, "peer ready, flushed queued registrations")
                .with_field("count", flushed.to_string()),
        );
    }

    /// Returns whether the peer has signaled readiness
    pub fn is_remote_ready(&self) -> bool {
        self.remote_ready
    }

    /// Returns the number of registrations still queued
    pub fn queued_registrations(&self) -> usize {
        self.backlog.len()
    }

    /// Drains the call channel and dispatches every incoming call
    pub fn process(&mut self, bus: &mut EventBus) {
        for message in bus.drain(self.origin, Channel::Call) {
            match message {
                BusMessage::ApiCall {
                    service,
                    action,
                    args,
                    id,
                    origin,
                } if origin != self.origin => {
                    self.dispatch(service, action, args, id, bus);
                }
                // Own-origin calls and peer registrations are not ours.
                _ => {}
            }
        }
    }

    fn dispatch(
        &mut self,
        service: String,
        action: String,
        args: Vec<Value>,
        id: CallId,
        bus: &mut EventBus,
    ) {
        let entry = match self.services.get_mut(&service) {
            Some(entry) if entry.manifest.has_method(&action) => entry,
            _ => {
                self.trace.record(
                    TraceEntry::new(TraceLevel::Warn, "call for unknown service or method")
                        .with_field("service", service.clone())
                        .with_field("action", action.clone()),
                );
                if self.policy == UnknownCallPolicy::Reject {
                    let outcome = Err(format!("unknown method '{}.{}'", service, action));
                    bus.publish(
                        self.origin,
                        Channel::Response,
                        BusMessage::response(id, service, outcome, self.origin),
                    );
                }
                return;
            }
        };

        match entry.handler.invoke(&action, args) {
            HandlerReply::Ready(outcome) => {
                bus.publish(
                    self.origin,
                    Channel::Response,
                    BusMessage::response(id, service, outcome, self.origin),
                );
            }
            HandlerReply::Deferred(token) => {
                self.deferred.insert(token, DeferredCall { id, service });
                self.trace.record(
                    TraceEntry::new(TraceLevel::Debug, "handler deferred completion")
                        .with_field("token", token.to_string()),
                );
            }
        }
    }

    /// Completes deferred handler work and emits the response
    pub fn complete(
        &mut self,
        token: DeferredToken,
        outcome: Result<Value, String>,
        bus: &mut EventBus,
    ) -> Result<(), DeferredError> {
        let call = self
            .deferred
            .remove(&token)
            .ok_or(DeferredError::UnknownToken(token))?;
        bus.publish(
            self.origin,
            Channel::Response,
            BusMessage::response(call.id, call.service, outcome, self.origin),
        );
        Ok(())
    }

    /// Returns the number of deferred calls still awaiting completion
    pub fn deferred_calls(&self) -> usize {
        self.deferred.len()
    }

    /// Returns the number of exposed services
    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    /// Returns the diagnostic trace
    pub fn trace(&self) -> &TraceLog {
        &self.trace
    }
}

//! # Cross-Context Bridge
//!
//! This crate implements the request/response bridge between the two
//! sides of a bus: a responder registry exposing named services for
//! remote invocation, and a caller proxy synthesizing local stubs for
//! them.
//!
//! ## Philosophy
//!
//! - **Declared, not discovered**: a service's callable surface is a
//!   static [`ServiceManifest`] written by the implementer, never scraped
//!   from an instance at runtime.
//! - **Injected transport**: both sides receive the bus explicitly at
//!   every processing step; there is no ambient global to look up.
//! - **Failures are data**: anything that goes wrong inside a remotely
//!   invoked handler travels back as an error string on a normal
//!   response, never as a transport fault.
//!
//! ## Data flow
//!
//! The registry announces a service's name and method list → the proxy
//! builds a stub → a stub invocation emits a correlated call → the
//! registry executes the handler and emits a correlated response → the
//! proxy settles the pending entry whose id matches.

pub mod caller;
pub mod error;
pub mod manifest;
pub mod responder;
pub mod trace;

pub use caller::{CallHandle, CallerProxy, ServiceStub};
pub use error::{CallError, DeferredError, ExposeError, ManifestError, RemoteError};
pub use manifest::{HandlerReply, ServiceHandler, ServiceManifest};
pub use responder::{ResponderRegistry, UnknownCallPolicy};
pub use trace::{TraceEntry, TraceLevel, TraceLog};

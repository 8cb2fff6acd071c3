//! # Core Types
//!
//! This crate defines the fundamental types shared by the bus and bridge.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: every identifier is a distinct newtype;
//!   a call id cannot be confused with a deferred-work token.
//! - **Serializable by construction**: everything that may cross the
//!   context boundary derives `Serialize`/`Deserialize`.
//! - **Two worlds, one tag**: every message names its originating side so
//!   a context never reacts to its own traffic.
//!
//! ## Key Types
//!
//! - [`CallId`]: correlation id pairing a call with its response
//! - [`DeferredToken`]: handle for a handler completion still in flight
//! - [`Origin`]: which side of the bridge produced a message
//! - [`BusId`]: well-known name under which a bus is discovered

pub mod ids;
pub mod origin;

pub use ids::{BusId, CallId, DeferredToken};
pub use origin::Origin;

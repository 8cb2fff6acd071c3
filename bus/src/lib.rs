//! # Message Bus
//!
//! This crate defines the transport between the two bridge contexts.
//!
//! ## Philosophy
//!
//! - **Messages, not shared memory**: the two sides exchange plain
//!   serializable data and nothing else — no live references, no callables.
//! - **Fire-and-forget**: publishing toward a side whose endpoint is not
//!   attached drops the message; delivery is never retried.
//! - **Traceable**: every call carries a correlation id, every message an
//!   origin tag.
//! - **Versionable**: registrations are stamped with a schema version so
//!   the protocol can evolve.
//!
//! ## Architecture
//!
//! A [`EventBus`] carries two named one-way channels ("call" and
//! "response"). Each side attaches once and then drains its own inbox per
//! channel; publishing routes a message to the *other* side's inbox. Buses
//! are discovered through a [`BusHub`] under a well-known [`BusId`], with
//! create-if-absent semantics so initialization order between the two
//! sides does not matter.
//!
//! [`BusId`]: core_types::BusId

pub mod channel;
pub mod hub;
pub mod message;
pub mod transport;

pub use channel::Channel;
pub use hub::BusHub;
pub use message::{BusMessage, SchemaVersion, BRIDGE_SCHEMA_VERSION};
pub use transport::{EventBus, TransportError};

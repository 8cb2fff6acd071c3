//! Bootstrap scenario: the configuration service over a live bridge
//!
//! Mirrors the production bootstrap: the provider side exposes the
//! config service before the client is ready, the client comes up,
//! stubs appear, and settings and positions flow across the bus.

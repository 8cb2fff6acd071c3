//! Source tag identifying which side of the bridge produced a message

use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of the two-context bridge
///
/// Every message carries the origin of the side that emitted it, and each
/// side only acts on messages carrying the *other* origin. The provider
/// side holds service instances; the client side holds the stubs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// The side exposing services and answering calls
    Provider,
    /// The side synthesizing stubs and issuing calls
    Client,
}

impl Origin {
    /// Returns the opposite side
    pub fn peer(&self) -> Origin {
        match self {
            Origin::Provider => Origin::Client,
            Origin::Client => Origin::Provider,
        }
    }

    /// Checks if this is the provider side
    pub fn is_provider(&self) -> bool {
        matches!(self, Origin::Provider)
    }

    /// Checks if this is the client side
    pub fn is_client(&self) -> bool {
        matches!(self, Origin::Client)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Provider => write!(f, "provider"),
            Origin::Client => write!(f, "client"),
        }
    }
}

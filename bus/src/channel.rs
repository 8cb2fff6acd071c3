//! Named broadcast channels carried by a bus

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two channels a bus carries
///
/// Registrations and calls travel on the call channel; responses travel
/// on the response channel. The split mirrors the two event names the
/// sides agree on at bus-creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Carries `RegisterApi` and `ApiCall` messages
    Call,
    /// Carries `ApiResponse` messages
    Response,
}

impl Channel {
    /// Returns all channels, in a stable order
    pub fn all() -> [Channel; 2] {
        [Channel::Call, Channel::Response]
    }

    /// Index used for per-channel storage
    pub(crate) fn index(&self) -> usize {
        match self {
            Channel::Call => 0,
            Channel::Response => 1,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Call => write!(f, "call"),
            Channel::Response => write!(f, "response"),
        }
    }
}

//! Shared bus carrying messages between the two contexts
//!
//! Delivery is deterministic FIFO per channel, at-most-once, with no
//! persistence: a message published while the receiving side has not
//! attached its endpoint is dropped and only counted.

use crate::channel::Channel;
use crate::message::BusMessage;
use core_types::{BusId, Origin};
use std::collections::VecDeque;
use thiserror::Error;

/// Transport error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The well-known bus was never created
    #[error("bus '{0}' not found; the counterpart side must create it first")]
    BusNotFound(BusId),
}

fn side_index(origin: Origin) -> usize {
    match origin {
        Origin::Provider => 0,
        Origin::Client => 1,
    }
}

/// Two-channel broadcast bus between two origins
///
/// Each origin owns one inbox per channel. `publish` routes a message to
/// the *peer* origin's inbox; a side never receives its own traffic.
#[derive(Debug, Default)]
pub struct EventBus {
    inboxes: [[VecDeque<BusMessage>; 2]; 2],
    attached: [bool; 2],
    dropped: u64,
}

impl EventBus {
    /// Creates a bus with no endpoints attached
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches an origin's endpoint so it starts receiving messages
    ///
    /// Attaching twice is a no-op; both sides treat the live bus as
    /// shared state they merely join.
    pub fn attach(&mut self, origin: Origin) {
        self.attached[side_index(origin)] = true;
    }

    /// Checks whether an origin has attached its endpoint
    pub fn is_attached(&self, origin: Origin) -> bool {
        self.attached[side_index(origin)]
    }

    /// Broadcasts a message from `from` to the peer origin on `channel`
    ///
    /// Fire-and-forget: if the peer has not attached, the message is
    /// dropped and the drop counter incremented.
    pub fn publish(&mut self, from: Origin, channel: Channel, message: BusMessage) {
        let peer = from.peer();
        if !self.is_attached(peer) {
            self.dropped += 1;
            return;
        }
        self.inboxes[side_index(peer)][channel.index()].push_back(message);
    }

    /// Drains every queued message for `origin` on `channel`, in order
    pub fn drain(&mut self, origin: Origin, channel: Channel) -> Vec<BusMessage> {
        self.inboxes[side_index(origin)][channel.index()]
            .drain(..)
            .collect()
    }

    /// Returns the number of messages queued for `origin` on `channel`
    pub fn queued(&self, origin: Origin, channel: Channel) -> usize {
        self.inboxes[side_index(origin)][channel.index()].len()
    }

    /// Returns the number of messages dropped for lack of a listener
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

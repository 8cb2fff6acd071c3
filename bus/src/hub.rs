//! Discovery of buses under well-known names
//!
//! An explicit directory object handed to both sides: whichever side
//! initializes first creates the bus, the other joins it.

use crate::transport::{EventBus, TransportError};
use core_types::BusId;
use std::collections::HashMap;

/// Directory of live buses keyed by well-known id
#[derive(Debug, Default)]
pub struct BusHub {
    buses: HashMap<BusId, EventBus>,
}

impl BusHub {
    /// Creates an empty hub
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the bus under `id`, creating it if absent
    ///
    /// Check-then-create is idempotent, so initialization order between
    /// the two sides is irrelevant.
    pub fn open_or_create(&mut self, id: &BusId) -> &mut EventBus {
        self.buses.entry(id.clone()).or_default()
    }

    /// Opens an existing bus, failing fast if it was never created
    ///
    /// The side that depends on the counterpart having bootstrapped first
    /// uses this; a missing bus is a broken local precondition, not a
    /// condition to degrade under.
    pub fn open_existing(&mut self, id: &BusId) -> Result<&mut EventBus, TransportError> {
        self.buses
            .get_mut(id)
            .ok_or_else(|| TransportError::BusNotFound(id.clone()))
    }

    /// Checks whether a bus exists under `id`
    pub fn contains(&self, id: &BusId) -> bool {
        self.buses.contains_key(id)
    }

    /// Returns the number of live buses
    pub fn count(&self) -> usize {
        self.buses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Origin;

    #[test]
    fn test_open_or_create_is_idempotent() {
        let mut hub = BusHub::new();
        let id = BusId::from("bridge_bus");

        hub.open_or_create(&id).attach(Origin::Provider);
        // Second open must join the same live bus, not replace it.
        assert!(hub.open_or_create(&id).is_attached(Origin::Provider));
        assert_eq!(hub.count(), 1);
    }

    #[test]
    fn test_open_existing_found() {
        let mut hub = BusHub::new();
        let id = BusId::from("bridge_bus");
        hub.open_or_create(&id);

        assert!(hub.open_existing(&id).is_ok());
    }

    #[test]
    fn test_open_existing_fails_fast_when_absent() {
        let mut hub = BusHub::new();
        let id = BusId::from("missing");

        let err = hub.open_existing(&id).err().unwrap();
        assert_eq!(err, TransportError::BusNotFound(id));
    }

    #[test]
    fn test_contains() {
        let mut hub = BusHub::new();
        let id = BusId::from("bridge_bus");
        assert!(!hub.contains(&id));
        hub.open_or_create(&id);
        assert!(hub.contains(&id));
    }
}

//! # Bridge Contract Tests
//!
//! This crate provides "golden" tests for the bridge protocol to ensure
//! it doesn't drift accidentally over time, plus end-to-end scenarios
//! driving both sides of a live bus.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: the wire contract is written as code
//! - **Testability first**: contract tests fail when message shapes change
//! - **Both sides, one bus**: scenarios run a real registry and proxy
//!   against a shared bus, never mocks

pub mod bridge_scenarios;
pub mod config_service;
pub mod wire;

/// Common helpers for driving both sides of a bridge
pub mod test_helpers {
    use bridge::{CallerProxy, HandlerReply, ResponderRegistry, ServiceHandler};
    use bus::EventBus;
    use core_types::DeferredToken;
    use serde_json::{json, Value};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Runs one cooperative turn for each side
    pub fn pump(registry: &mut ResponderRegistry, proxy: &mut CallerProxy, bus: &mut EventBus) {
        registry.process(bus);
        proxy.process(bus);
    }

    /// Arithmetic service used by the round-trip scenarios
    pub struct MathService;

    impl ServiceHandler for MathService {
        fn invoke(&mut self, action: &str, args: Vec<Value>) -> HandlerReply {
            match action {
                "add" => {
                    let a = args.first().and_then(Value::as_i64).unwrap_or(0);
                    let b = args.get(1).and_then(Value::as_i64).unwrap_or(0);
                    HandlerReply::ok(json!(a + b))
                }
                _ => HandlerReply::err(format!("no such action: {}", action)),
            }
        }
    }

    /// Service whose only method fails with a fixed message
    pub struct Failer;

    impl ServiceHandler for Failer {
        fn invoke(&mut self, _action: &str, _args: Vec<Value>) -> HandlerReply {
            HandlerReply::err("kaboom")
        }
    }

    /// Service that defers every call and logs the minted token
    ///
    /// The shared log lets a scenario complete calls in any order it
    /// likes, modeling handlers whose execution durations vary.
    pub struct Deferring {
        log: Rc<RefCell<Vec<(String, DeferredToken)>>>,
    }

    impl Deferring {
        /// Creates the service and the shared token log
        pub fn new() -> (Self, Rc<RefCell<Vec<(String, DeferredToken)>>>) {
            let log = Rc::new(RefCell::new(Vec::new()));
            (Self { log: log.clone() }, log)
        }
    }

    impl ServiceHandler for Deferring {
        fn invoke(&mut self, action: &str, _args: Vec<Value>) -> HandlerReply {
            let token = DeferredToken::new();
            self.log.borrow_mut().push((action.to_string(), token));
            HandlerReply::Deferred(token)
        }
    }
}

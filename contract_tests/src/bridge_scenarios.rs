//! End-to-end scenarios driving both sides of a live bus
//!
//! Each scenario bootstraps a real registry and proxy against a shared
//! bus discovered through the hub, then pumps both sides cooperatively.

#[cfg(test)]
mod tests {
    use crate::test_helpers::*;
    use bridge::{CallerProxy, ResponderRegistry, ServiceManifest};
    use bus::{BusHub, BusMessage, Channel, EventBus};
    use core_types::{BusId, Origin};
    use serde_json::json;

    fn bootstrap() -> (EventBus, ResponderRegistry, CallerProxy) {
        let mut bus = EventBus::new();
        let mut registry = ResponderRegistry::new(Origin::Provider, &mut bus);
        let proxy = CallerProxy::new(Origin::Client, &mut bus);
        registry.mark_remote_ready(&mut bus);
        (bus, registry, proxy)
    }

    fn expose(
        registry: &mut ResponderRegistry,
        bus: &mut EventBus,
        name: &str,
        methods: &[&str],
        handler: Box<dyn bridge::ServiceHandler>,
    ) {
        let manifest = ServiceManifest::new(name, methods.iter().copied()).unwrap();
        registry.expose(manifest, handler, bus).unwrap();
    }

    #[test]
    fn test_round_trip_math_add() {
        let (mut bus, mut registry, mut proxy) = bootstrap();
        expose(&mut registry, &mut bus, "mathService", &["add"], Box::new(MathService));
        pump(&mut registry, &mut proxy, &mut bus);

        let handle = proxy
            .invoke("mathService", "add", vec![json!(2), json!(3)], &mut bus)
            .unwrap();
        pump(&mut registry, &mut proxy, &mut bus);

        assert_eq!(proxy.take_result(&handle).unwrap().unwrap(), json!(5));
    }

    #[test]
    fn test_remote_failure_propagates_message() {
        let (mut bus, mut registry, mut proxy) = bootstrap();
        expose(&mut registry, &mut bus, "failer", &["boom"], Box::new(Failer));
        pump(&mut registry, &mut proxy, &mut bus);

        let handle = proxy.invoke("failer", "boom", vec![], &mut bus).unwrap();
        pump(&mut registry, &mut proxy, &mut bus);

        let err = proxy.take_result(&handle).unwrap().err().unwrap();
        assert_eq!(err.message(), "kaboom");
    }

    #[test]
    fn test_reversed_completion_order_correlates() {
        let (mut bus, mut registry, mut proxy) = bootstrap();
        let (service, log) = Deferring::new();
        expose(
            &mut registry,
            &mut bus,
            "svc",
            &["slow", "fast"],
            Box::new(service),
        );
        pump(&mut registry, &mut proxy, &mut bus);

        let slow = proxy.invoke("svc", "slow", vec![], &mut bus).unwrap();
        let fast = proxy.invoke("svc", "fast", vec![], &mut bus).unwrap();
        registry.process(&mut bus);
        assert_eq!(registry.deferred_calls(), 2);

        // Complete in reverse issue order: fast finishes first.
        let tokens = log.borrow().clone();
        let fast_token = tokens.iter().find(|(a, _)| a == "fast").unwrap().1;
        let slow_token = tokens.iter().find(|(a, _)| a == "slow").unwrap().1;

        registry.complete(fast_token, Ok(json!("fast")), &mut bus).unwrap();
        proxy.process(&mut bus);
        assert!(proxy.is_settled(&fast));
        assert!(!proxy.is_settled(&slow));

        registry.complete(slow_token, Ok(json!("slow")), &mut bus).unwrap();
        proxy.process(&mut bus);

        assert_eq!(proxy.take_result(&fast).unwrap().unwrap(), json!("fast"));
        assert_eq!(proxy.take_result(&slow).unwrap().unwrap(), json!("slow"));
    }

    #[test]
    fn test_many_concurrent_calls_settle_independently() {
        let (mut bus, mut registry, mut proxy) = bootstrap();
        let (service, log) = Deferring::new();
        expose(&mut registry, &mut bus, "svc", &["echo"], Box::new(service));
        pump(&mut registry, &mut proxy, &mut bus);

        let handles: Vec<_> = (0..8)
            .map(|i| proxy.invoke("svc", "echo", vec![json!(i)], &mut bus).unwrap())
            .collect();
        registry.process(&mut bus);

        // Complete in scrambled order, each with a distinct value.
        let tokens: Vec<_> = log.borrow().iter().map(|(_, t)| *t).collect();
        for (i, token) in tokens.iter().enumerate().rev() {
            registry.complete(*token, Ok(json!(i)), &mut bus).unwrap();
        }
        proxy.process(&mut bus);

        for (i, handle) in handles.iter().enumerate() {
            assert_eq!(proxy.take_result(handle).unwrap().unwrap(), json!(i));
        }
    }

    #[test]
    fn test_idempotent_registration_keeps_first_method_set() {
        let (mut bus, mut registry, mut proxy) = bootstrap();
        expose(&mut registry, &mut bus, "svc", &["a", "b"], Box::new(MathService));
        pump(&mut registry, &mut proxy, &mut bus);

        // A second announcement for the same name, now with an extra
        // method, must not widen the stub.
        bus.publish(
            Origin::Provider,
            Channel::Call,
            BusMessage::register(
                "svc",
                vec!["a".to_string(), "b".to_string(), "c".to_string()],
            ),
        );
        proxy.process(&mut bus);

        let stub = proxy.stub("svc").unwrap();
        assert_eq!(stub.methods(), ["a", "b"]);
        assert!(proxy.invoke("svc", "c", vec![], &mut bus).is_err());
    }

    #[test]
    fn test_registrations_buffer_until_readiness() {
        let mut bus = EventBus::new();
        let mut registry = ResponderRegistry::new(Origin::Provider, &mut bus);
        let mut proxy = CallerProxy::new(Origin::Client, &mut bus);

        expose(&mut registry, &mut bus, "first", &["m"], Box::new(MathService));
        expose(&mut registry, &mut bus, "second", &["m"], Box::new(MathService));

        // Nothing on the bus before the readiness signal.
        assert_eq!(bus.queued(Origin::Client, Channel::Call), 0);
        proxy.process(&mut bus);
        assert_eq!(proxy.stub_count(), 0);

        registry.mark_remote_ready(&mut bus);
        proxy.process(&mut bus);

        assert!(proxy.stub("first").is_some());
        assert!(proxy.stub("second").is_some());
        assert_eq!(proxy.stub_count(), 2);
    }

    #[test]
    fn test_unknown_call_produces_no_response() {
        let (mut bus, mut registry, mut proxy) = bootstrap();
        expose(&mut registry, &mut bus, "svc", &["m"], Box::new(MathService));
        pump(&mut registry, &mut proxy, &mut bus);

        bus.publish(
            Origin::Client,
            Channel::Call,
            BusMessage::call("ghostService", "anything", vec![], Origin::Client),
        );
        registry.process(&mut bus);

        assert_eq!(bus.queued(Origin::Client, Channel::Response), 0);
        // The caller's own pending entry would now hang forever; here
        // there is none because the call bypassed the stub layer.
        assert_eq!(proxy.pending_calls(), 0);
    }

    #[test]
    fn test_discovery_through_hub() {
        let mut hub = BusHub::new();
        let id = BusId::from("bridge_bus");

        // A side that requires the bus to exist fails fast before the
        // counterpart has bootstrapped.
        assert!(hub.open_existing(&id).is_err());

        // Provider creates it; the client then joins the same live bus.
        let bus = hub.open_or_create(&id);
        let mut registry = ResponderRegistry::new(Origin::Provider, bus);

        let bus = hub.open_existing(&id).unwrap();
        let mut proxy = CallerProxy::new(Origin::Client, bus);
        registry.mark_remote_ready(bus);

        expose(&mut registry, bus, "mathService", &["add"], Box::new(MathService));
        proxy.process(bus);
        assert!(proxy.stub("mathService").is_some());
    }

    #[test]
    fn test_stub_does_not_exist_before_registration() {
        let (mut bus, _registry, mut proxy) = bootstrap();
        assert!(proxy.stub("mathService").is_none());
        assert!(proxy.invoke("mathService", "add", vec![], &mut bus).is_err());
    }
}

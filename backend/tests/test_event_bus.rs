//! Subscriptions through the simulation and event wire format

use scenario_simulator_core_rs::events::EventKind;
use scenario_simulator_core_rs::{
    create_scenario_simulation, ScenarioSimulation, SimulationEvent, SimulationOptions,
    SimulationPhase,
};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

fn sim() -> ScenarioSimulation {
    create_scenario_simulation(
        "fix-login-bug",
        10,
        SimulationOptions {
            seed: Some(17),
            ..Default::default()
        },
    )
}

#[test]
fn test_kind_filter_only_sees_its_kind() {
    let mut sim = sim();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    sim.on(EventKind::InterruptionTriggered, move |e| {
        sink.lock().unwrap().push(e.kind())
    });

    sim.start();
    sim.run_to_completion();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 6);
    assert!(seen.iter().all(|k| *k == EventKind::InterruptionTriggered));
}

#[test]
fn test_listeners_run_in_registration_order() {
    let mut sim = sim();
    let order = Arc::new(Mutex::new(Vec::new()));
    for tag in ["first", "second", "third"] {
        let sink = Arc::clone(&order);
        sim.on(EventKind::SimulationStarted, move |_| sink.lock().unwrap().push(tag));
    }
    sim.start();
    assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
}

#[test]
fn test_off_stops_delivery() {
    let mut sim = sim();
    let hits = Arc::new(Mutex::new(0usize));
    let h = Arc::clone(&hits);
    let id = sim.on_any(move |_| *h.lock().unwrap() += 1);

    sim.start();
    let after_start = *hits.lock().unwrap();
    assert!(after_start >= 1);

    assert!(sim.off(id));
    assert!(!sim.off(id));
    sim.run_to_completion();
    assert_eq!(*hits.lock().unwrap(), after_start);
}

#[test]
fn test_same_closure_shape_registered_twice_is_independent() {
    let mut sim = sim();
    let hits = Arc::new(Mutex::new(0usize));
    let a = {
        let h = Arc::clone(&hits);
        sim.on(EventKind::SimulationStarted, move |_| *h.lock().unwrap() += 1)
    };
    {
        let h = Arc::clone(&hits);
        sim.on(EventKind::SimulationStarted, move |_| *h.lock().unwrap() += 1);
    }
    assert!(sim.off(a));

    sim.start();
    assert_eq!(*hits.lock().unwrap(), 1);
}

#[test]
fn test_listener_panic_propagates() {
    let mut sim = sim();
    let later = Arc::new(Mutex::new(false));
    sim.on(EventKind::SimulationStarted, |_| panic!("listener failed"));
    let flag = Arc::clone(&later);
    sim.on(EventKind::SimulationStarted, move |_| *flag.lock().unwrap() = true);

    let result = panic::catch_unwind(AssertUnwindSafe(|| sim.start()));
    assert!(result.is_err());
    assert!(!*later.lock().unwrap());
}

#[test]
fn test_run_still_ends_after_start_listener_panics() {
    let mut sim = create_scenario_simulation(
        "two-sum",
        1,
        SimulationOptions {
            seed: Some(5),
            ..Default::default()
        },
    );
    sim.on(EventKind::SimulationStarted, |_| panic!("listener failed"));

    let result = panic::catch_unwind(AssertUnwindSafe(|| sim.start()));
    assert!(result.is_err());
    assert_eq!(sim.phase(), SimulationPhase::Running);
    assert!(sim.next_timer_due().is_some());

    let duration_ms = sim.config().duration_ms();
    sim.advance_by(duration_ms);
    assert!(!sim.is_active());
    assert_eq!(sim.phase(), SimulationPhase::Stopped);
    assert_eq!(sim.event_log().count_of_kind(EventKind::SimulationStopped), 1);
}

#[test]
fn test_event_log_matches_listener_stream() {
    let mut sim = sim();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    sim.on_any(move |e| sink.lock().unwrap().push(e.clone()));

    sim.start();
    sim.run_to_completion();

    let logged: Vec<SimulationEvent> = sim
        .event_log()
        .events()
        .iter()
        .map(|e| e.event.clone())
        .collect();
    assert_eq!(*seen.lock().unwrap(), logged);
}

#[test]
fn test_events_serialize_with_wire_names() {
    let mut sim = sim();
    sim.start();
    sim.run_to_completion();

    for logged in sim.event_log().events() {
        let json = serde_json::to_value(logged).unwrap();
        assert_eq!(json["event"], logged.event.name());
        assert_eq!(json["time"], logged.time);
        assert_eq!(EventKind::from_name(logged.event.name()), Some(logged.event.kind()));
    }

    let started = serde_json::to_value(&sim.event_log().events()[0].event).unwrap();
    assert_eq!(started["config"]["challengeId"], "fix-login-bug");
    assert_eq!(started["startTime"], 0);
}

#[test]
fn test_logged_event_round_trips() {
    let mut sim = sim();
    sim.start();
    sim.run_to_completion();

    let last = sim.event_log().last().unwrap().clone();
    let json = serde_json::to_string(&last).unwrap();
    let back = serde_json::from_str(&json).unwrap();
    assert_eq!(last, back);
}

//! User actions on the three queues
//!
//! - handled messages with `requirements` impact spawn exactly one change
//! - accepted changes shorten every constraint, floored at zero
//! - deferrable interruptions come back 5-15 minutes later
//! - unknown ids are no-ops

use scenario_simulator_core_rs::config::ConfigBuilder;
use scenario_simulator_core_rs::events::EventKind;
use scenario_simulator_core_rs::models::{
    ChangeImpact, ChangeType, ConstraintType, InterruptionEvent, MessageImpact, Severity,
};
use scenario_simulator_core_rs::scheduler::TimerAction;
use scenario_simulator_core_rs::{
    create_scenario_simulation, InterruptionAction, RngManager, ScenarioSimulation,
    SimulationEvent, SimulationOptions, TimeConstraint,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn seeded(challenge: &str, duration: u32, seed: u64) -> ScenarioSimulation {
    create_scenario_simulation(
        challenge,
        duration,
        SimulationOptions {
            seed: Some(seed),
            ..Default::default()
        },
    )
}

/// Advance to 1ms before the end; every planned entry has fired by then
fn advance_to_last_timer_before_end(sim: &mut ScenarioSimulation) {
    let end = sim.start_time().unwrap() + sim.config().duration_ms();
    sim.advance_to(end - 1);
}

/// Fire timers one at a time until an interruption is active
fn advance_until_interruption(sim: &mut ScenarioSimulation) -> Option<InterruptionEvent> {
    while sim.is_active() && sim.active_interruptions().is_empty() {
        let due = sim.next_timer_due()?;
        sim.advance_to(due);
    }
    sim.active_interruptions().first().cloned()
}

// ============================================================================
// Messages
// ============================================================================

#[test]
fn test_requirements_message_spawns_one_clarification() {
    // valid-parentheses scripts a requirements-impact message
    let mut sim = seeded("valid-parentheses", 30, 3);
    sim.start();
    advance_to_last_timer_before_end(&mut sim);

    let message = sim
        .pending_messages()
        .iter()
        .find(|m| m.impact == Some(MessageImpact::Requirements))
        .cloned()
        .expect("requirements message delivered");
    let changes_before = sim.requirement_changes().len();

    assert!(sim.mark_message_handled(&message.id));

    assert!(sim.pending_messages().iter().all(|m| m.id != message.id));
    assert_eq!(sim.requirement_changes().len(), changes_before + 1);

    let added = sim.requirement_changes().last().unwrap();
    assert_eq!(added.change_type, ChangeType::Clarification);
    assert_eq!(added.impact, ChangeImpact::Minor);
    assert_eq!(added.time_to_implement, 15);
    assert_eq!(added.stakeholder, "Product Manager");

    let kinds: Vec<EventKind> = sim
        .event_log()
        .events()
        .iter()
        .rev()
        .take(2)
        .map(|e| e.event.kind())
        .collect();
    assert_eq!(kinds, vec![EventKind::RequirementAdded, EventKind::MessageHandled]);
}

#[test]
fn test_other_messages_spawn_nothing() {
    let mut sim = seeded("fix-login-bug", 30, 11);
    sim.start();
    advance_to_last_timer_before_end(&mut sim);

    let others: Vec<String> = sim
        .pending_messages()
        .iter()
        .filter(|m| !m.triggers_requirement_followup())
        .map(|m| m.id.clone())
        .collect();
    assert!(!others.is_empty());

    let changes_before = sim.requirement_changes().len();
    for id in &others {
        assert!(sim.mark_message_handled(id));
    }
    assert_eq!(sim.requirement_changes().len(), changes_before);
    assert_eq!(sim.event_log().count_of_kind(EventKind::RequirementAdded), 0);
}

#[test]
fn test_message_handled_twice_is_noop() {
    let mut sim = seeded("two-sum", 30, 1);
    sim.start();
    advance_to_last_timer_before_end(&mut sim);

    let id = sim.pending_messages()[0].id.clone();
    assert!(sim.mark_message_handled(&id));
    let logged = sim.event_log().len();
    assert!(!sim.mark_message_handled(&id));
    assert_eq!(sim.event_log().len(), logged);
}

// ============================================================================
// Requirement changes
// ============================================================================

#[test]
fn test_accept_reduces_constraints_by_impact() {
    let mut sim = seeded("shopping-cart-feature", 30, 21);
    sim.start();
    advance_to_last_timer_before_end(&mut sim);

    let changes = sim.requirement_changes().to_vec();
    assert_eq!(changes.len(), 3);

    for change in changes {
        let before: Vec<u32> = sim.time_constraints().iter().map(|c| c.time_remaining).collect();
        assert!(sim.handle_requirement_change(&change.id, true));

        let reduction = change.impact.timeline_reduction();
        let after: Vec<u32> = sim.time_constraints().iter().map(|c| c.time_remaining).collect();
        for (b, a) in before.iter().zip(&after) {
            assert_eq!(*a, b.saturating_sub(reduction));
        }

        match &sim.event_log().last().unwrap().event {
            SimulationEvent::TimelineAdjusted { change: c, reduction: r } => {
                assert_eq!(c.id, change.id);
                assert_eq!(*r, reduction);
            }
            other => panic!("expected timeline:adjusted, got {:?}", other),
        }
    }
    assert!(sim.requirement_changes().is_empty());
}

#[test]
fn test_major_change_reduces_by_ten() {
    for seed in 0..50 {
        let mut sim = seeded("add-dark-mode", 30, seed);
        sim.start();
        advance_to_last_timer_before_end(&mut sim);

        let Some(major) = sim
            .requirement_changes()
            .iter()
            .find(|c| c.impact == ChangeImpact::Major)
            .cloned()
        else {
            continue;
        };

        // deadline 30, ceo-demo 24
        assert!(sim.handle_requirement_change(&major.id, true));
        let remaining: Vec<u32> = sim.time_constraints().iter().map(|c| c.time_remaining).collect();
        assert_eq!(remaining, vec![20, 14]);
        return;
    }
    panic!("no major change proposed in 50 seeds");
}

#[test]
fn test_minor_change_floors_at_zero() {
    let config = ConfigBuilder::for_challenge("valid-parentheses", 30)
        .time_constraints(vec![
            TimeConstraint::new("almost-done", ConstraintType::Release, "Release", 1, Severity::Critical),
            TimeConstraint::new("deadline", ConstraintType::Deadline, "Deadline", 30, Severity::Warning),
        ])
        .build();
    let mut sim = ScenarioSimulation::new(config, RngManager::new(3));
    sim.start();
    advance_to_last_timer_before_end(&mut sim);

    let message_id = sim
        .pending_messages()
        .iter()
        .find(|m| m.triggers_requirement_followup())
        .map(|m| m.id.clone())
        .expect("requirements message delivered");
    sim.mark_message_handled(&message_id);
    let followup = sim.requirement_changes().last().unwrap().id.clone();

    assert!(sim.handle_requirement_change(&followup, true));
    let remaining: Vec<u32> = sim.time_constraints().iter().map(|c| c.time_remaining).collect();
    assert_eq!(remaining, vec![0, 28]);
}

#[test]
fn test_reject_leaves_constraints() {
    let mut sim = seeded("api-rate-limiter", 30, 4);
    sim.start();
    advance_to_last_timer_before_end(&mut sim);

    let before = sim.time_constraints().to_vec();
    let change = sim.requirement_changes()[0].clone();
    assert!(sim.handle_requirement_change(&change.id, false));
    assert_eq!(sim.time_constraints(), before.as_slice());

    match &sim.event_log().last().unwrap().event {
        SimulationEvent::RequirementChanged { accepted, .. } => assert!(!accepted),
        other => panic!("expected requirement:changed, got {:?}", other),
    }
    assert_eq!(sim.event_log().count_of_kind(EventKind::TimelineAdjusted), 0);
}

// ============================================================================
// Interruptions
// ============================================================================

#[test]
fn test_defer_reschedules_deferrable() {
    for seed in 0..100 {
        let mut sim = seeded("memory-leak-fix", 480, seed);
        sim.start();
        let Some(first) = advance_until_interruption(&mut sim) else {
            continue;
        };
        if !first.can_defer {
            continue;
        }

        let now = sim.now();
        assert!(sim.handle_interruption(&first.id, InterruptionAction::Defer));
        assert!(sim.active_interruptions().iter().all(|i| i.id != first.id));

        let retrigger = sim
            .pending_timers()
            .into_iter()
            .find(|t| matches!(&t.action, TimerAction::TriggerInterruption { interruption, deferred: true } if interruption.id == first.id))
            .expect("deferred re-trigger scheduled");
        let delay = retrigger.due - now;
        assert!((300_000..=900_000).contains(&delay), "delay {}", delay);

        sim.advance_to(retrigger.due);
        assert!(sim.active_interruptions().iter().any(|i| i.id == first.id));
        let triggered = sim
            .event_log()
            .events_for_entity(&first.id)
            .iter()
            .filter(|e| e.event.kind() == EventKind::InterruptionTriggered)
            .count();
        assert_eq!(triggered, 2);
        return;
    }
    panic!("no deferrable interruption found");
}

#[test]
fn test_defer_non_deferrable_only_removes() {
    for seed in 0..100 {
        let mut sim = seeded("memory-leak-fix", 480, seed);
        sim.start();
        let Some(first) = advance_until_interruption(&mut sim) else {
            continue;
        };
        if first.can_defer {
            continue;
        }

        let timers_before = sim.pending_timers().len();
        assert!(sim.handle_interruption(&first.id, InterruptionAction::Defer));
        assert_eq!(sim.pending_timers().len(), timers_before);
        assert!(sim.active_interruptions().iter().all(|i| i.id != first.id));

        match &sim.event_log().last().unwrap().event {
            SimulationEvent::InterruptionHandled { interruption, action } => {
                assert_eq!(interruption.id, first.id);
                assert_eq!(*action, InterruptionAction::Defer);
            }
            other => panic!("expected interruption:handled, got {:?}", other),
        }
        return;
    }
    panic!("no non-deferrable interruption found");
}

#[test]
fn test_defer_after_stop_schedules_nothing() {
    let mut sim = seeded("memory-leak-fix", 30, 8);
    sim.start();
    sim.run_to_completion();

    let deferrable = sim
        .active_interruptions()
        .iter()
        .find(|i| i.can_defer)
        .cloned()
        .expect("deferrable interruption left active");
    assert!(sim.handle_interruption(&deferrable.id, InterruptionAction::Defer));
    assert!(sim.pending_timers().is_empty());
}

#[test]
fn test_handle_removes_interruption() {
    let mut sim = seeded("memory-leak-fix", 30, 2);
    sim.start();
    let first = advance_until_interruption(&mut sim).expect("interruption");
    let timers_before = sim.pending_timers().len();

    assert!(sim.handle_interruption(&first.id, InterruptionAction::Handle));
    assert!(sim.active_interruptions().iter().all(|i| i.id != first.id));
    assert_eq!(sim.pending_timers().len(), timers_before);
}

// ============================================================================
// Unknown ids
// ============================================================================

#[test]
fn test_unknown_ids_are_noops() {
    let mut sim = seeded("two-sum", 30, 1);
    sim.start();
    let logged = sim.event_log().len();

    assert!(!sim.mark_message_handled("nope"));
    assert!(!sim.handle_requirement_change("nope", true));
    assert!(!sim.handle_interruption("nope", InterruptionAction::Defer));
    assert_eq!(sim.event_log().len(), logged);
}

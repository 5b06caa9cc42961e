//! Scenario Simulation Engine
//!
//! Owns one run: config, virtual clock, RNG, queues, timeline and
//! subscribers.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──start()──▶ Running ──stop() / end of duration──▶ Stopped
//! ```
//!
//! `Stopped` is terminal. A stopped instance never restarts; build a new
//! one to run again.
//!
//! # Driving time
//!
//! Nothing fires on its own. The host advances the virtual clock with
//! [`ScenarioSimulation::advance_to`] / [`ScenarioSimulation::advance_by`];
//! due timeline entries fire in order, each with the clock set to its due
//! time.
//!
//! # Example
//!
//! ```rust
//! use scenario_simulator_core_rs::{create_scenario_simulation, SimulationOptions};
//! use scenario_simulator_core_rs::config::InterruptionFrequency;
//!
//! let mut sim = create_scenario_simulation(
//!     "two-sum",
//!     1,
//!     SimulationOptions {
//!         interruption_frequency: Some(InterruptionFrequency::Extreme),
//!         seed: Some(7),
//!         ..Default::default()
//!     },
//! );
//!
//! sim.start();
//! sim.advance_by(61_000);
//!
//! let status = sim.get_status();
//! assert!(!status.is_active);
//! assert_eq!(status.progress, 1.0);
//! ```

use crate::config::ScenarioSimulationConfig;
use crate::core::time::SimClock;
use crate::events::{EventBus, EventKind, SimulationEvent, SubscriptionId};
use crate::models::{
    EventLog, InterruptionAction, InterruptionEvent, RequirementChange, ScenarioState,
    StakeholderMessage, TimeConstraint,
};
use crate::rng::{next_uuid, RngManager};
use crate::scheduler::{self, Timeline, TimerAction, TimerEntry};
use crate::templates::CLARIFICATION_FOLLOWUP;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimulationPhase {
    Idle,
    Running,
    Stopped,
}

/// Point-in-time view returned by `get_status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationStatus {
    pub is_active: bool,
    /// ms since start (frozen once stopped)
    pub elapsed_time: u64,
    /// ms until the configured duration is reached
    pub remaining_time: u64,
    /// elapsed / duration, clamped to [0, 1]
    pub progress: f64,
    pub pending_messages: usize,
    pub active_interruptions: usize,
}

/// One scenario run
///
/// All methods are synchronous. Listeners registered with [`on`](Self::on)
/// run inside the call that emitted the event.
pub struct ScenarioSimulation {
    config: ScenarioSimulationConfig,
    phase: SimulationPhase,
    clock: SimClock,
    rng: RngManager,
    state: ScenarioState,

    /// Generated at start, waiting for their delivery timer
    scheduled_messages: Vec<StakeholderMessage>,

    timeline: Timeline,
    bus: EventBus,
    event_log: EventLog,

    start_time: Option<u64>,
    stopped_at: Option<u64>,
}

impl ScenarioSimulation {
    /// Build an idle simulation with the clock at zero
    pub fn new(config: ScenarioSimulationConfig, rng: RngManager) -> Self {
        Self::starting_at(config, rng, 0)
    }

    /// Build an idle simulation with the clock at `now_ms`
    pub fn starting_at(config: ScenarioSimulationConfig, rng: RngManager, now_ms: u64) -> Self {
        let state = ScenarioState::new(config.time_constraints.clone());
        Self {
            config,
            phase: SimulationPhase::Idle,
            clock: SimClock::starting_at(now_ms),
            rng,
            state,
            scheduled_messages: Vec::new(),
            timeline: Timeline::new(),
            bus: EventBus::new(),
            event_log: EventLog::new(),
            start_time: None,
            stopped_at: None,
        }
    }

    /// Rebuild from checkpoint parts (no listeners, empty event log)
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        config: ScenarioSimulationConfig,
        phase: SimulationPhase,
        clock: SimClock,
        rng: RngManager,
        state: ScenarioState,
        scheduled_messages: Vec<StakeholderMessage>,
        timeline: Timeline,
        start_time: Option<u64>,
        stopped_at: Option<u64>,
    ) -> Self {
        Self {
            config,
            phase,
            clock,
            rng,
            state,
            scheduled_messages,
            timeline,
            bus: EventBus::new(),
            event_log: EventLog::new(),
            start_time,
            stopped_at,
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Begin the run
    ///
    /// No-op unless idle.
    pub fn start(&mut self) {
        if self.phase != SimulationPhase::Idle {
            tracing::debug!(phase = ?self.phase, "start() ignored");
            return;
        }

        let now = self.clock.now();
        self.phase = SimulationPhase::Running;
        self.start_time = Some(now);

        tracing::info!(
            challenge_id = %self.config.challenge_id,
            duration_min = self.config.duration,
            frequency = %self.config.interruption_frequency,
            activity = %self.config.stakeholder_activity,
            stability = %self.config.requirement_stability,
            "scenario simulation started"
        );
        let due_now = self.schedule_events(now);
        self.emit(SimulationEvent::SimulationStarted {
            config: self.config.clone(),
            start_time: now,
        });

        for message in due_now {
            self.deliver_message(message);
        }
    }

    /// Fill the timeline, returning the messages due at the start instant
    fn schedule_events(&mut self, now: u64) -> Vec<StakeholderMessage> {
        let plan = scheduler::plan_scenario(&self.config, now, &mut self.rng);

        let mut due_now = Vec::new();
        for message in plan.messages {
            if message.timestamp > now {
                self.timeline.schedule(
                    message.timestamp,
                    TimerAction::DeliverMessage {
                        message_id: message.id.clone(),
                    },
                );
                self.scheduled_messages.push(message);
            } else {
                due_now.push(message);
            }
        }

        for (due, interruption) in plan.interruptions {
            self.timeline.schedule(
                due,
                TimerAction::TriggerInterruption {
                    interruption,
                    deferred: false,
                },
            );
        }

        for (due, change) in plan.requirement_changes {
            self.timeline
                .schedule(due, TimerAction::ProposeRequirement { change });
        }

        self.timeline.schedule(
            now.saturating_add(self.config.duration_ms()),
            TimerAction::EndOfSimulation,
        );

        tracing::debug!(
            timers = self.timeline.len(),
            immediate_messages = due_now.len(),
            "scenario events scheduled"
        );
        due_now
    }

    /// End the run
    ///
    /// No-op unless running. Clears every pending timer, so nothing fires
    /// after this returns.
    pub fn stop(&mut self) {
        if self.phase != SimulationPhase::Running {
            tracing::debug!(phase = ?self.phase, "stop() ignored");
            return;
        }

        let now = self.clock.now();
        self.phase = SimulationPhase::Stopped;
        self.stopped_at = Some(now);

        let cancelled = self.timeline.len();
        self.timeline.clear();
        self.scheduled_messages.clear();

        let duration = self.elapsed_time();
        let messages_received = self.state.pending_messages().len();
        let interruptions_handled = self.state.active_interruptions().len();

        tracing::info!(
            elapsed_ms = duration,
            cancelled_timers = cancelled,
            pending_messages = messages_received,
            active_interruptions = interruptions_handled,
            "scenario simulation stopped"
        );
        self.emit(SimulationEvent::SimulationStopped {
            duration,
            messages_received,
            interruptions_handled,
        });
    }

    // ========================================================================
    // Time
    // ========================================================================

    /// Advance the virtual clock to `target_ms`, firing every due entry
    ///
    /// Returns the number of timeline entries fired.
    pub fn advance_to(&mut self, target_ms: u64) -> usize {
        let mut fired = 0;
        while let Some(entry) = self.timeline.pop_due(target_ms) {
            self.clock.advance_to(entry.due);
            self.fire(entry);
            fired += 1;
        }
        self.clock.advance_to(target_ms);
        fired
    }

    /// Advance the virtual clock by `delta_ms`
    pub fn advance_by(&mut self, delta_ms: u64) -> usize {
        let target = self.clock.now().saturating_add(delta_ms);
        self.advance_to(target)
    }

    /// Advance until the run stops by itself
    ///
    /// Returns the number of entries fired. No-op unless running.
    pub fn run_to_completion(&mut self) -> usize {
        let mut fired = 0;
        while self.phase == SimulationPhase::Running {
            let Some(due) = self.timeline.next_due() else {
                break;
            };
            fired += self.advance_to(due);
        }
        fired
    }

    /// Due time of the next pending entry
    pub fn next_timer_due(&mut self) -> Option<u64> {
        self.timeline.next_due()
    }

    fn fire(&mut self, entry: TimerEntry) {
        tracing::debug!(due = entry.due, handle = entry.handle.value(), "timer fired");
        match entry.action {
            TimerAction::DeliverMessage { message_id } => {
                match self.scheduled_messages.iter().position(|m| m.id == message_id) {
                    Some(idx) => {
                        let message = self.scheduled_messages.remove(idx);
                        self.deliver_message(message);
                    }
                    None => tracing::debug!(%message_id, "scheduled message missing"),
                }
            }
            TimerAction::TriggerInterruption {
                interruption,
                deferred,
            } => {
                if deferred {
                    tracing::debug!(id = %interruption.id, "deferred interruption returned");
                }
                if self.state.push_interruption(interruption.clone()) {
                    self.emit(SimulationEvent::InterruptionTriggered { interruption });
                }
            }
            TimerAction::ProposeRequirement { change } => {
                if self.state.push_change(change.clone()) {
                    self.emit(SimulationEvent::RequirementProposed { change });
                }
            }
            TimerAction::EndOfSimulation => self.stop(),
        }
    }

    fn deliver_message(&mut self, message: StakeholderMessage) {
        if self.state.push_message(message.clone()) {
            self.emit(SimulationEvent::MessageReceived { message });
        }
    }

    // ========================================================================
    // User actions
    // ========================================================================

    /// Mark a pending message as handled
    ///
    /// A message with `requirements` impact spawns one clarification
    /// change. Returns false (and does nothing) for unknown ids.
    pub fn mark_message_handled(&mut self, message_id: &str) -> bool {
        let Some(message) = self.state.take_message(message_id) else {
            tracing::debug!(%message_id, "mark_message_handled: unknown id");
            return false;
        };

        let spawns_followup = message.triggers_requirement_followup();
        self.emit(SimulationEvent::MessageHandled { message });

        if spawns_followup {
            let change = CLARIFICATION_FOLLOWUP.instantiate(next_uuid(&mut self.rng).to_string());
            if self.state.push_change(change.clone()) {
                self.emit(SimulationEvent::RequirementAdded { change });
            }
        }
        true
    }

    /// Accept or reject a requirement change
    ///
    /// Accepting shortens every time constraint by the change's impact
    /// (minor 2, moderate 5, major 10 minutes; floored at 0).
    pub fn handle_requirement_change(&mut self, change_id: &str, accepted: bool) -> bool {
        let Some(change) = self.state.take_change(change_id) else {
            tracing::debug!(%change_id, "handle_requirement_change: unknown id");
            return false;
        };

        self.emit(SimulationEvent::RequirementChanged {
            change: change.clone(),
            accepted,
        });

        if accepted {
            let reduction = change.impact.timeline_reduction();
            let removed = self.state.reduce_constraints(reduction);
            tracing::debug!(%change_id, reduction, removed, "timeline adjusted");
            self.emit(SimulationEvent::TimelineAdjusted { change, reduction });
        }
        true
    }

    /// Handle or defer an active interruption
    ///
    /// Deferring reschedules the same interruption 5-15 minutes out, but
    /// only if it is deferrable and the run is still going.
    pub fn handle_interruption(&mut self, interruption_id: &str, action: InterruptionAction) -> bool {
        let Some(interruption) = self.state.take_interruption(interruption_id) else {
            tracing::debug!(%interruption_id, "handle_interruption: unknown id");
            return false;
        };

        self.emit(SimulationEvent::InterruptionHandled {
            interruption: interruption.clone(),
            action,
        });

        if action == InterruptionAction::Defer {
            if !interruption.can_defer {
                tracing::debug!(%interruption_id, "interruption cannot be deferred");
            } else if self.phase == SimulationPhase::Running {
                self.reschedule_deferred(interruption);
            }
        }
        true
    }

    fn reschedule_deferred(&mut self, interruption: InterruptionEvent) {
        let due = self.clock.now().saturating_add(scheduler::defer_delay(&mut self.rng));
        tracing::debug!(id = %interruption.id, due, "interruption deferred");
        self.timeline.schedule(
            due,
            TimerAction::TriggerInterruption {
                interruption,
                deferred: true,
            },
        );
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Subscribe to one event kind
    pub fn on<F>(&mut self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&SimulationEvent) + Send + 'static,
    {
        self.bus.on(kind, callback)
    }

    /// Subscribe to every event
    pub fn on_any<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&SimulationEvent) + Send + 'static,
    {
        self.bus.on_any(callback)
    }

    /// Unsubscribe; false if the id is not live
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.bus.off(id)
    }

    fn emit(&mut self, event: SimulationEvent) {
        self.event_log.log(self.clock.now(), event.clone());
        self.bus.emit(&event);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    fn elapsed_time(&self) -> u64 {
        match (self.start_time, self.stopped_at) {
            (None, _) => 0,
            (Some(start), Some(stop)) => stop.saturating_sub(start),
            (Some(start), None) => self.clock.elapsed_since(start),
        }
    }

    /// Current status, computed from the virtual clock
    pub fn get_status(&self) -> SimulationStatus {
        let duration_ms = self.config.duration_ms();
        let elapsed = self.elapsed_time();
        let progress = if duration_ms == 0 {
            if self.start_time.is_some() { 1.0 } else { 0.0 }
        } else {
            (elapsed as f64 / duration_ms as f64).min(1.0)
        };

        SimulationStatus {
            is_active: self.is_active(),
            elapsed_time: elapsed,
            remaining_time: duration_ms.saturating_sub(elapsed),
            progress,
            pending_messages: self.state.pending_messages().len(),
            active_interruptions: self.state.active_interruptions().len(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == SimulationPhase::Running
    }

    pub fn phase(&self) -> SimulationPhase {
        self.phase
    }

    pub fn config(&self) -> &ScenarioSimulationConfig {
        &self.config
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    pub fn start_time(&self) -> Option<u64> {
        self.start_time
    }

    pub fn stopped_at(&self) -> Option<u64> {
        self.stopped_at
    }

    pub fn pending_messages(&self) -> &[StakeholderMessage] {
        self.state.pending_messages()
    }

    pub fn active_interruptions(&self) -> &[InterruptionEvent] {
        self.state.active_interruptions()
    }

    pub fn requirement_changes(&self) -> &[RequirementChange] {
        self.state.requirement_changes()
    }

    pub fn time_constraints(&self) -> &[TimeConstraint] {
        self.state.time_constraints()
    }

    /// Messages generated at start that have not been delivered yet
    pub fn scheduled_messages(&self) -> &[StakeholderMessage] {
        &self.scheduled_messages
    }

    /// Pending timeline entries in firing order
    pub fn pending_timers(&self) -> Vec<TimerEntry> {
        self.timeline.entries()
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub(crate) fn state(&self) -> &ScenarioState {
        &self.state
    }

    pub(crate) fn rng(&self) -> &RngManager {
        &self.rng
    }

    pub(crate) fn timeline(&self) -> &Timeline {
        &self.timeline
    }
}

impl std::fmt::Debug for ScenarioSimulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioSimulation")
            .field("challenge_id", &self.config.challenge_id)
            .field("phase", &self.phase)
            .field("now", &self.clock.now())
            .field("timers", &self.timeline.len())
            .field("bus", &self.bus)
            .finish()
    }
}

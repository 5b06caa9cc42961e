//! Simulation event types
//!
//! Every observable state change in a scenario run is one `SimulationEvent`.
//! The wire name (`"message:received"`, ...) is what UI subscribers key on;
//! `EventKind` is the payload-free discriminant used for subscriptions.
//!
//! # Serialization
//!
//! Events serialize as a flat object tagged with `event`:
//!
//! ```text
//! {"event": "timeline:adjusted", "change": {...}, "reduction": 10}
//! ```

use crate::config::ScenarioSimulationConfig;
use crate::models::{
    InterruptionAction, InterruptionEvent, RequirementChange, StakeholderMessage,
};
use serde::{Deserialize, Serialize};

/// Payload-free event discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    SimulationStarted,
    SimulationStopped,
    MessageReceived,
    MessageHandled,
    RequirementProposed,
    RequirementChanged,
    RequirementAdded,
    InterruptionTriggered,
    InterruptionHandled,
    TimelineAdjusted,
}

impl EventKind {
    /// All kinds, in declaration order
    pub const ALL: [EventKind; 10] = [
        EventKind::SimulationStarted,
        EventKind::SimulationStopped,
        EventKind::MessageReceived,
        EventKind::MessageHandled,
        EventKind::RequirementProposed,
        EventKind::RequirementChanged,
        EventKind::RequirementAdded,
        EventKind::InterruptionTriggered,
        EventKind::InterruptionHandled,
        EventKind::TimelineAdjusted,
    ];

    /// Wire name of the event
    pub fn name(self) -> &'static str {
        match self {
            EventKind::SimulationStarted => "simulation:started",
            EventKind::SimulationStopped => "simulation:stopped",
            EventKind::MessageReceived => "message:received",
            EventKind::MessageHandled => "message:handled",
            EventKind::RequirementProposed => "requirement:proposed",
            EventKind::RequirementChanged => "requirement:changed",
            EventKind::RequirementAdded => "requirement:added",
            EventKind::InterruptionTriggered => "interruption:triggered",
            EventKind::InterruptionHandled => "interruption:handled",
            EventKind::TimelineAdjusted => "timeline:adjusted",
        }
    }

    /// Inverse of [`EventKind::name`]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// An observable state change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all_fields = "camelCase")]
pub enum SimulationEvent {
    #[serde(rename = "simulation:started")]
    SimulationStarted {
        config: ScenarioSimulationConfig,
        start_time: u64,
    },

    /// `messages_received` and `interruptions_handled` are the sizes of the
    /// pending-message and active-interruption queues when the run ended.
    #[serde(rename = "simulation:stopped")]
    SimulationStopped {
        /// Elapsed virtual time in ms
        duration: u64,
        messages_received: usize,
        interruptions_handled: usize,
    },

    #[serde(rename = "message:received")]
    MessageReceived { message: StakeholderMessage },

    #[serde(rename = "message:handled")]
    MessageHandled { message: StakeholderMessage },

    #[serde(rename = "requirement:proposed")]
    RequirementProposed { change: RequirementChange },

    #[serde(rename = "requirement:changed")]
    RequirementChanged {
        change: RequirementChange,
        accepted: bool,
    },

    /// Follow-up change spawned by handling a requirements-impact message
    #[serde(rename = "requirement:added")]
    RequirementAdded { change: RequirementChange },

    #[serde(rename = "interruption:triggered")]
    InterruptionTriggered { interruption: InterruptionEvent },

    #[serde(rename = "interruption:handled")]
    InterruptionHandled {
        interruption: InterruptionEvent,
        action: InterruptionAction,
    },

    /// `reduction` is the nominal minutes taken off each constraint
    #[serde(rename = "timeline:adjusted")]
    TimelineAdjusted {
        change: RequirementChange,
        reduction: u32,
    },
}

impl SimulationEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SimulationEvent::SimulationStarted { .. } => EventKind::SimulationStarted,
            SimulationEvent::SimulationStopped { .. } => EventKind::SimulationStopped,
            SimulationEvent::MessageReceived { .. } => EventKind::MessageReceived,
            SimulationEvent::MessageHandled { .. } => EventKind::MessageHandled,
            SimulationEvent::RequirementProposed { .. } => EventKind::RequirementProposed,
            SimulationEvent::RequirementChanged { .. } => EventKind::RequirementChanged,
            SimulationEvent::RequirementAdded { .. } => EventKind::RequirementAdded,
            SimulationEvent::InterruptionTriggered { .. } => EventKind::InterruptionTriggered,
            SimulationEvent::InterruptionHandled { .. } => EventKind::InterruptionHandled,
            SimulationEvent::TimelineAdjusted { .. } => EventKind::TimelineAdjusted,
        }
    }

    /// Wire name, e.g. `"message:received"`
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Id of the entity the event is about, if any
    pub fn entity_id(&self) -> Option<&str> {
        match self {
            SimulationEvent::MessageReceived { message }
            | SimulationEvent::MessageHandled { message } => Some(&message.id),
            SimulationEvent::RequirementProposed { change }
            | SimulationEvent::RequirementChanged { change, .. }
            | SimulationEvent::RequirementAdded { change }
            | SimulationEvent::TimelineAdjusted { change, .. } => Some(&change.id),
            SimulationEvent::InterruptionTriggered { interruption }
            | SimulationEvent::InterruptionHandled { interruption, .. } => Some(&interruption.id),
            SimulationEvent::SimulationStarted { .. } | SimulationEvent::SimulationStopped { .. } => {
                None
            }
        }
    }
}

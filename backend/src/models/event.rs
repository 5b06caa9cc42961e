//! Event log for replay and inspection
//!
//! The simulation records every event it emits, stamped with the virtual
//! time of emission. Two runs with the same seed and config produce equal
//! logs, which is how determinism is tested.

use crate::events::{EventKind, SimulationEvent};
use serde::{Deserialize, Serialize};

/// One emitted event and when it happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Virtual time (ms) at emission
    pub time: u64,
    #[serde(flatten)]
    pub event: SimulationEvent,
}

/// Append-only record of emitted events
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    events: Vec<LoggedEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn log(&mut self, time: u64, event: SimulationEvent) {
        self.events.push(LoggedEvent { time, event });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[LoggedEvent] {
        &self.events
    }

    /// Events of one kind, in emission order
    pub fn events_of_kind(&self, kind: EventKind) -> Vec<&LoggedEvent> {
        self.events.iter().filter(|e| e.event.kind() == kind).collect()
    }

    pub fn count_of_kind(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.event.kind() == kind).count()
    }

    /// Events about one entity (message, change or interruption)
    pub fn events_for_entity(&self, id: &str) -> Vec<&LoggedEvent> {
        self.events
            .iter()
            .filter(|e| e.event.entity_id() == Some(id))
            .collect()
    }

    /// Events emitted in the window [from_ms, to_ms)
    pub fn events_between(&self, from_ms: u64, to_ms: u64) -> Vec<&LoggedEvent> {
        self.events
            .iter()
            .filter(|e| e.time >= from_ms && e.time < to_ms)
            .collect()
    }

    pub fn last(&self) -> Option<&LoggedEvent> {
        self.events.last()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stopped(duration: u64) -> SimulationEvent {
        SimulationEvent::SimulationStopped {
            duration,
            messages_received: 0,
            interruptions_handled: 0,
        }
    }

    #[test]
    fn test_event_log_basic() {
        let mut log = EventLog::new();
        assert!(log.is_empty());

        log.log(10, stopped(10));
        log.log(20, stopped(20));

        assert_eq!(log.len(), 2);
        assert_eq!(log.count_of_kind(EventKind::SimulationStopped), 2);
        assert_eq!(log.count_of_kind(EventKind::MessageReceived), 0);
        assert_eq!(log.events_between(0, 15).len(), 1);
        assert_eq!(log.last().map(|e| e.time), Some(20));
    }

    #[test]
    fn test_logged_event_flattens_payload() {
        let entry = LoggedEvent {
            time: 5,
            event: stopped(5),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["time"], 5);
        assert_eq!(json["event"], "simulation:stopped");
        assert_eq!(json["duration"], 5);
    }
}

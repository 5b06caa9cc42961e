//! Single min-heap timeline
//!
//! Every deferred callback of a run (message delivery, interruption,
//! requirement proposal, end of run) is one entry here. Entries are ordered
//! by `(due, handle)`; handles grow monotonically, so entries due at the
//! same instant fire in the order they were scheduled.
//!
//! Cancellation is lazy: a cancelled handle is dropped from the live set
//! and skipped when it reaches the top of the heap.

use crate::models::{InterruptionEvent, RequirementChange};
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

/// Identifies one scheduled entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// What happens when an entry comes due
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum TimerAction {
    /// Move a pre-generated message into the pending queue
    DeliverMessage { message_id: String },
    /// Raise an interruption (`deferred` = re-trigger after a defer)
    TriggerInterruption {
        interruption: InterruptionEvent,
        deferred: bool,
    },
    /// Propose a pre-generated requirement change
    ProposeRequirement { change: RequirementChange },
    /// The run's duration has elapsed
    EndOfSimulation,
}

/// A scheduled entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerEntry {
    /// Absolute virtual time (ms)
    pub due: u64,
    pub handle: TimerHandle,
    pub action: TimerAction,
}

impl TimerEntry {
    fn key(&self) -> Reverse<(u64, TimerHandle)> {
        Reverse((self.due, self.handle))
    }
}

/// Heap wrapper ordering entries earliest-first
#[derive(Debug, Clone)]
struct Queued(TimerEntry);

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.0.key() == other.0.key()
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.key().cmp(&other.0.key())
    }
}

/// Discrete-event timeline
///
/// # Example
/// ```
/// use scenario_simulator_core_rs::scheduler::{Timeline, TimerAction};
///
/// let mut timeline = Timeline::new();
/// let end = timeline.schedule(60_000, TimerAction::EndOfSimulation);
/// assert_eq!(timeline.next_due(), Some(60_000));
///
/// assert!(timeline.pop_due(59_999).is_none());
/// let entry = timeline.pop_due(60_000).unwrap();
/// assert_eq!(entry.handle, end);
/// assert!(timeline.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    heap: BinaryHeap<Queued>,
    live: HashSet<TimerHandle>,
    next_handle: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from snapshot entries
    ///
    /// `next_handle` is raised above every restored handle if needed.
    pub fn from_entries(entries: Vec<TimerEntry>, next_handle: u64) -> Self {
        let mut timeline = Self {
            next_handle,
            ..Self::default()
        };
        for entry in entries {
            timeline.next_handle = timeline.next_handle.max(entry.handle.0 + 1);
            timeline.live.insert(entry.handle);
            timeline.heap.push(Queued(entry));
        }
        timeline
    }

    /// Schedule `action` at absolute time `due`
    pub fn schedule(&mut self, due: u64, action: TimerAction) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.live.insert(handle);
        self.heap.push(Queued(TimerEntry {
            due,
            handle,
            action,
        }));
        handle
    }

    /// Cancel one entry. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.live.remove(&handle)
    }

    /// Drop every pending entry at once
    pub fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
    }

    fn discard_cancelled(&mut self) {
        while let Some(top) = self.heap.peek() {
            if self.live.contains(&top.0.handle) {
                break;
            }
            self.heap.pop();
        }
    }

    /// Due time of the earliest live entry
    pub fn next_due(&mut self) -> Option<u64> {
        self.discard_cancelled();
        self.heap.peek().map(|q| q.0.due)
    }

    /// Remove and return the earliest live entry if it is due at or before `now`
    pub fn pop_due(&mut self, now: u64) -> Option<TimerEntry> {
        self.discard_cancelled();
        if self.heap.peek()?.0.due > now {
            return None;
        }
        let Queued(entry) = self.heap.pop()?;
        self.live.remove(&entry.handle);
        Some(entry)
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Live entries in firing order
    pub fn entries(&self) -> Vec<TimerEntry> {
        let mut entries: Vec<TimerEntry> = self
            .heap
            .iter()
            .filter(|q| self.live.contains(&q.0.handle))
            .map(|q| q.0.clone())
            .collect();
        entries.sort_by_key(|e| (e.due, e.handle));
        entries
    }

    /// Handle the next `schedule` call will return
    pub fn next_handle(&self) -> u64 {
        self.next_handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deliver(id: &str) -> TimerAction {
        TimerAction::DeliverMessage {
            message_id: id.to_string(),
        }
    }

    #[test]
    fn test_pops_in_due_order() {
        let mut t = Timeline::new();
        t.schedule(300, deliver("c"));
        t.schedule(100, deliver("a"));
        t.schedule(200, deliver("b"));

        let order: Vec<u64> = std::iter::from_fn(|| t.pop_due(u64::MAX)).map(|e| e.due).collect();
        assert_eq!(order, vec![100, 200, 300]);
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut t = Timeline::new();
        let first = t.schedule(50, deliver("first"));
        let second = t.schedule(50, deliver("second"));
        assert_eq!(t.pop_due(50).map(|e| e.handle), Some(first));
        assert_eq!(t.pop_due(50).map(|e| e.handle), Some(second));
    }

    #[test]
    fn test_cancel_skips_entry() {
        let mut t = Timeline::new();
        let a = t.schedule(10, deliver("a"));
        t.schedule(20, deliver("b"));
        assert!(t.cancel(a));
        assert!(!t.cancel(a));
        assert_eq!(t.len(), 1);
        assert_eq!(t.next_due(), Some(20));
        assert_eq!(t.entries().len(), 1);
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut t = Timeline::new();
        t.schedule(10, deliver("a"));
        t.schedule(10, TimerAction::EndOfSimulation);
        t.clear();
        assert!(t.is_empty());
        assert!(t.pop_due(u64::MAX).is_none());
        assert!(t.next_due().is_none());
    }

    #[test]
    fn test_from_entries_keeps_handles_monotonic() {
        let mut original = Timeline::new();
        original.schedule(10, deliver("a"));
        original.schedule(5, deliver("b"));
        let mut restored = Timeline::from_entries(original.entries(), 0);
        let fresh = restored.schedule(1, deliver("c"));
        assert_eq!(fresh.value(), 2);
        assert_eq!(restored.entries(), {
            let mut e = original.entries();
            e.insert(
                0,
                TimerEntry {
                    due: 1,
                    handle: fresh,
                    action: deliver("c"),
                },
            );
            e
        });
    }
}

//! Typed publish/subscribe for simulation events
//!
//! Subscribers get an explicit `SubscriptionId` back and unsubscribe with
//! it. Listeners run synchronously, in registration order, on the caller's
//! stack. A panicking listener unwinds through `emit` and later listeners
//! for that event are not called.

use crate::events::types::{EventKind, SimulationEvent};
use std::fmt;

/// Callback invoked for each matching event
pub type Listener = Box<dyn FnMut(&SimulationEvent) + Send>;

/// Handle returned by [`EventBus::on`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    /// `None` = every event
    filter: Option<EventKind>,
    callback: Listener,
}

/// Event dispatcher owned by one simulation instance
///
/// # Example
/// ```
/// use scenario_simulator_core_rs::events::{EventBus, EventKind, SimulationEvent};
/// use std::sync::{Arc, Mutex};
///
/// let mut bus = EventBus::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// let id = bus.on(EventKind::SimulationStopped, move |e| {
///     sink.lock().unwrap().push(e.name());
/// });
///
/// bus.emit(&SimulationEvent::SimulationStopped {
///     duration: 0,
///     messages_received: 0,
///     interruptions_handled: 0,
/// });
/// assert_eq!(*seen.lock().unwrap(), vec!["simulation:stopped"]);
/// assert!(bus.off(id));
/// ```
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to one event kind
    pub fn on<F>(&mut self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&SimulationEvent) + Send + 'static,
    {
        self.subscribe(Some(kind), Box::new(callback))
    }

    /// Subscribe to every event
    pub fn on_any<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&SimulationEvent) + Send + 'static,
    {
        self.subscribe(None, Box::new(callback))
    }

    fn subscribe(&mut self, filter: Option<EventKind>, callback: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            filter,
            callback,
        });
        id
    }

    /// Remove a subscription
    ///
    /// Returns false if the id was unknown or already removed.
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Deliver `event` to every matching listener
    ///
    /// Returns the number of listeners invoked.
    pub fn emit(&mut self, event: &SimulationEvent) -> usize {
        let kind = event.kind();
        let mut delivered = 0;
        for sub in self
            .subscriptions
            .iter_mut()
            .filter(|s| s.filter.map_or(true, |k| k == kind))
        {
            (sub.callback)(event);
            delivered += 1;
        }
        delivered
    }

    /// Number of live subscriptions for `kind` (including catch-all ones)
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.subscriptions
            .iter()
            .filter(|s| s.filter.map_or(true, |k| k == kind))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriptions.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn stopped() -> SimulationEvent {
        SimulationEvent::SimulationStopped {
            duration: 1,
            messages_received: 0,
            interruptions_handled: 0,
        }
    }

    #[test]
    fn test_filter_by_kind() {
        let mut bus = EventBus::new();
        let hits = Arc::new(Mutex::new(0));
        let h = Arc::clone(&hits);
        bus.on(EventKind::MessageReceived, move |_| *h.lock().unwrap() += 1);

        assert_eq!(bus.emit(&stopped()), 0);
        assert_eq!(*hits.lock().unwrap(), 0);
    }

    #[test]
    fn test_off_twice_returns_false() {
        let mut bus = EventBus::new();
        let id = bus.on_any(|_| {});
        assert!(bus.off(id));
        assert!(!bus.off(id));
        assert!(bus.is_empty());
    }

    #[test]
    fn test_ids_not_reused_after_off() {
        let mut bus = EventBus::new();
        let a = bus.on_any(|_| {});
        bus.off(a);
        let b = bus.on_any(|_| {});
        assert_ne!(a, b);
    }
}

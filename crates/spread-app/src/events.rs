//! Event emission.
//!
//! Every session mutation emits an [`Event`]. Observers registered with
//! [`EventBus::observe`] are called synchronously, in registration order,
//! before `emit` returns. Channel subscribers get a copy through a
//! bounded broadcast buffer and may lag.

use std::sync::atomic::{AtomicU64, Ordering};

use spread_types::events::{Event, EventType};
use spread_types::unix_now;
use tokio::sync::broadcast;

/// Default broadcast buffer capacity.
pub const DEFAULT_CAPACITY: usize = 256;

/// Callback invoked for every emitted event.
pub type Observer = Box<dyn Fn(&Event)>;

/// Event bus for notifying the display layer of changes.
pub struct EventBus {
    sender: broadcast::Sender<Event>,
    observers: Vec<Observer>,
    sequence: AtomicU64,
}

impl EventBus {
    /// Create a new event bus with the given buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            observers: Vec::new(),
            sequence: AtomicU64::new(0),
        }
    }

    /// Register a synchronous observer.
    pub fn observe(&mut self, observer: impl Fn(&Event) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Subscribe to events. Returns a receiver.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Build and emit an event stamped with the current time.
    pub fn emit_now(&self, event_type: EventType, payload: serde_json::Value) {
        self.emit(Event {
            event_type,
            timestamp: unix_now(),
            payload,
        });
    }

    /// Emit an event to all observers and subscribers.
    pub fn emit(&self, event: Event) {
        self.sequence.fetch_add(1, Ordering::SeqCst);
        for observer in &self.observers {
            observer(&event);
        }
        // Ignore send errors (no subscribers)
        let _ = self.sender.send(event);
    }

    /// Get the current sequence number.
    pub fn sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_event_bus_emit_subscribe() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.emit(Event {
            event_type: EventType::SessionStarted,
            timestamp: 1000,
            payload: serde_json::json!({"version": "0.1.0"}),
        });

        let event = rx.try_recv().expect("receive event");
        assert_eq!(event.event_type, EventType::SessionStarted);
        assert_eq!(bus.sequence(), 1);
    }

    #[test]
    fn test_observers_called_in_order() {
        let mut bus = EventBus::default();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&seen);
        bus.observe(move |e| first.borrow_mut().push(("first", e.event_type)));
        let second = Rc::clone(&seen);
        bus.observe(move |e| second.borrow_mut().push(("second", e.event_type)));

        bus.emit_now(EventType::LedgerReset, serde_json::json!({}));

        assert_eq!(
            *seen.borrow(),
            vec![
                ("first", EventType::LedgerReset),
                ("second", EventType::LedgerReset)
            ]
        );
    }

    #[test]
    fn test_emit_without_subscribers() {
        let bus = EventBus::new(0);
        bus.emit_now(EventType::ParticipantAdded, serde_json::json!({"name": "A"}));
        assert_eq!(bus.sequence(), 1);
    }
}

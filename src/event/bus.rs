//! Broadcast channel for run events.
//!
//! [`EventBus`] wraps [`tokio::sync::broadcast`] so the runner can publish
//! without ever waiting on a slow observer. A lagging subscriber loses the
//! oldest events; the authoritative history stays in the run's
//! [`EventLog`](super::EventLog).

use tokio::sync::broadcast;

use super::Event;

#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Errors are ignored if there are no active subscribers.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

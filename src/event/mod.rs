// src/event/mod.rs

//! Observable history of a simulation run.
//!
//! - [`Event`] is one immutable record (`text`, `kind`, `timestamp`).
//! - [`EventLog`] is the append-only list of events for one run.
//! - [`EventHistory`] is the shared view of that list handed to observers.
//! - [`bus`] broadcasts events to observers while a run is in flight.

pub mod bus;
pub mod history;

use std::fmt;

pub use bus::EventBus;
pub use history::EventHistory;

/// Category of an [`Event`], used by renderers to pick a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Info,
    /// A label entered one of the queues.
    Queue,
    /// A label was executed (the simulated `console.log`).
    Output,
    /// A stage or phase was entered or left.
    Phase,
    /// The run finished.
    Complete,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Info => "info",
            EventKind::Queue => "queue",
            EventKind::Output => "output",
            EventKind::Phase => "phase",
            EventKind::Complete => "complete",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry of the event log.
///
/// `timestamp` is milliseconds since the run started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub text: String,
    pub kind: EventKind,
    pub timestamp: u64,
}

impl Event {
    pub fn new(text: impl Into<String>, kind: EventKind, timestamp: u64) -> Self {
        Self {
            text: text.into(),
            kind,
            timestamp,
        }
    }
}

/// Append-only event history of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }

    /// Texts of all events of the given kind, in log order.
    pub fn texts_of(&self, kind: EventKind) -> Vec<&str> {
        self.events
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.text.as_str())
            .collect()
    }

    /// Labels printed by the simulated program, in execution order.
    pub fn outputs(&self) -> Vec<&str> {
        self.texts_of(EventKind::Output)
    }
}

impl IntoIterator for EventLog {
    type Item = Event;
    type IntoIter = std::vec::IntoIter<Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

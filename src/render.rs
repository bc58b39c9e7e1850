// src/render.rs

//! Plain-text rendering of the event stream and queue snapshots.

use crate::engine::{Phase, QueueId, Snapshot};
use crate::event::{Event, EventKind};

/// Marker printed in front of an event, by kind.
pub fn prefix(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Output => "→",
        EventKind::Phase => "▶",
        EventKind::Complete => "✓",
        EventKind::Info | EventKind::Queue => "+",
    }
}

pub fn format_event(event: &Event) -> String {
    format!(
        "[{:>6}ms] {} {}",
        event.timestamp,
        prefix(event.kind),
        event.text
    )
}

/// One-line summary of every queue, the call stack and the active stage.
pub fn format_snapshot(snapshot: &Snapshot) -> String {
    let mut parts = Vec::with_capacity(QueueId::ALL.len() + 2);
    parts.push(format!("stack=[{}]", snapshot.call_stack.join(", ")));

    for (id, items) in snapshot.queues.iter() {
        if *id == QueueId::Script {
            continue;
        }
        parts.push(format!("{id}=[{}]", items.join(", ")));
    }

    let active = snapshot.active.map_or("-", |s| s.name());
    parts.push(format!("active={active}"));

    format!("           {}", parts.join(" "))
}

/// The loop phases in order, one line each with what they run.
pub fn format_phases() -> Vec<String> {
    Phase::ALL
        .iter()
        .enumerate()
        .map(|(i, phase)| format!("  {}. {:<12} {}", i + 1, phase.name(), phase.description()))
        .collect()
}

/// Incremental printer over successive snapshots.
///
/// Snapshots carry the whole event log; the printer remembers how much it
/// has already emitted and only renders the new tail.
#[derive(Debug, Default)]
pub struct SnapshotPrinter {
    printed: usize,
    show_queues: bool,
}

impl SnapshotPrinter {
    pub fn new(show_queues: bool) -> Self {
        Self {
            printed: 0,
            show_queues,
        }
    }

    /// Lines to print for `snapshot` that were not printed before.
    pub fn render(&mut self, snapshot: &Snapshot) -> Vec<String> {
        // A shorter log means the state was reset underneath us.
        if snapshot.events.len() < self.printed {
            self.printed = 0;
        }

        let fresh = snapshot.events.len() - self.printed;
        let mut lines: Vec<String> = snapshot
            .events
            .latest(fresh)
            .into_iter()
            .map(format_event)
            .collect();
        self.printed = snapshot.events.len();

        if self.show_queues && !lines.is_empty() {
            lines.push(format_snapshot(snapshot));
        }
        lines
    }
}

// src/engine/state.rs

//! Mutable state of one run, and the read-only snapshots observers see.

use crate::engine::phase::Stage;
use crate::engine::queue::{QueueId, Queues};
use crate::event::{Event, EventHistory, EventKind, EventLog};
use crate::types::{Label, RunStatus};

/// Everything a run mutates.
///
/// Owned exclusively by the scheduler driving the run. Observers never
/// borrow it; they receive [`Snapshot`]s instead.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    queues: Queues,
    call_stack: Vec<Label>,
    active: Option<Stage>,
    log: EventLog,
    history: EventHistory,
    status: RunStatus,
}

impl RunState {
    /// Fresh running state with `script` loaded as the program body.
    pub fn with_script(script: impl IntoIterator<Item = Label>) -> Self {
        let mut state = Self {
            status: RunStatus::Running,
            ..Self::default()
        };
        let body = state.queues.get_mut(QueueId::Script);
        for label in script {
            body.push_back(label);
        }
        state
    }

    pub fn queues(&self) -> &Queues {
        &self.queues
    }

    pub fn queue_len(&self, id: QueueId) -> usize {
        self.queues.get(id).len()
    }

    pub fn call_stack(&self) -> &[Label] {
        &self.call_stack
    }

    pub fn active(&self) -> Option<Stage> {
        self.active
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn into_log(self) -> EventLog {
        self.log
    }

    /// Move the head of `queue` onto the call stack.
    pub fn call(&mut self, queue: QueueId) -> Option<&Label> {
        let label = self.queues.get_mut(queue).pop_front()?;
        self.call_stack.push(label);
        self.call_stack.last()
    }

    /// Pop the call stack and record the label's output.
    pub fn output(&mut self, timestamp: u64) -> Option<Event> {
        let label = self.call_stack.pop()?;
        Some(self.record(label, EventKind::Output, timestamp))
    }

    pub fn enqueue(&mut self, queue: QueueId, label: Label, timestamp: u64) -> Event {
        let text = format!("Queue: {label} → {queue}");
        self.queues.get_mut(queue).push_back(label);
        self.record(text, EventKind::Queue, timestamp)
    }

    pub fn enter(&mut self, stage: Stage, text: &str, timestamp: u64) -> Event {
        self.active = Some(stage);
        self.record(text, EventKind::Phase, timestamp)
    }

    pub fn exit(&mut self, text: &str, timestamp: u64) -> Event {
        self.active = None;
        self.record(text, EventKind::Phase, timestamp)
    }

    pub fn complete(&mut self, text: &str, timestamp: u64) -> Event {
        self.active = None;
        self.status = RunStatus::Idle;
        self.record(text, EventKind::Complete, timestamp)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            queues: QueueId::ALL
                .iter()
                .map(|id| (*id, self.queues.get(*id).to_vec()))
                .collect(),
            call_stack: self.call_stack.clone(),
            active: self.active,
            events: self.history.clone(),
            status: self.status,
        }
    }

    fn record(&mut self, text: impl Into<String>, kind: EventKind, timestamp: u64) -> Event {
        let event = Event::new(text, kind, timestamp);
        self.log.push(event.clone());
        self.history.push(event.clone());
        event
    }
}

/// Immutable copy of a [`RunState`] taken after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Contents of every queue, in [`QueueId::ALL`] order.
    pub queues: Vec<(QueueId, Vec<Label>)>,
    pub call_stack: Vec<Label>,
    pub active: Option<Stage>,
    /// Every event so far; shared with later snapshots of the same run.
    pub events: EventHistory,
    pub status: RunStatus,
}

impl Snapshot {
    /// The observable state with no run: empty queues, empty log.
    pub fn idle() -> Self {
        RunState::default().snapshot()
    }

    pub fn queue(&self, id: QueueId) -> &[Label] {
        self.queues
            .iter()
            .find(|(q, _)| *q == id)
            .map(|(_, items)| items.as_slice())
            .unwrap_or(&[])
    }

    pub fn all_queues_empty(&self) -> bool {
        self.queues.iter().all(|(_, items)| items.is_empty())
    }

    /// True for the state a finished run leaves behind.
    pub fn is_complete(&self) -> bool {
        self.status == RunStatus::Idle
            && self
                .events
                .last()
                .is_some_and(|e| e.kind == EventKind::Complete)
    }

    /// True when nothing is running and nothing has been recorded.
    pub fn is_reset(&self) -> bool {
        self.status == RunStatus::Idle
            && self.all_queues_empty()
            && self.call_stack.is_empty()
            && self.active.is_none()
            && self.events.is_empty()
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::idle()
    }
}

// src/engine/queue.rs

use std::collections::VecDeque;
use std::fmt;

use crate::types::Label;

const QUEUE_COUNT: usize = 8;

/// Identity of every queue the simulation displays.
///
/// `Script` holds the synchronous program body; the others model the
/// runtime's callback queues. `PendingIo`, `Poll` and `Close` never receive
/// anything: they exist so their phases can be shown and iterated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueId {
    Script,
    NextTick,
    Microtask,
    Timers,
    PendingIo,
    Poll,
    Check,
    Close,
}

impl QueueId {
    pub const ALL: [QueueId; QUEUE_COUNT] = [
        QueueId::Script,
        QueueId::NextTick,
        QueueId::Microtask,
        QueueId::Timers,
        QueueId::PendingIo,
        QueueId::Poll,
        QueueId::Check,
        QueueId::Close,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            QueueId::Script => "Script",
            QueueId::NextTick => "nextTick",
            QueueId::Microtask => "Microtask",
            QueueId::Timers => "Timers",
            QueueId::PendingIo => "Pending I/O",
            QueueId::Poll => "Poll",
            QueueId::Check => "Check",
            QueueId::Close => "Close",
        }
    }

    /// Whether nothing is ever enqueued here.
    pub fn is_structural(&self) -> bool {
        matches!(self, QueueId::PendingIo | QueueId::Poll | QueueId::Close)
    }
}

impl fmt::Display for QueueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A strictly FIFO queue of labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQueue {
    items: VecDeque<Label>,
}

impl TaskQueue {
    pub fn push_back(&mut self, label: Label) {
        self.items.push_back(label);
    }

    pub fn pop_front(&mut self) -> Option<Label> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Label> {
        self.items.iter().cloned().collect()
    }
}

/// All queues of one run, addressed by [`QueueId`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queues {
    queues: [TaskQueue; QUEUE_COUNT],
}

impl Queues {
    pub fn get(&self, id: QueueId) -> &TaskQueue {
        &self.queues[id.index()]
    }

    pub fn get_mut(&mut self, id: QueueId) -> &mut TaskQueue {
        &mut self.queues[id.index()]
    }
}

// src/engine/phase.rs

//! Stages of a simulated event-loop turn and their transition table.
//!
//! A run walks [`Stage`]s in a fixed order:
//!
//! ```text
//! Sync -> PriorityMicro -> SecondaryMicro
//!      -> Timers -> Pending I/O -> Poll -> Check -> Close -> Complete
//! ```
//!
//! Every stage after `Sync` and before `Complete` is described by one row of
//! [`STAGES`]: the queue it drains, the marker texts it emits on entry and
//! exit, and whether it is skipped when its queue is empty. Structural phases
//! are never skipped, so their markers appear in every run.

use std::fmt;

use crate::engine::pacing::Beat;
use crate::engine::queue::QueueId;

/// The five macro-task phases, in loop order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Timers,
    PendingIo,
    Poll,
    Check,
    Close,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Timers,
        Phase::PendingIo,
        Phase::Poll,
        Phase::Check,
        Phase::Close,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Timers => "Timers",
            Phase::PendingIo => "Pending I/O",
            Phase::Poll => "Poll",
            Phase::Check => "Check",
            Phase::Close => "Close",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Phase::Timers => "setTimeout, setInterval callbacks",
            Phase::PendingIo => "I/O callbacks deferred to next iteration",
            Phase::Poll => "Retrieve new I/O events, execute callbacks",
            Phase::Check => "setImmediate callbacks",
            Phase::Close => "Close event callbacks (socket.on(\"close\"))",
        }
    }

    /// The queue bound to this phase.
    pub fn queue(&self) -> QueueId {
        match self {
            Phase::Timers => QueueId::Timers,
            Phase::PendingIo => QueueId::PendingIo,
            Phase::Poll => QueueId::Poll,
            Phase::Check => QueueId::Check,
            Phase::Close => QueueId::Close,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of a run in the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Sync,
    PriorityMicro,
    SecondaryMicro,
    Phase(Phase),
    Complete,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Sync => "Sync",
            Stage::PriorityMicro => "nextTick Queue",
            Stage::SecondaryMicro => "Microtask Queue",
            Stage::Phase(p) => p.name(),
            Stage::Complete => "Complete",
        }
    }

    /// Table row for draining stages; `None` for `Sync` and `Complete`.
    pub fn definition(&self) -> Option<&'static StageDef> {
        STAGES.iter().find(|s| s.stage == *self)
    }

    /// The stage that follows this one, or `None` after `Complete`.
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Sync => Some(STAGES[0].stage),
            Stage::Complete => None,
            other => {
                let idx = STAGES.iter().position(|s| s.stage == *other)?;
                Some(STAGES.get(idx + 1).map_or(Stage::Complete, |s| s.stage))
            }
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a stage behaves when entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    /// Drains its queue; skipped without markers when the queue is empty.
    Drain,
    /// Always entered and left, with nothing to drain.
    Structural,
}

/// One row of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDef {
    pub stage: Stage,
    pub queue: QueueId,
    pub kind: StageKind,
    pub enter_text: &'static str,
    pub exit_text: &'static str,
}

impl StageDef {
    pub fn skips_when_empty(&self) -> bool {
        self.kind == StageKind::Drain
    }

    pub fn enter_beat(&self) -> Beat {
        match self.kind {
            StageKind::Drain => Beat::DrainEnter,
            StageKind::Structural => Beat::EmptyEnter,
        }
    }

    pub fn exit_beat(&self) -> Beat {
        match self.kind {
            StageKind::Drain => Beat::DrainExit,
            StageKind::Structural => Beat::EmptyExit,
        }
    }
}

/// Draining stages in execution order. `Sync` precedes the first row and
/// `Complete` follows the last.
pub const STAGES: [StageDef; 7] = [
    StageDef {
        stage: Stage::PriorityMicro,
        queue: QueueId::NextTick,
        kind: StageKind::Drain,
        enter_text: "--- Executing nextTick Queue ---",
        exit_text: "--- Leaving nextTick Queue ---",
    },
    StageDef {
        stage: Stage::SecondaryMicro,
        queue: QueueId::Microtask,
        kind: StageKind::Drain,
        enter_text: "--- Executing Microtask Queue ---",
        exit_text: "--- Leaving Microtask Queue ---",
    },
    StageDef {
        stage: Stage::Phase(Phase::Timers),
        queue: QueueId::Timers,
        kind: StageKind::Drain,
        enter_text: "--- Entering Timers Phase ---",
        exit_text: "--- Leaving Timers Phase ---",
    },
    StageDef {
        stage: Stage::Phase(Phase::PendingIo),
        queue: QueueId::PendingIo,
        kind: StageKind::Structural,
        enter_text: "--- Pending I/O Phase (Empty) ---",
        exit_text: "--- Leaving Pending I/O Phase ---",
    },
    StageDef {
        stage: Stage::Phase(Phase::Poll),
        queue: QueueId::Poll,
        kind: StageKind::Structural,
        enter_text: "--- Poll Phase (Empty) ---",
        exit_text: "--- Leaving Poll Phase ---",
    },
    StageDef {
        stage: Stage::Phase(Phase::Check),
        queue: QueueId::Check,
        kind: StageKind::Drain,
        enter_text: "--- Entering Check Phase ---",
        exit_text: "--- Leaving Check Phase ---",
    },
    StageDef {
        stage: Stage::Phase(Phase::Close),
        queue: QueueId::Close,
        kind: StageKind::Structural,
        enter_text: "--- Close Phase (Empty) ---",
        exit_text: "--- Leaving Close Phase ---",
    },
];

pub const COMPLETE_TEXT: &str = "--- Event Loop Complete ---";

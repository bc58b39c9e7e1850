// src/engine/pacing.rs

//! Presentation pacing.
//!
//! Every transition of the scheduler is followed by a pause. The length of
//! that pause depends only on the configured speed and on which kind of
//! transition just happened ([`Beat`]); there is no jitter and no wall-clock
//! input.

use std::time::Duration;

use crate::types::SpeedMs;

/// The kind of transition a pause follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Beat {
    /// A label was placed on the call stack.
    CallStack,
    /// A synchronous label produced its output.
    SyncOutput,
    /// A label entered a queue.
    Enqueue,
    /// The enqueue batch after the first synchronous output finished.
    BatchSettle,
    /// The synchronous stage finished.
    SyncSettle,
    /// A draining stage was entered.
    DrainEnter,
    /// A label was taken off a draining queue.
    Dequeue,
    /// A drained label produced its output.
    DrainOutput,
    /// A draining stage was left.
    DrainExit,
    /// A structurally empty phase was entered.
    EmptyEnter,
    /// A structurally empty phase was left.
    EmptyExit,
    /// No pause (run completion).
    None,
}

/// Speed setting of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pace {
    speed: Duration,
}

impl Pace {
    pub fn from_millis(ms: u64) -> Self {
        Self {
            speed: Duration::from_millis(ms),
        }
    }

    /// No pauses at all.
    pub fn instant() -> Self {
        Self {
            speed: Duration::ZERO,
        }
    }

    pub fn speed(&self) -> Duration {
        self.speed
    }

    pub fn is_instant(&self) -> bool {
        self.speed.is_zero()
    }

    /// Pause that follows a transition of the given kind.
    pub fn pause(&self, beat: Beat) -> Duration {
        let s = self.speed;
        match beat {
            Beat::CallStack | Beat::SyncSettle | Beat::DrainEnter | Beat::DrainOutput => s,
            Beat::SyncOutput
            | Beat::BatchSettle
            | Beat::Dequeue
            | Beat::DrainExit
            | Beat::EmptyEnter => s / 2,
            Beat::Enqueue => s / 3,
            Beat::EmptyExit => s / 4,
            Beat::None => Duration::ZERO,
        }
    }
}

impl Default for Pace {
    fn default() -> Self {
        Pace::from(SpeedMs::default())
    }
}

impl From<SpeedMs> for Pace {
    fn from(speed: SpeedMs) -> Self {
        Pace::from_millis(speed.0)
    }
}

// src/engine/core.rs

//! Pure core scheduler.
//!
//! [`Scheduler`] is a synchronous, deterministic stepper. Each call to
//! [`Scheduler::step`] applies exactly one transition to the [`RunState`] and
//! returns a [`Tick`]: the event that transition produced (if any) and the
//! pacing pause that should follow it.
//!
//! The stepper never sleeps and has no Tokio types; the async shell in
//! [`runtime`](super::runtime) is responsible for honouring the pauses and
//! for cancellation. Timestamps come from a virtual clock that advances by
//! the pauses already handed out, so the same input always yields the same
//! log.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, info};

use crate::classify::TaskGroups;
use crate::engine::pacing::{Beat, Pace};
use crate::engine::phase::{COMPLETE_TEXT, Stage};
use crate::engine::queue::QueueId;
use crate::engine::state::{RunState, Snapshot};
use crate::event::{Event, EventLog};
use crate::types::Label;

/// Result of applying one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub event: Option<Event>,
    pub pause: Duration,
}

/// A single transition waiting to be applied.
#[derive(Debug, Clone)]
enum Op {
    /// Move the head of a queue onto the call stack.
    Call(QueueId),
    /// Run whatever is on top of the call stack.
    Output,
    Enqueue(QueueId, Label),
    Enter(Stage),
    Exit(Stage),
    /// Pause only.
    Settle,
    Complete,
}

#[derive(Debug, Clone)]
struct Instruction {
    op: Op,
    beat: Beat,
}

impl Instruction {
    fn new(op: Op, beat: Beat) -> Self {
        Self { op, beat }
    }
}

/// Drives one run from the synchronous stage to completion.
#[derive(Debug)]
pub struct Scheduler {
    state: RunState,
    pace: Pace,
    stage: Stage,
    agenda: VecDeque<Instruction>,
    clock: Duration,
}

impl Scheduler {
    pub fn new(groups: TaskGroups, pace: Pace) -> Self {
        let TaskGroups {
            sync,
            timer,
            immediate,
            priority_micro,
            secondary_micro,
        } = groups;

        let state = RunState::with_script(sync);

        // Everything the program body registers, in registration order.
        let batch: Vec<(QueueId, Label)> = timer
            .into_iter()
            .map(|l| (QueueId::Timers, l))
            .chain(immediate.into_iter().map(|l| (QueueId::Check, l)))
            .chain(priority_micro.into_iter().map(|l| (QueueId::NextTick, l)))
            .chain(secondary_micro.into_iter().map(|l| (QueueId::Microtask, l)))
            .collect();

        let agenda = sync_agenda(state.queue_len(QueueId::Script), batch);

        info!(
            sync = state.queue_len(QueueId::Script),
            speed_ms = pace.speed().as_millis() as u64,
            "scheduler: new run"
        );

        Self {
            state,
            pace,
            stage: Stage::Sync,
            agenda,
            clock: Duration::ZERO,
        }
    }

    /// The stage currently being worked through.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Milliseconds of virtual time elapsed so far.
    pub fn elapsed_ms(&self) -> u64 {
        self.clock.as_millis() as u64
    }

    /// Apply the next transition.
    ///
    /// Returns `None` once the completion event has been emitted.
    pub fn step(&mut self) -> Option<Tick> {
        loop {
            if let Some(instr) = self.agenda.pop_front() {
                let event = self.apply(instr.op);
                let pause = self.pace.pause(instr.beat);
                self.clock += pause;
                return Some(Tick { event, pause });
            }

            let next = self.stage.next()?;
            self.stage = next;
            self.agenda = self.stage_agenda(next);
            debug!(
                stage = %next,
                transitions = self.agenda.len(),
                "scheduler: entering stage"
            );
        }
    }

    /// Step to the end without pausing and return the full log.
    pub fn run_to_end(mut self) -> EventLog {
        while self.step().is_some() {}
        self.state.into_log()
    }

    /// Expand a draining or final stage into its transitions.
    ///
    /// Called when the stage is reached, so the decision to skip looks at
    /// the queue as it is at that moment.
    fn stage_agenda(&self, stage: Stage) -> VecDeque<Instruction> {
        let mut agenda = VecDeque::new();

        if stage == Stage::Complete {
            agenda.push_back(Instruction::new(Op::Complete, Beat::None));
            return agenda;
        }

        let Some(def) = stage.definition() else {
            return agenda;
        };

        let pending = self.state.queue_len(def.queue);
        if pending == 0 && def.skips_when_empty() {
            debug!(stage = %stage, "scheduler: queue empty; skipping stage");
            return agenda;
        }

        agenda.push_back(Instruction::new(Op::Enter(stage), def.enter_beat()));
        for _ in 0..pending {
            agenda.push_back(Instruction::new(Op::Call(def.queue), Beat::Dequeue));
            agenda.push_back(Instruction::new(Op::Output, Beat::DrainOutput));
        }
        agenda.push_back(Instruction::new(Op::Exit(stage), def.exit_beat()));
        agenda
    }

    fn apply(&mut self, op: Op) -> Option<Event> {
        let now = self.elapsed_ms();
        match op {
            Op::Call(queue) => {
                let label = self.state.call(queue);
                debug!(%queue, ?label, "scheduler: call stack push");
                None
            }
            Op::Output => {
                let event = self.state.output(now);
                if let Some(ref e) = event {
                    debug!(stage = %self.stage, label = %e.text, "scheduler: output");
                }
                event
            }
            Op::Enqueue(queue, label) => {
                debug!(%queue, label = %label, "scheduler: enqueue");
                Some(self.state.enqueue(queue, label, now))
            }
            Op::Enter(stage) => {
                let text = stage.definition().map_or("", |s| s.enter_text);
                Some(self.state.enter(stage, text, now))
            }
            Op::Exit(stage) => {
                let text = stage.definition().map_or("", |s| s.exit_text);
                Some(self.state.exit(text, now))
            }
            Op::Settle => None,
            Op::Complete => {
                info!(
                    events = self.state.log().len() + 1,
                    elapsed_ms = now,
                    "scheduler: run complete"
                );
                Some(self.state.complete(COMPLETE_TEXT, now))
            }
        }
    }
}

/// Transitions of the synchronous stage.
///
/// Each body label is pushed onto the call stack and then run. Right after
/// the first one runs, the whole registration batch is enqueued in one go.
/// With an empty body nothing is registered.
fn sync_agenda(body_len: usize, batch: Vec<(QueueId, Label)>) -> VecDeque<Instruction> {
    let mut agenda = VecDeque::new();
    let mut batch = Some(batch);

    for _ in 0..body_len {
        agenda.push_back(Instruction::new(Op::Call(QueueId::Script), Beat::CallStack));
        agenda.push_back(Instruction::new(Op::Output, Beat::SyncOutput));

        if let Some(registrations) = batch.take() {
            for (queue, label) in registrations {
                agenda.push_back(Instruction::new(Op::Enqueue(queue, label), Beat::Enqueue));
            }
            agenda.push_back(Instruction::new(Op::Settle, Beat::BatchSettle));
        }
    }

    agenda.push_back(Instruction::new(Op::Settle, Beat::SyncSettle));
    agenda
}

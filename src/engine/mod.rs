// src/engine/mod.rs

//! Scheduling engine.
//!
//! This module ties together:
//! - the queues a run fills and drains ([`queue`])
//! - the stage order and transition table ([`phase`])
//! - the mutable run state and its snapshots ([`state`])
//! - presentation pacing ([`pacing`])
//!
//! The pure, deterministic state machine lives in [`core`]; the async shell
//! that sleeps between transitions and honours cancellation lives in
//! [`runtime`].

pub mod core;
pub mod pacing;
pub mod phase;
pub mod queue;
pub mod runtime;
pub mod state;

pub use self::core::{Scheduler, Tick};
pub use pacing::{Beat, Pace};
pub use phase::{Phase, Stage, StageKind, StageDef, STAGES};
pub use queue::{QueueId, TaskQueue};
pub use runtime::{run, RunOutcome, Runner};
pub use state::{RunState, Snapshot};

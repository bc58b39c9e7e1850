// src/engine/runtime.rs

use std::fmt;

use tokio::sync::{oneshot, watch};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::classify::TaskGroups;
use crate::event::{EventBus, EventLog};

use super::core::Scheduler;
use super::pacing::Pace;
use super::state::Snapshot;

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The run reached the completion event; carries its full log.
    Completed(EventLog),
    /// The run was stopped by a cancel request before completing.
    Cancelled,
}

/// Async shell around a [`Scheduler`].
///
/// The runner is the only writer of its run's state. After every transition
/// it publishes a [`Snapshot`] on the watch channel and the transition's
/// event on the bus, then waits for the pacing pause. Every pause races the
/// cancel signal; once cancelled the runner returns without publishing
/// anything further and its state is dropped with it.
pub struct Runner {
    scheduler: Scheduler,
    snapshots: watch::Sender<Snapshot>,
    bus: EventBus,
    cancel_rx: oneshot::Receiver<()>,
}

impl fmt::Debug for Runner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runner")
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

impl Runner {
    pub fn new(
        scheduler: Scheduler,
        snapshots: watch::Sender<Snapshot>,
        bus: EventBus,
        cancel_rx: oneshot::Receiver<()>,
    ) -> Self {
        Self {
            scheduler,
            snapshots,
            bus,
            cancel_rx,
        }
    }

    /// Drive the scheduler to completion or cancellation.
    pub async fn run(mut self) -> RunOutcome {
        info!("simulation run started");
        self.snapshots.send_replace(self.scheduler.snapshot());

        while let Some(tick) = self.scheduler.step() {
            self.snapshots.send_replace(self.scheduler.snapshot());
            if let Some(event) = tick.event {
                debug!(kind = %event.kind, text = %event.text, "runtime: event");
                self.bus.publish(event);
            }

            tokio::select! {
                biased;
                _ = &mut self.cancel_rx => {
                    info!(
                        stage = %self.scheduler.stage(),
                        "simulation run cancelled; discarding state"
                    );
                    return RunOutcome::Cancelled;
                }
                _ = sleep(tick.pause) => {}
            }
        }

        info!("simulation run finished");
        RunOutcome::Completed(self.scheduler.run_to_end())
    }
}

/// Run `groups` to completion with the given pacing and return the log.
///
/// Nothing observes the run; use a [`Session`](crate::session::Session) for
/// live snapshots and cancellation.
pub async fn run(groups: TaskGroups, pace: Pace) -> EventLog {
    let (snapshots, _snapshot_rx) = watch::channel(Snapshot::idle());
    let (_cancel_tx, cancel_rx) = oneshot::channel();
    let runner = Runner::new(Scheduler::new(groups, pace), snapshots, EventBus::default(), cancel_rx);

    match runner.run().await {
        RunOutcome::Completed(log) => log,
        RunOutcome::Cancelled => {
            warn!("unobserved run reported cancellation");
            EventLog::new()
        }
    }
}

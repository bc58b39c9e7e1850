// src/session.rs

//! Control surface used by front ends.
//!
//! A [`Session`] holds the currently loaded program text, the pacing, the
//! preset catalog and at most one active run. It exposes the three control
//! operations (`start`, `reset`, `change_example`) plus read-only access to
//! the live state:
//!
//! - [`Session::subscribe`] yields a watch receiver of [`Snapshot`]s.
//! - [`Session::events`] yields a broadcast receiver of [`Event`]s.
//!
//! The run itself executes on a Tokio task that owns its state; the session
//! only keeps the handle and a cancel sender for it.

use tokio::sync::{broadcast, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::classify::classify;
use crate::engine::{Pace, RunOutcome, Runner, Scheduler, Snapshot};
use crate::errors::{Result, SimError};
use crate::event::{Event, EventBus};
use crate::presets::{DEFAULT_PRESET, PresetCatalog};

/// Handle to the run currently executing on a Tokio task.
struct ActiveRun {
    cancel: Option<oneshot::Sender<()>>,
    handle: JoinHandle<RunOutcome>,
}

pub struct Session {
    catalog: PresetCatalog,
    selected: Option<String>,
    source: String,
    pace: Pace,
    bus: EventBus,
    snapshots: watch::Sender<Snapshot>,
    active: Option<ActiveRun>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("selected", &self.selected)
            .field("pace", &self.pace)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session with the default preset loaded (if the catalog has
    /// it) and nothing running.
    pub fn new(catalog: PresetCatalog, pace: Pace) -> Self {
        let (selected, source) = match catalog.get(DEFAULT_PRESET) {
            Some(p) => (Some(p.key.clone()), p.code.clone()),
            None => (None, String::new()),
        };
        let (snapshots, _rx) = watch::channel(Snapshot::idle());

        Self {
            catalog,
            selected,
            source,
            pace,
            bus: EventBus::default(),
            snapshots,
            active: None,
        }
    }

    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    /// Key of the loaded preset; `None` once custom source has been run.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn pace(&self) -> Pace {
        self.pace
    }

    pub fn set_pace(&mut self, pace: Pace) {
        self.pace = pace;
    }

    /// Whether a run is currently in flight.
    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|run| !run.handle.is_finished())
    }

    /// Latest observable state.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.subscribe()
    }

    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Classify `source` and start a fresh run of it.
    ///
    /// Fails with [`SimError::AlreadyRunning`] while another run is active;
    /// call [`reset`](Self::reset) first. Must be called inside a Tokio
    /// runtime.
    pub fn start(&mut self, source: &str, pace: Pace) -> Result<()> {
        if self.is_running() {
            warn!("start requested while a run is active; ignoring");
            return Err(SimError::AlreadyRunning);
        }

        // A finished run's handle may still be held; its state is gone.
        self.active = None;

        if source != self.source {
            self.selected = None;
            self.source = source.to_string();
        }
        self.pace = pace;

        let groups = classify(source);
        let scheduler = Scheduler::new(groups, pace);
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let runner = Runner::new(scheduler, self.snapshots.clone(), self.bus.clone(), cancel_rx);

        let handle = tokio::spawn(runner.run());
        self.active = Some(ActiveRun {
            cancel: Some(cancel_tx),
            handle,
        });

        info!(preset = ?self.selected, "session: run started");
        Ok(())
    }

    /// Start a run of the currently loaded source with the session's pace.
    pub fn start_current(&mut self) -> Result<()> {
        let source = self.source.clone();
        self.start(&source, self.pace)
    }

    /// Cancel any active run and clear all observable state.
    ///
    /// Returns once the run has stopped, so nothing it does can reach
    /// observers afterwards. Calling this repeatedly is harmless.
    pub async fn reset(&mut self) {
        if let Some(mut run) = self.active.take() {
            if let Some(cancel) = run.cancel.take() {
                if cancel.send(()).is_err() {
                    debug!("session: run already finished while resetting");
                }
            }
            if let Err(e) = run.handle.await {
                warn!(error = %e, "session: run task ended abnormally");
            }
        }

        self.snapshots.send_replace(Snapshot::idle());
        debug!("session: reset to idle");
    }

    /// Reset and load the preset named `key`.
    pub async fn change_example(&mut self, key: &str) -> Result<()> {
        let code = self
            .catalog
            .get(key)
            .map(|p| p.code.clone())
            .ok_or_else(|| SimError::UnknownPreset(key.to_string()))?;

        self.reset().await;
        self.selected = Some(key.to_string());
        self.source = code;

        info!(preset = %key, "session: example loaded");
        Ok(())
    }

    /// Wait for the active run to end and return how it ended.
    ///
    /// Returns `None` when nothing was started.
    pub async fn wait(&mut self) -> Option<RunOutcome> {
        let mut run = self.active.take()?;
        match (&mut run.handle).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!(error = %e, "session: run task ended abnormally");
                None
            }
        }
    }
}

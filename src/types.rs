use std::fmt;
use std::str::FromStr;

/// Canonical task label type used throughout the crate.
///
/// A label is the quoted text a task prints; it has no identity beyond its
/// value and its position in the group it was classified into.
pub type Label = String;

/// The five categories a classified task can belong to.
///
/// - `Sync`: plain output executed directly by the program body.
/// - `Timer`: deferred to the Timers phase (`setTimeout`).
/// - `Immediate`: deferred to the Check phase (`setImmediate`).
/// - `PriorityMicro`: drained before any other deferred work
///   (`process.nextTick`).
/// - `SecondaryMicro`: drained after all priority micro-tasks
///   (`Promise.resolve().then`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskGroup {
    Sync,
    Timer,
    Immediate,
    PriorityMicro,
    SecondaryMicro,
}

impl TaskGroup {
    pub const ALL: [TaskGroup; 5] = [
        TaskGroup::Sync,
        TaskGroup::Timer,
        TaskGroup::Immediate,
        TaskGroup::PriorityMicro,
        TaskGroup::SecondaryMicro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskGroup::Sync => "sync",
            TaskGroup::Timer => "timer",
            TaskGroup::Immediate => "immediate",
            TaskGroup::PriorityMicro => "nextTick",
            TaskGroup::SecondaryMicro => "promise",
        }
    }
}

impl fmt::Display for TaskGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a simulation is currently executing.
///
/// There is no paused state: stopping a run discards it, and the next
/// `start` builds a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
}

/// Pacing speed in milliseconds, as accepted on the CLI and in the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedMs(pub u64);

impl SpeedMs {
    pub const MIN: u64 = 300;
    pub const MAX: u64 = 2000;
    pub const DEFAULT: u64 = 1000;

    pub fn is_in_range(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }
}

impl Default for SpeedMs {
    fn default() -> Self {
        SpeedMs(Self::DEFAULT)
    }
}

impl FromStr for SpeedMs {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ms: u64 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid speed: {s} (expected milliseconds)"))?;
        let speed = SpeedMs(ms);
        if !speed.is_in_range() {
            return Err(format!(
                "speed must be between {} and {} ms (got {ms})",
                Self::MIN,
                Self::MAX
            ));
        }
        Ok(speed)
    }
}

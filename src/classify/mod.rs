// src/classify/mod.rs

//! Best-effort classification of program text into task groups.
//!
//! This is a line scanner over a fixed marker table ([`markers::MARKERS`]),
//! not a parser. Each line is looked at on its own:
//!
//! - the first marker found on the line decides the group;
//! - the label is the first quoted `console.log(...)` argument on the same
//!   line;
//! - a marker line without such a label is dropped (a [`ClassificationMiss`]).
//!
//! Braces, nesting and statements spanning several lines are not tracked.
//! A callback whose `console.log` sits on the next line is therefore missed
//! and the `console.log` line itself is classified as synchronous output.

pub mod markers;

use tracing::debug;

use crate::types::{Label, TaskGroup};

/// Classifier output: one ordered label list per group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskGroups {
    pub sync: Vec<Label>,
    pub timer: Vec<Label>,
    pub immediate: Vec<Label>,
    pub priority_micro: Vec<Label>,
    pub secondary_micro: Vec<Label>,
}

impl TaskGroups {
    pub fn get(&self, group: TaskGroup) -> &[Label] {
        match group {
            TaskGroup::Sync => &self.sync,
            TaskGroup::Timer => &self.timer,
            TaskGroup::Immediate => &self.immediate,
            TaskGroup::PriorityMicro => &self.priority_micro,
            TaskGroup::SecondaryMicro => &self.secondary_micro,
        }
    }

    pub fn get_mut(&mut self, group: TaskGroup) -> &mut Vec<Label> {
        match group {
            TaskGroup::Sync => &mut self.sync,
            TaskGroup::Timer => &mut self.timer,
            TaskGroup::Immediate => &mut self.immediate,
            TaskGroup::PriorityMicro => &mut self.priority_micro,
            TaskGroup::SecondaryMicro => &mut self.secondary_micro,
        }
    }

    pub fn total(&self) -> usize {
        TaskGroup::ALL.iter().map(|g| self.get(*g).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// The output order the scheduler must produce for these groups.
    pub fn expected_output_order(&self) -> Vec<&str> {
        [
            TaskGroup::Sync,
            TaskGroup::PriorityMicro,
            TaskGroup::SecondaryMicro,
            TaskGroup::Timer,
            TaskGroup::Immediate,
        ]
        .iter()
        .flat_map(|g| self.get(*g).iter().map(String::as_str))
        .collect()
    }
}

/// A line that carried a marker but no extractable label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationMiss {
    /// 1-based line number in the source text.
    pub line: usize,
    pub group: TaskGroup,
}

/// Full result of a classification pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    pub groups: TaskGroups,
    pub misses: Vec<ClassificationMiss>,
}

/// Classify `source` into task groups, dropping unusable lines.
pub fn classify(source: &str) -> TaskGroups {
    scan(source).groups
}

/// Classify `source` and also report which marker lines were dropped.
pub fn scan(source: &str) -> Scan {
    let mut result = Scan::default();

    for (idx, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        let Some(group) = markers::match_marker(trimmed) else {
            continue;
        };

        match markers::extract_label(trimmed) {
            Some(label) => result.groups.get_mut(group).push(label.to_string()),
            None => {
                debug!(line = idx + 1, %group, "marker without a quoted label; dropping line");
                result.misses.push(ClassificationMiss {
                    line: idx + 1,
                    group,
                });
            }
        }
    }

    debug!(
        sync = result.groups.sync.len(),
        timer = result.groups.timer.len(),
        immediate = result.groups.immediate.len(),
        next_tick = result.groups.priority_micro.len(),
        promise = result.groups.secondary_micro.len(),
        misses = result.misses.len(),
        "classified source"
    );

    result
}

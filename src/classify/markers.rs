// src/classify/markers.rs

//! The finite marker table the classifier scans each line against.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::TaskGroup;

/// Quoted argument of a `console.log('...')` / `console.log("...")` call.
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"console\.log\(['"](.+?)['"]\)"#).expect("label pattern is a valid regex")
});

/// How a marker is recognised on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerMatch {
    /// The trimmed line starts with the needle.
    Prefix(&'static str),
    /// The needle appears anywhere on the line.
    Contains(&'static str),
}

impl MarkerMatch {
    pub fn matches(&self, trimmed: &str) -> bool {
        match self {
            MarkerMatch::Prefix(needle) => trimmed.starts_with(needle),
            MarkerMatch::Contains(needle) => trimmed.contains(needle),
        }
    }
}

/// One entry of the marker table.
#[derive(Debug, Clone, Copy)]
pub struct Marker {
    pub pattern: MarkerMatch,
    pub group: TaskGroup,
}

/// Markers in priority order. The first one that matches a line decides
/// its group; a line never belongs to two groups.
pub const MARKERS: [Marker; 5] = [
    Marker {
        pattern: MarkerMatch::Prefix("console.log"),
        group: TaskGroup::Sync,
    },
    Marker {
        pattern: MarkerMatch::Contains("setTimeout"),
        group: TaskGroup::Timer,
    },
    Marker {
        pattern: MarkerMatch::Contains("setImmediate"),
        group: TaskGroup::Immediate,
    },
    Marker {
        pattern: MarkerMatch::Contains("process.nextTick"),
        group: TaskGroup::PriorityMicro,
    },
    Marker {
        pattern: MarkerMatch::Contains("Promise.resolve()"),
        group: TaskGroup::SecondaryMicro,
    },
];

/// Find the group of the first marker present on `trimmed`, if any.
pub fn match_marker(trimmed: &str) -> Option<TaskGroup> {
    MARKERS
        .iter()
        .find(|m| m.pattern.matches(trimmed))
        .map(|m| m.group)
}

/// Extract the first quoted `console.log` label on the line.
pub fn extract_label(line: &str) -> Option<&str> {
    LABEL_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

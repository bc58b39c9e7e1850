// src/event/history.rs

//! Shared, append-only view of a run's events.
//!
//! [`EventHistory`] is a persistent list: every push adds one link in front
//! of the previous ones, and clones share all earlier links. Taking a
//! snapshot after each transition therefore costs one pointer copy rather
//! than a copy of every event so far. Readers that only need what is new
//! walk back from the newest link.

use std::fmt;
use std::sync::Arc;

use super::Event;

struct Link {
    event: Event,
    prev: Option<Arc<Link>>,
}

#[derive(Clone, Default)]
pub struct EventHistory {
    head: Option<Arc<Link>>,
    len: usize,
}

impl EventHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        let prev = self.head.take();
        self.head = Some(Arc::new(Link { event, prev }));
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The newest event.
    pub fn last(&self) -> Option<&Event> {
        self.head.as_deref().map(|link| &link.event)
    }

    /// Newest first.
    fn links(&self) -> impl Iterator<Item = &Link> {
        std::iter::successors(self.head.as_deref(), |link| link.prev.as_deref())
    }

    /// The newest `n` events, oldest first.
    pub fn latest(&self, n: usize) -> Vec<&Event> {
        let mut tail: Vec<&Event> = self.links().take(n).map(|l| &l.event).collect();
        tail.reverse();
        tail
    }

    /// Every event, oldest first.
    pub fn to_vec(&self) -> Vec<Event> {
        self.latest(self.len).into_iter().cloned().collect()
    }

    /// Whether `self` was built by pushing onto `earlier`, sharing its links.
    pub fn extends(&self, earlier: &EventHistory) -> bool {
        let Some(skip) = self.len.checked_sub(earlier.len) else {
            return false;
        };
        let mut cur = self.head.as_ref();
        for _ in 0..skip {
            cur = cur.and_then(|link| link.prev.as_ref());
        }
        match (cur, earlier.head.as_ref()) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl PartialEq for EventHistory {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && (self.extends(other)
                || self
                    .links()
                    .zip(other.links())
                    .all(|(a, b)| a.event == b.event))
    }
}

impl Eq for EventHistory {}

impl PartialEq<[Event]> for EventHistory {
    fn eq(&self, other: &[Event]) -> bool {
        self.len == other.len()
            && self
                .links()
                .zip(other.iter().rev())
                .all(|(l, e)| l.event == *e)
    }
}

impl fmt::Debug for EventHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.latest(self.len)).finish()
    }
}

// Unlink iteratively; the default recursive drop can overflow the stack on
// long histories.
impl Drop for EventHistory {
    fn drop(&mut self) {
        let mut cur = self.head.take();
        while let Some(link) = cur {
            match Arc::try_unwrap(link) {
                Ok(mut owned) => cur = owned.prev.take(),
                Err(_) => break,
            }
        }
    }
}

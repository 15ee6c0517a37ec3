//! Bounded undo stack.
//!
//! Backed by a `VecDeque` so the newest entry pops from the back while the
//! oldest is evicted from the front once the depth limit is exceeded.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use crate::consts::HISTORY_DEPTH;
use crate::state::Snapshot;

#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Snapshot>,
    depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_depth(HISTORY_DEPTH)
    }
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack retaining at most `depth` snapshots.
    #[must_use]
    pub fn with_depth(depth: usize) -> Self {
        Self { entries: VecDeque::with_capacity(depth.saturating_add(1)), depth }
    }

    /// Record a pre-mutation snapshot, evicting the oldest when full.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.push_back(snapshot);
        while self.entries.len() > self.depth {
            self.entries.pop_front();
        }
    }

    /// Remove and return the most recent snapshot.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }
}

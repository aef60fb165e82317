use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Search counters shared by every worker.
#[derive(Debug, Default)]
pub struct SearchStats {
    states_processed: AtomicU64,
    goals: AtomicU64,
    dead_states: AtomicU64,
    children_generated: AtomicU64,
    states_discarded: AtomicU64,
}

/// Point-in-time copy of [`SearchStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// States classified, root included.
    pub states_processed: u64,
    /// States classified as goals.
    pub goals: u64,
    /// States pruned as dead.
    pub dead_states: u64,
    /// Children pushed to the frontier.
    pub children_generated: u64,
    /// Pending states dropped unprocessed because the search stopped.
    pub states_discarded: u64,
}

impl SearchStats {
    /// Create zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_goal(&self) {
        self.states_processed.fetch_add(1, Ordering::Relaxed);
        self.goals.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dead(&self) {
        self.states_processed.fetch_add(1, Ordering::Relaxed);
        self.dead_states.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_expanded(&self, children: usize) {
        self.states_processed.fetch_add(1, Ordering::Relaxed);
        self.children_generated
            .fetch_add(children as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_discarded(&self, count: usize) {
        self.states_discarded
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Read the counters. Exact once the search has terminated.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            states_processed: self.states_processed.load(Ordering::Relaxed),
            goals: self.goals.load(Ordering::Relaxed),
            dead_states: self.dead_states.load(Ordering::Relaxed),
            children_generated: self.children_generated.load(Ordering::Relaxed),
            states_discarded: self.states_discarded.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_records() {
        let stats = SearchStats::new();
        stats.record_expanded(3);
        stats.record_goal();
        stats.record_dead();
        stats.record_goal();
        stats.record_discarded(4);

        let snap = stats.snapshot();
        assert_eq!(snap.states_processed, 4);
        assert_eq!(snap.goals, 2);
        assert_eq!(snap.dead_states, 1);
        assert_eq!(snap.children_generated, 3);
        assert_eq!(snap.states_discarded, 4);
    }
}

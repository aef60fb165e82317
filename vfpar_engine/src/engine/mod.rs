//! Matching engines: the parallel scheduler and its sequential reference.

mod expand;
mod parallel;
mod sequential;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use parallel::ParallelMatchingEngine;
pub use sequential::SequentialMatchingEngine;

use crate::error::EngineError;
use crate::lifecycle::EnginePhase;
use crate::state::MatchState;
use crate::stats::StatsSnapshot;

/// How a completed search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    /// Every reachable state was processed.
    Exhausted,
    /// A visitor asked to stop; pending states were discarded.
    Stopped,
}

impl SearchOutcome {
    /// True if the whole search tree was explored.
    #[must_use]
    pub const fn is_exhausted(self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

/// Common surface of the matching engines.
///
/// Engines are single-use: `find_all_matchings` succeeds once per engine.
pub trait MatchingEngine<S: MatchState> {
    /// Enumerate every matching reachable from `root`, blocking until done.
    ///
    /// `root` stays owned by the caller and is never dropped by the engine.
    ///
    /// # Errors
    /// [`EngineError::AlreadyRun`] on a second call, or a panic report if
    /// expanding a state panicked.
    fn find_all_matchings(&self, root: &S) -> Result<SearchOutcome, EngineError>;

    /// Number of goals found so far. Safe to poll while a search runs.
    fn solutions_count(&self) -> usize;

    /// Persisted solutions (empty unless `store_solutions` is enabled).
    fn solutions(&self) -> Vec<S::Solution>
    where
        S::Solution: Clone;

    /// Time from search start to the first goal, if one was found.
    fn first_solution_time(&self) -> Option<Duration>;

    /// Current search counters.
    fn stats(&self) -> StatsSnapshot;

    /// Current lifecycle phase.
    fn phase(&self) -> EnginePhase;
}

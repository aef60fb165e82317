//! Single-threaded engine over a local stack.
//!
//! Processes states in the same LIFO order a one-worker parallel run would,
//! without any locking. Useful as a reference and for small searches where
//! spawning threads costs more than it saves. A panicking state unwinds
//! straight into the caller, and the engine still ends up `Terminated`.

use std::time::{Duration, Instant};

use tracing::info;

use super::expand::{Classification, SearchCore};
use super::{MatchingEngine, SearchOutcome};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::lifecycle::{EnginePhase, PhaseCell};
use crate::state::MatchState;
use crate::stats::StatsSnapshot;

/// Sequential enumerator of all matchings reachable from a root state.
pub struct SequentialMatchingEngine<S: MatchState> {
    core: SearchCore<S>,
    phase: PhaseCell,
}

impl<S: MatchState> SequentialMatchingEngine<S> {
    /// Create an idle engine. `num_threads` and `cpu` are ignored.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidConfig`] if `config` does not validate.
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            core: SearchCore::new(config.store_solutions),
            phase: PhaseCell::new(),
        })
    }

    /// Install a per-goal visitor. Returning `true` from it stops the search.
    #[must_use]
    pub fn with_visitor(mut self, visitor: impl Fn(&S) -> bool + Send + Sync + 'static) -> Self {
        self.core.set_visitor(Box::new(visitor));
        self
    }

    /// Search until the first goal and return its correspondence set.
    ///
    /// # Errors
    /// [`EngineError::AlreadyRun`] if the engine was already used.
    pub fn find_first_matching(&self, root: &S) -> Result<Option<S::Solution>, EngineError> {
        self.phase.begin()?;
        let _terminate = self.phase.terminate_on_drop();
        let mut first = None;
        self.run(root, |state| {
            first = Some(state.core_set());
            true
        });
        Ok(first)
    }

    /// Consume the engine and return the persisted solutions.
    #[must_use]
    pub fn into_solutions(self) -> Vec<S::Solution> {
        self.core.sink.into_solutions()
    }

    /// Depth-first drain of the tree below `root`.
    ///
    /// `on_goal` returning `true` ends the search early.
    fn run(&self, root: &S, mut on_goal: impl FnMut(&S) -> bool) -> SearchOutcome {
        let started = Instant::now();
        self.core.sink.mark_started();
        info!("starting sequential search");

        let mut stack: Vec<Box<S>> = Vec::new();
        let mut stopped = self.process(root, &mut stack, &mut on_goal);
        self.phase.advance(EnginePhase::Draining);

        while !stopped {
            let Some(state) = stack.pop() else {
                break;
            };
            stopped = self.process(&state, &mut stack, &mut on_goal);
        }

        if !stack.is_empty() {
            self.core.stats.record_discarded(stack.len());
        }
        let outcome = if stopped {
            SearchOutcome::Stopped
        } else {
            SearchOutcome::Exhausted
        };
        info!(
            solutions = self.core.sink.count(),
            elapsed = ?started.elapsed(),
            ?outcome,
            "sequential search finished"
        );
        outcome
    }

    /// Process one state; returns true if the search must stop.
    fn process(
        &self,
        state: &S,
        stack: &mut Vec<Box<S>>,
        on_goal: &mut impl FnMut(&S) -> bool,
    ) -> bool {
        let class = self.core.process_state(state, |child| stack.push(child));
        tracing::event!(tracing::Level::TRACE, ?class, "state processed");
        let halted_by_caller = class == Classification::Goal && on_goal(state);
        halted_by_caller || self.core.is_stopped()
    }
}

impl<S: MatchState> MatchingEngine<S> for SequentialMatchingEngine<S> {
    fn find_all_matchings(&self, root: &S) -> Result<SearchOutcome, EngineError> {
        self.phase.begin()?;
        let _terminate = self.phase.terminate_on_drop();
        Ok(self.run(root, |_| false))
    }

    fn solutions_count(&self) -> usize {
        self.core.sink.count()
    }

    fn solutions(&self) -> Vec<S::Solution>
    where
        S::Solution: Clone,
    {
        self.core.sink.solutions()
    }

    fn first_solution_time(&self) -> Option<Duration> {
        self.core.sink.first_solution_time()
    }

    fn stats(&self) -> StatsSnapshot {
        self.core.stats.snapshot()
    }

    fn phase(&self) -> EnginePhase {
        self.phase.get()
    }
}

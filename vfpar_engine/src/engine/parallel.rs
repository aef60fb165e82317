//! Fixed-size worker pool over a shared frontier.
//!
//! The calling thread expands the root, then `num_threads` scoped workers pull
//! states from the frontier until it is empty and nobody is still expanding.
//! There is no coordinator thread: each worker decides on its own when the
//! search is exhausted (see [`crate::frontier`] for why that is sound).

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::expand::SearchCore;
use super::{MatchingEngine, SearchOutcome};
use crate::affinity::pin_current_thread;
use crate::config::EngineConfig;
use crate::error::{EngineError, panic_message};
use crate::frontier::Frontier;
use crate::lifecycle::{EnginePhase, PhaseCell};
use crate::state::MatchState;
use crate::stats::StatsSnapshot;

/// First panic observed by a worker.
#[derive(Debug)]
struct WorkerFault {
    worker: usize,
    message: String,
}

/// Parallel enumerator of all matchings reachable from a root state.
///
/// ```
/// use vfpar_engine::{EngineConfig, MatchState, MatchingEngine, ParallelMatchingEngine};
///
/// /// Choose 2 of 4 items, in increasing order.
/// #[derive(Clone)]
/// struct Pick(Vec<u8>);
///
/// impl MatchState for Pick {
///     type Pair = u8;
///     type Solution = Vec<u8>;
///     fn is_goal(&self) -> bool { self.0.len() == 2 }
///     fn is_dead(&self) -> bool { false }
///     fn next_pair(&self, prev: Option<u8>) -> Option<u8> {
///         let next = prev.map_or(0, |p| p + 1);
///         (next < 4).then_some(next)
///     }
///     fn is_feasible_pair(&self, item: u8) -> bool {
///         self.0.last().is_none_or(|&last| item > last)
///     }
///     fn add_pair(&mut self, item: u8) { self.0.push(item) }
///     fn core_set(&self) -> Vec<u8> { self.0.clone() }
/// }
///
/// let engine = ParallelMatchingEngine::new(EngineConfig::new(4)).unwrap();
/// engine.find_all_matchings(&Pick(Vec::new())).unwrap();
/// assert_eq!(engine.solutions_count(), 6);
/// ```
pub struct ParallelMatchingEngine<S: MatchState> {
    config: EngineConfig,
    core: SearchCore<S>,
    frontier: Frontier<S>,
    phase: PhaseCell,
    fault: Mutex<Option<WorkerFault>>,
}

impl<S: MatchState> ParallelMatchingEngine<S> {
    /// Create an idle engine.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidConfig`] if `config` does not validate.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            core: SearchCore::new(config.store_solutions),
            config,
            frontier: Frontier::new(),
            phase: PhaseCell::new(),
            fault: Mutex::new(None),
        })
    }

    /// Install a per-goal visitor. Returning `true` from it stops the search.
    #[must_use]
    pub fn with_visitor(mut self, visitor: impl Fn(&S) -> bool + Send + Sync + 'static) -> Self {
        self.core.set_visitor(Box::new(visitor));
        self
    }

    /// Number of workers this engine runs.
    #[must_use]
    pub const fn thread_count(&self) -> usize {
        self.config.num_threads
    }

    /// The configuration the engine was built with.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of states waiting in the frontier.
    #[must_use]
    pub fn remaining_states(&self) -> usize {
        self.frontier.len()
    }

    /// Consume the engine and return the persisted solutions.
    #[must_use]
    pub fn into_solutions(self) -> Vec<S::Solution> {
        self.core.sink.into_solutions()
    }

    fn run(&self, root: &S) -> Result<SearchOutcome, EngineError> {
        let started = Instant::now();
        self.core.sink.mark_started();
        info!(
            threads = self.config.num_threads,
            store_solutions = self.config.store_solutions,
            cpu = ?self.config.cpu,
            "starting parallel search"
        );

        let root_result = catch_unwind(AssertUnwindSafe(|| {
            self.core
                .process_state(root, |child| self.frontier.push(child))
        }));
        if let Err(payload) = root_result {
            self.discard_pending();
            return Err(EngineError::RootPanicked(panic_message(payload.as_ref())));
        }

        self.start_pool();

        debug_assert!(self.core.is_stopped() || self.frontier.is_idle());
        self.discard_pending();

        let fault = self
            .fault
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(WorkerFault { worker, message }) = fault {
            return Err(EngineError::WorkerPanicked { worker, message });
        }

        let outcome = if self.core.is_stopped() {
            SearchOutcome::Stopped
        } else {
            SearchOutcome::Exhausted
        };
        info!(
            solutions = self.core.sink.count(),
            elapsed = ?started.elapsed(),
            ?outcome,
            "parallel search finished"
        );
        Ok(outcome)
    }

    fn discard_pending(&self) {
        let dropped = self.frontier.discard();
        if dropped > 0 {
            debug!(dropped, "discarding unprocessed states");
            self.core.stats.record_discarded(dropped);
        }
    }

    /// Spawn the workers and block until every one of them has exited.
    fn start_pool(&self) {
        std::thread::scope(|scope| {
            for worker in 0..self.config.num_threads {
                scope.spawn(move || self.run_worker(worker));
            }
            self.phase.advance(EnginePhase::Draining);
        });
    }

    fn run_worker(&self, worker: usize) {
        if let Some(cpu) = self.config.pin_target(worker) {
            match pin_current_thread(cpu) {
                Ok(()) => debug!(worker, cpu, "worker pinned"),
                Err(err) => warn!(worker, cpu, %err, "could not pin worker; running unpinned"),
            }
        }
        debug!(worker, "worker started");

        let mut processed = 0_u64;
        let mut current: Option<Box<S>> = None;
        loop {
            if let Some(state) = current.take() {
                let result = catch_unwind(AssertUnwindSafe(|| {
                    self.core
                        .process_state(&state, |child| self.frontier.push(child))
                }));
                drop(state);
                self.frontier.release();
                processed += 1;

                match result {
                    Ok(class) => {
                        tracing::event!(tracing::Level::TRACE, worker, ?class, "state processed");
                    }
                    Err(payload) => self.record_fault(worker, panic_message(payload.as_ref())),
                }
            }

            if self.core.is_stopped() {
                break;
            }

            current = self.frontier.pop();
            if current.is_none() {
                if self.frontier.active_workers() == 0 {
                    break;
                }
                std::hint::spin_loop();
            }
        }

        debug!(worker, processed, "worker exiting");
    }

    fn record_fault(&self, worker: usize, message: String) {
        warn!(worker, %message, "worker panicked; stopping search");
        let mut slot = self.fault.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(WorkerFault { worker, message });
        }
        drop(slot);
        self.core.request_stop();
    }
}

impl<S: MatchState> MatchingEngine<S> for ParallelMatchingEngine<S> {
    fn find_all_matchings(&self, root: &S) -> Result<SearchOutcome, EngineError> {
        self.phase.begin()?;
        let result = self.run(root);
        self.phase.advance(EnginePhase::Terminated);
        result
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

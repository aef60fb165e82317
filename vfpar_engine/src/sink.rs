//! Solution counter and optional solution log.
//!
//! The counter is a lock-free atomic so progress can be polled mid-search. The
//! log has its own mutex, separate from the frontier lock, so storing
//! solutions never serializes expansion.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::{Duration, Instant};

/// Aggregates solutions discovered by any number of threads.
#[derive(Debug)]
pub struct SolutionSink<T> {
    count: AtomicUsize,
    log: Option<Mutex<Vec<T>>>,
    started: OnceLock<Instant>,
    first_solution: OnceLock<Duration>,
}

impl<T> SolutionSink<T> {
    /// Create a sink. With `store_solutions` every recorded solution is kept.
    #[must_use]
    pub fn new(store_solutions: bool) -> Self {
        Self {
            count: AtomicUsize::new(0),
            log: store_solutions.then(|| Mutex::new(Vec::new())),
            started: OnceLock::new(),
            first_solution: OnceLock::new(),
        }
    }

    /// Whether solutions are persisted or only counted.
    #[must_use]
    pub const fn stores_solutions(&self) -> bool {
        self.log.is_some()
    }

    /// Mark the start of the search; the first-solution time is relative to it.
    pub fn mark_started(&self) {
        let _ = self.started.set(Instant::now());
    }

    fn lock_log(log: &Mutex<Vec<T>>) -> MutexGuard<'_, Vec<T>> {
        log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record one goal.
    ///
    /// The counter is bumped unconditionally. `extract` runs only when the
    /// log is enabled, under the log lock.
    pub fn record(&self, extract: impl FnOnce() -> T) {
        self.count.fetch_add(1, Ordering::SeqCst);
        if let Some(start) = self.started.get() {
            self.first_solution.get_or_init(|| start.elapsed());
        }
        if let Some(log) = &self.log {
            let mut guard = Self::lock_log(log);
            guard.push(extract());
        }
    }

    /// Number of goals recorded so far. Monotonic.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Time from [`SolutionSink::mark_started`] to the first recorded goal.
    #[must_use]
    pub fn first_solution_time(&self) -> Option<Duration> {
        self.first_solution.get().copied()
    }

    /// Number of persisted solutions (zero when the log is disabled).
    #[must_use]
    pub fn stored_len(&self) -> usize {
        self.log.as_ref().map_or(0, |log| Self::lock_log(log).len())
    }

    /// Copy of the persisted solutions, in discovery order.
    #[must_use]
    pub fn solutions(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.log
            .as_ref()
            .map(|log| Self::lock_log(log).clone())
            .unwrap_or_default()
    }

    /// Consume the sink and return the persisted solutions.
    #[must_use]
    pub fn into_solutions(self) -> Vec<T> {
        self.log
            .map(|log| log.into_inner().unwrap_or_else(PoisonError::into_inner))
            .unwrap_or_default()
    }
}

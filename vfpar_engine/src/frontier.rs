//! Shared LIFO of pending states plus the active-worker counter.
//!
//! The frontier owns every pending child state. A pop moves the `Box` out to
//! exactly one worker and bumps the active counter inside the same critical
//! section, so a state is never visible in the frontier and uncounted at the
//! same time. Workers call [`Frontier::release`] only after they have pushed
//! every child of the state they were holding. Exhaustion is therefore exactly
//! "frontier empty and no active worker".

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Mutex-protected stack of uniquely owned states.
#[derive(Debug)]
pub struct Frontier<S> {
    stack: Mutex<Vec<Box<S>>>,
    active: AtomicUsize,
}

impl<S> Frontier<S> {
    /// Create an empty frontier with no active workers.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stack: Mutex::new(Vec::new()),
            active: AtomicUsize::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Box<S>>> {
        // A panicking state never runs while the lock is held.
        self.stack.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hand ownership of `state` to the frontier.
    pub fn push(&self, state: Box<S>) {
        self.lock().push(state);
    }

    /// Take the most recently pushed state, counting the caller as active.
    ///
    /// Never blocks waiting for work; returns `None` when empty.
    #[must_use]
    pub fn pop(&self) -> Option<Box<S>> {
        let mut stack = self.lock();
        let state = stack.pop()?;
        self.active.fetch_add(1, Ordering::SeqCst);
        Some(state)
    }

    /// Give back the active credit taken by a successful [`Frontier::pop`].
    ///
    /// Must be called only after every child of the popped state was pushed.
    pub fn release(&self) {
        let prev = self.active.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(prev > 0, "release without a matching pop");
    }

    /// Number of workers currently holding a popped state.
    #[must_use]
    pub fn active_workers(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Number of pending states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if no state is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// True if nothing is pending and no worker holds a state: the search is
    /// exhausted.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        let stack = self.lock();
        stack.is_empty() && self.active.load(Ordering::SeqCst) == 0
    }

    /// Drop every pending state and return how many were dropped.
    ///
    /// Used after a stopped search; an exhausted search leaves nothing behind.
    #[contracts::debug_ensures(self.is_empty())]
    pub fn discard(&self) -> usize {
        let drained: Vec<Box<S>> = std::mem::take(&mut *self.lock());
        drained.len()
    }
}

impl<S> Default for Frontier<S> {
    fn default() -> Self {
        Self::new()
    }
}

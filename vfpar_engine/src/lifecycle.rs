//! Single-use engine lifecycle.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Phase of a matching engine.
///
/// Engines move strictly forward: `Idle -> Running -> Draining -> Terminated`.
/// There is no transition back to `Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EnginePhase {
    /// Constructed, never run.
    Idle = 0,
    /// Root being expanded and workers being started.
    Running = 1,
    /// Workers racing to exhaustion.
    Draining = 2,
    /// All workers joined; results are final.
    Terminated = 3,
}

impl EnginePhase {
    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Idle,
            1 => Self::Running,
            2 => Self::Draining,
            _ => Self::Terminated,
        }
    }
}

impl fmt::Display for EnginePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "Idle",
            Self::Running => "Running",
            Self::Draining => "Draining",
            Self::Terminated => "Terminated",
        };
        f.write_str(name)
    }
}

/// Atomic holder for an [`EnginePhase`], readable from any thread.
#[derive(Debug)]
pub(crate) struct PhaseCell(AtomicU8);

impl PhaseCell {
    pub(crate) const fn new() -> Self {
        Self(AtomicU8::new(EnginePhase::Idle as u8))
    }

    pub(crate) fn get(&self) -> EnginePhase {
        EnginePhase::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Claim the engine for a run. Only the first caller wins.
    pub(crate) fn begin(&self) -> Result<(), EngineError> {
        self.0
            .compare_exchange(
                EnginePhase::Idle as u8,
                EnginePhase::Running as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(|_| ())
            .map_err(|current| EngineError::AlreadyRun(EnginePhase::from_u8(current)))
    }

    pub(crate) fn advance(&self, phase: EnginePhase) {
        debug_assert!(phase >= self.get());
        self.0.store(phase as u8, Ordering::Release);
    }

    /// Guard that moves the cell to `Terminated` when dropped, unwinding included.
    pub(crate) const fn terminate_on_drop(&self) -> TerminateOnDrop<'_> {
        TerminateOnDrop(self)
    }
}

/// See [`PhaseCell::terminate_on_drop`].
#[derive(Debug)]
pub(crate) struct TerminateOnDrop<'a>(&'a PhaseCell);

impl Drop for TerminateOnDrop<'_> {
    fn drop(&mut self) {
        self.0.advance(EnginePhase::Terminated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_only_once() {
        let cell = PhaseCell::new();
        assert_eq!(cell.get(), EnginePhase::Idle);
        assert!(cell.begin().is_ok());
        assert_eq!(cell.get(), EnginePhase::Running);

        let err = cell.begin().unwrap_err();
        assert!(matches!(err, EngineError::AlreadyRun(EnginePhase::Running)));
    }

    #[test]
    fn guard_terminates_on_unwind() {
        let cell = PhaseCell::new();
        cell.begin().unwrap();
        let result = std::panic::catch_unwind(|| {
            let _terminate = cell.terminate_on_drop();
            cell.advance(EnginePhase::Draining);
            panic!("boom");
        });
        assert!(result.is_err());
        assert_eq!(cell.get(), EnginePhase::Terminated);
    }

    #[test]
    fn phases_are_ordered() {
        assert!(EnginePhase::Idle < EnginePhase::Running);
        assert!(EnginePhase::Running < EnginePhase::Draining);
        assert!(EnginePhase::Draining < EnginePhase::Terminated);
    }
}

//! Error types for engine configuration and execution.
//!
//! Errors are raised either before the search starts (bad configuration, a
//! reused engine) or after every worker has been joined (a state panicked).
//! Nothing is reported from inside the worker loop itself.

use thiserror::Error;

use crate::lifecycle::EnginePhase;

/// Errors returned by the matching engines.
#[derive(Debug, Error)]
pub enum EngineError {
    // === Preparation phase errors (before search) ===
    /// The configuration cannot be used to run a search.
    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),

    /// A configuration file could not be read.
    #[error("Failed to read engine configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// A configuration document could not be parsed.
    #[error("Failed to parse engine configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The engine is single-use and has already been started.
    #[error("Engine already started (phase: {0}); create a new engine for each search")]
    AlreadyRun(EnginePhase),

    // === Execution phase errors (reported after all workers are joined) ===
    /// Expanding the caller's root state panicked.
    #[error("Root state panicked during expansion: {0}")]
    RootPanicked(String),

    /// A worker panicked while expanding a state; the search was stopped.
    #[error("Worker {worker} panicked during expansion: {message}")]
    WorkerPanicked {
        /// Index of the first worker that faulted.
        worker: usize,
        /// Panic payload rendered as text.
        message: String,
    },
}

impl EngineError {
    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Reasons a worker thread could not be pinned to a CPU.
///
/// Pinning is best effort: these are logged and the worker runs unpinned.
#[derive(Debug, Error)]
pub enum AffinityError {
    /// The CPU index does not fit in the platform's affinity mask.
    #[error("CPU index {cpu} is outside the affinity mask (max {max})")]
    OutOfRange {
        /// Requested CPU index.
        cpu: usize,
        /// Number of CPUs representable in the mask.
        max: usize,
    },

    /// The operating system rejected the affinity request.
    #[error("Failed to pin thread to CPU {cpu}: {source}")]
    Os {
        /// Requested CPU index.
        cpu: usize,
        /// Error reported by the OS.
        #[source]
        source: std::io::Error,
    },

    /// This platform has no thread pinning support.
    #[error("Thread pinning is not supported on this platform")]
    Unsupported,
}

/// Render a panic payload the way `std` prints it.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

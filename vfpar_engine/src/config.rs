//! Configuration for the matching engines.
//!
//! This module exposes a small, stable surface for consumers (for example the
//! `vfpar` CLI) to parameterize a search.
//!
//! The main knobs are:
//! - num_threads: how many workers the parallel engine spawns.
//! - store_solutions: whether every solution is kept, or only counted.
//! - cpu: the first CPU index workers are pinned to, if any.
//!
//! Quick examples
//!
//! Four workers, counter-only (the default storage mode):
//! ```
//! use vfpar_engine::EngineConfig;
//! let cfg = EngineConfig::builder().num_threads(4).build();
//! assert!(!cfg.store_solutions);
//! ```
//!
//! Eight workers pinned to CPUs 2..10, keeping every solution:
//! ```
//! use vfpar_engine::EngineConfig;
//! let cfg = EngineConfig::builder()
//!     .num_threads(8)
//!     .store_solutions(true)
//!     .pin_from(2)
//!     .build();
//! assert_eq!(cfg.pin_target(3), Some(5));
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Global engine configuration.
///
/// - num_threads: number of workers started by the parallel engine. Must be
///   greater than zero. The sequential engine ignores it.
/// - store_solutions:
///     - true  => every goal's correspondence set is appended to the solution log.
///     - false => goals are only counted.
/// - cpu:
///     - Some(base) => worker `i` is pinned to CPU `base + i` (best effort).
///     - None       => workers are left to the OS scheduler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of worker threads.
    pub num_threads: usize,
    /// Whether to persist solutions or only count them.
    pub store_solutions: bool,
    /// Base CPU index for worker pinning, or `None` to disable pinning.
    pub cpu: Option<usize>,
}

impl EngineConfig {
    /// Create a configuration with `num_threads` workers and defaults otherwise.
    #[must_use]
    pub fn new(num_threads: usize) -> Self {
        Self {
            num_threads,
            ..Self::default()
        }
    }

    /// Start building a configuration.
    #[must_use]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Check that the configuration can run a search.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidConfig`] if `num_threads` is zero or the
    /// pinning range would overflow.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.num_threads == 0 {
            return Err(EngineError::invalid_config(
                "num_threads must be greater than zero",
            ));
        }
        match self.cpu {
            Some(base) if base.checked_add(self.num_threads).is_none() => {
                Err(EngineError::invalid_config(format!(
                    "cpu base {base} + {} workers overflows",
                    self.num_threads
                )))
            }
            _ => Ok(()),
        }
    }

    /// CPU that worker `worker` should be pinned to, if pinning is enabled.
    #[must_use]
    pub fn pin_target(&self, worker: usize) -> Option<usize> {
        self.cpu.map(|base| base + worker)
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`EngineError::ConfigParse`] on malformed JSON and
    /// [`EngineError::InvalidConfig`] if the result does not validate.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    ///
    /// # Errors
    /// Returns [`EngineError::ConfigIo`] if the file cannot be read, otherwise
    /// the same errors as [`EngineConfig::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

impl Default for EngineConfig {
    /// One worker, counter-only, no pinning.
    fn default() -> Self {
        Self {
            num_threads: 1,
            store_solutions: false,
            cpu: None,
        }
    }
}

/// Builder for [`EngineConfig`].
#[derive(Clone, Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Set the number of workers.
    #[must_use]
    pub const fn num_threads(mut self, num_threads: usize) -> Self {
        self.config.num_threads = num_threads;
        self
    }

    /// Keep every solution instead of only counting them.
    #[must_use]
    pub const fn store_solutions(mut self, store: bool) -> Self {
        self.config.store_solutions = store;
        self
    }

    /// Pin worker `i` to CPU `base + i`.
    #[must_use]
    pub const fn pin_from(mut self, base: usize) -> Self {
        self.config.cpu = Some(base);
        self
    }

    /// Leave workers unpinned.
    #[must_use]
    pub const fn no_pinning(mut self) -> Self {
        self.config.cpu = None;
        self
    }

    /// Finish building. Validation happens when an engine is created.
    #[must_use]
    pub fn build(self) -> EngineConfig {
        self.config
    }
}

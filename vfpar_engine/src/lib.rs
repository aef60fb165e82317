//! Concurrent scheduling core for subgraph and graph isomorphism search.
//!
//! A search explores a tree of partial-matching states. The caller hands the
//! engine a root [`MatchState`]; the engine expands it on the calling thread,
//! then a fixed pool of workers pulls pending states from a shared LIFO
//! [`Frontier`], expands them and pushes their children back, until the
//! frontier is empty and no worker is still expanding. Goals are counted in a
//! lock-free counter and, optionally, kept in a separately locked log.
//!
//! The matching logic itself (which pairs are candidates, which are feasible,
//! when a state is complete) lives behind the [`MatchState`] trait. See the
//! `vfpar_graph` crate for a VF2 implementation over labelled graphs.

pub mod affinity;
mod config;
mod engine;
mod error;
pub mod frontier;
mod lifecycle;
pub mod sink;
mod state;
mod stats;

pub use crate::config::{EngineConfig, EngineConfigBuilder};
pub use crate::engine::{
    MatchingEngine, ParallelMatchingEngine, SearchOutcome, SequentialMatchingEngine,
};
pub use crate::error::{AffinityError, EngineError};
pub use crate::frontier::Frontier;
pub use crate::lifecycle::EnginePhase;
pub use crate::sink::SolutionSink;
pub use crate::state::{MatchState, Visitor};
pub use crate::stats::{SearchStats, StatsSnapshot};

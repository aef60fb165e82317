//! Labelled graphs, the grf file format, and a VF2 matching state for the
//! `vfpar_engine` schedulers.
//!
//! ```
//! use vfpar_engine::{EngineConfig, MatchingEngine, ParallelMatchingEngine};
//! use vfpar_graph::{Vf2State, parse_grf};
//!
//! // an undirected edge, and a triangle
//! let pattern = parse_grf("2\n0 0\n1 0\n1\n0 1\n1\n1 0\n").unwrap();
//! let target = parse_grf("3\n0 0\n1 0\n2 0\n2\n0 1\n0 2\n2\n1 0\n1 2\n2\n2 0\n2 1\n").unwrap();
//!
//! let engine = ParallelMatchingEngine::new(EngineConfig::new(2)).unwrap();
//! engine.find_all_matchings(&Vf2State::new(&pattern, &target)).unwrap();
//! assert_eq!(engine.solutions_count(), 6);
//! ```

mod error;
mod graph;
mod grf;
mod solution;
mod vf2;

pub use crate::error::{GraphError, GrfError};
pub use crate::graph::{Graph, GraphBuilder, Label, NodeId};
pub use crate::grf::{parse_grf, read_grf, to_grf_string, write_grf};
pub use crate::solution::{CoreSet, NodePair};
pub use crate::vf2::Vf2State;

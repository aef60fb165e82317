//! Error types for graph construction and grf I/O.

use thiserror::Error;

use crate::graph::NodeId;

/// Errors raised while building a [`crate::Graph`].
#[derive(Debug, Error)]
pub enum GraphError {
    /// An edge refers to a node that was never added.
    #[error("Node {node} does not exist (graph has {node_count} nodes)")]
    UnknownNode {
        /// The offending endpoint.
        node: NodeId,
        /// Number of nodes added so far.
        node_count: usize,
    },

    /// The graph has more nodes than a [`NodeId`] can address.
    #[error("Node index {0} does not fit in a node id")]
    TooManyNodes(usize),
}

/// Errors raised while reading or writing grf files.
///
/// Line numbers are 1-based and refer to the physical line in the input,
/// comments and blank lines included.
#[derive(Debug, Error)]
pub enum GrfError {
    /// Reading or writing the underlying file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input ended before the graph was complete.
    #[error("Unexpected end of input at line {line}: expected {expected}")]
    UnexpectedEof {
        /// Last line read.
        line: usize,
        /// What the parser was looking for.
        expected: &'static str,
    },

    /// A record does not have the expected shape.
    #[error("Line {line}: expected {expected}, found `{found}`")]
    Malformed {
        /// Line of the record.
        line: usize,
        /// What the parser was looking for.
        expected: &'static str,
        /// The record as written.
        found: String,
    },

    /// Node records must be numbered 0, 1, 2, ... in order.
    #[error("Line {line}: expected node {expected}, found node {found}")]
    NodeOutOfOrder {
        /// Line of the record.
        line: usize,
        /// Id the parser expected next.
        expected: usize,
        /// Id found in the file.
        found: usize,
    },

    /// The graph described by the file is invalid.
    #[error("Line {line}: {source}")]
    Graph {
        /// Line of the record.
        line: usize,
        /// What was wrong with it.
        #[source]
        source: GraphError,
    },

    /// Records follow the last edge list.
    #[error("Line {line}: unexpected data after the last edge list")]
    TrailingData {
        /// First extra line.
        line: usize,
    },
}

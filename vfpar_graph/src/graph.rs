use std::fmt;

use contracts::*;
use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Node label. Two nodes are compatible iff their labels are equal.
pub type Label = u32;

/// Index of a node inside one [`Graph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId {
    /// The underlying raw integer index.
    inner: u32,
}

impl NodeId {
    /// Creates a node id from a raw integer.
    #[ensures(ret.inner == id)]
    pub const fn new(id: u32) -> Self {
        Self { inner: id }
    }

    /// Returns the id as a usize for array access.
    #[ensures(ret == self.inner as usize)]
    pub const fn as_usize(self) -> usize {
        self.inner as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<NodeId> for usize {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.as_usize()
    }
}

impl From<NodeId> for u32 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.inner
    }
}

impl TryFrom<usize> for NodeId {
    type Error = GraphError;

    fn try_from(id: usize) -> Result<Self, Self::Error> {
        u32::try_from(id)
            .map(Self::new)
            .map_err(|_| GraphError::TooManyNodes(id))
    }
}

/// Immutable node-labelled directed graph.
///
/// Adjacency lists are sorted and free of duplicates, so edge lookups are a
/// binary search. Undirected graphs are stored with both directions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    labels: Vec<Label>,
    out_adj: Vec<Vec<NodeId>>,
    in_adj: Vec<Vec<NodeId>>,
    edge_count: usize,
}

impl Graph {
    /// Start building a graph.
    #[must_use]
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Number of directed edges.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// True if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Every node id, in increasing order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.labels.len()).map(|i| NodeId::new(i as u32))
    }

    /// Label of `node`.
    #[must_use]
    pub fn label(&self, node: NodeId) -> Label {
        self.labels[node.as_usize()]
    }

    /// Successors of `node`, sorted.
    #[must_use]
    pub fn out_edges(&self, node: NodeId) -> &[NodeId] {
        &self.out_adj[node.as_usize()]
    }

    /// Predecessors of `node`, sorted.
    #[must_use]
    pub fn in_edges(&self, node: NodeId) -> &[NodeId] {
        &self.in_adj[node.as_usize()]
    }

    /// Number of successors of `node`.
    #[must_use]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.out_adj[node.as_usize()].len()
    }

    /// Number of predecessors of `node`.
    #[must_use]
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.in_adj[node.as_usize()].len()
    }

    /// True if the directed edge `from -> to` exists.
    #[must_use]
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.out_adj[from.as_usize()].binary_search(&to).is_ok()
    }

    /// Every directed edge, grouped by source in increasing order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes()
            .flat_map(move |from| self.out_edges(from).iter().map(move |&to| (from, to)))
    }
}

/// Incremental constructor for [`Graph`].
#[derive(Clone, Debug, Default)]
pub struct GraphBuilder {
    labels: Vec<Label>,
    edges: Vec<(NodeId, NodeId)>,
}

impl GraphBuilder {
    /// Add a node and return its id.
    ///
    /// # Errors
    /// [`GraphError::TooManyNodes`] once the id space is exhausted.
    pub fn add_node(&mut self, label: Label) -> Result<NodeId, GraphError> {
        let id = NodeId::try_from(self.labels.len())?;
        self.labels.push(label);
        Ok(id)
    }

    /// Add the directed edge `from -> to`. Repeated edges are merged.
    ///
    /// # Errors
    /// [`GraphError::UnknownNode`] if either endpoint was not added yet.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        self.check(from)?;
        self.check(to)?;
        self.edges.push((from, to));
        Ok(())
    }

    /// Add both `a -> b` and `b -> a`.
    ///
    /// # Errors
    /// [`GraphError::UnknownNode`] if either endpoint was not added yet.
    pub fn add_undirected_edge(&mut self, a: NodeId, b: NodeId) -> Result<(), GraphError> {
        self.add_edge(a, b)?;
        self.add_edge(b, a)
    }

    fn check(&self, node: NodeId) -> Result<(), GraphError> {
        if node.as_usize() < self.labels.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownNode {
                node,
                node_count: self.labels.len(),
            })
        }
    }

    /// Freeze the graph, sorting and deduplicating adjacency lists.
    #[must_use]
    #[debug_ensures(ret.out_adj.len() == ret.labels.len() && ret.in_adj.len() == ret.labels.len())]
    pub fn build(self) -> Graph {
        let n = self.labels.len();
        let mut out_adj = vec![Vec::new(); n];
        let mut in_adj = vec![Vec::new(); n];
        for &(from, to) in &self.edges {
            out_adj[from.as_usize()].push(to);
            in_adj[to.as_usize()].push(from);
        }
        for list in out_adj.iter_mut().chain(in_adj.iter_mut()) {
            list.sort_unstable();
            list.dedup();
        }
        let edge_count = out_adj.iter().map(Vec::len).sum();
        Graph {
            labels: self.labels,
            out_adj,
            in_adj,
            edge_count,
        }
    }
}

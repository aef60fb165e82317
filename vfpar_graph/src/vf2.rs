//! VF2-style state for induced subgraph isomorphism.
//!
//! Pattern nodes are matched in a fixed order computed once per search
//! (highest total degree first) and shared between every state through an
//! `Arc`. A state only stores the two partial core maps, so cloning it costs
//! two vector copies.

use std::cmp::Reverse;
use std::sync::Arc;

use contracts::*;
use itertools::Itertools;
use vfpar_engine::MatchState;

use crate::graph::{Graph, NodeId};
use crate::solution::{CoreSet, NodePair};

/// Partial induced mapping from a pattern graph into a target graph.
#[derive(Clone, Debug)]
pub struct Vf2State<'g> {
    pattern: &'g Graph,
    target: &'g Graph,
    /// Pattern nodes in matching order.
    order: Arc<[NodeId]>,
    /// Pattern node -> target node.
    core_pattern: Vec<Option<NodeId>>,
    /// Target node -> pattern node.
    core_target: Vec<Option<NodeId>>,
    /// Number of mapped pairs; `order[..depth]` are mapped.
    depth: usize,
}

impl<'g> Vf2State<'g> {
    /// Empty root state for matching `pattern` into `target`.
    #[must_use]
    #[debug_ensures(ret.is_consistent())]
    pub fn new(pattern: &'g Graph, target: &'g Graph) -> Self {
        let order: Vec<NodeId> = pattern
            .nodes()
            .sorted_by_key(|&n| (Reverse(pattern.out_degree(n) + pattern.in_degree(n)), n))
            .collect();
        Self {
            pattern,
            target,
            order: Arc::from(order),
            core_pattern: vec![None; pattern.node_count()],
            core_target: vec![None; target.node_count()],
            depth: 0,
        }
    }

    /// Number of pattern nodes already mapped.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Pattern nodes in the order they are matched.
    #[must_use]
    pub fn match_order(&self) -> &[NodeId] {
        &self.order
    }

    /// Both core maps agree and hold exactly `depth` pairs.
    fn is_consistent(&self) -> bool {
        let forward_ok = self
            .core_pattern
            .iter()
            .enumerate()
            .filter_map(|(p, t)| t.map(|t| (p, t)))
            .all(|(p, t)| self.core_target[t.as_usize()].map(NodeId::as_usize) == Some(p));
        let mapped_pattern = self.core_pattern.iter().flatten().count();
        let mapped_target = self.core_target.iter().flatten().count();
        forward_ok && mapped_pattern == self.depth && mapped_target == self.depth
    }

    /// Edge relation between the candidate pair and one already mapped pair
    /// must be identical in both graphs, in both directions.
    fn edges_agree(&self, p: NodeId, t: NodeId, q: NodeId, u: NodeId) -> bool {
        self.pattern.has_edge(p, q) == self.target.has_edge(t, u)
            && self.pattern.has_edge(q, p) == self.target.has_edge(u, t)
    }

    fn target_free(&self, t: usize) -> bool {
        self.core_target[t].is_none()
    }
}

impl MatchState for Vf2State<'_> {
    type Pair = NodePair;
    type Solution = CoreSet;

    fn is_goal(&self) -> bool {
        self.depth == self.pattern.node_count()
    }

    fn is_dead(&self) -> bool {
        let unmatched = self.pattern.node_count() - self.depth;
        let free = self.target.node_count() - self.depth;
        unmatched > free
    }

    fn next_pair(&self, prev: Option<NodePair>) -> Option<NodePair> {
        let pattern = *self.order.get(self.depth)?;
        let start = prev.map_or(0, |p| p.target.as_usize() + 1);
        (start..self.target.node_count())
            .find(|&t| self.target_free(t))
            .map(|t| NodePair {
                pattern,
                target: NodeId::new(t as u32),
            })
    }

    fn is_feasible_pair(&self, pair: NodePair) -> bool {
        let NodePair { pattern: p, target: t } = pair;
        if self.pattern.label(p) != self.target.label(t) {
            return false;
        }
        if self.pattern.out_degree(p) > self.target.out_degree(t)
            || self.pattern.in_degree(p) > self.target.in_degree(t)
        {
            return false;
        }
        if self.pattern.has_edge(p, p) != self.target.has_edge(t, t) {
            return false;
        }
        self.order[..self.depth].iter().all(|&q| {
            self.core_pattern[q.as_usize()].is_some_and(|u| self.edges_agree(p, t, q, u))
        })
    }

    #[debug_requires(self.core_pattern[pair.pattern.as_usize()].is_none())]
    #[debug_requires(self.core_target[pair.target.as_usize()].is_none())]
    #[debug_ensures(self.is_consistent())]
    fn add_pair(&mut self, pair: NodePair) {
        self.core_pattern[pair.pattern.as_usize()] = Some(pair.target);
        self.core_target[pair.target.as_usize()] = Some(pair.pattern);
        self.depth += 1;
    }

    fn core_set(&self) -> CoreSet {
        self.order[..self.depth]
            .iter()
            .filter_map(|&pattern| {
                self.core_pattern[pattern.as_usize()].map(|target| NodePair { pattern, target })
            })
            .collect()
    }
}

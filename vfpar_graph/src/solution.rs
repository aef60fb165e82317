use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::graph::NodeId;

/// One `(pattern node, target node)` correspondence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodePair {
    /// Node of the pattern graph.
    pub pattern: NodeId,
    /// Node of the target graph it is mapped to.
    pub target: NodeId,
}

/// Correspondence set of a complete match, sorted by pattern node.
///
/// Displays in the vflib solution form `p,t:p,t:`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoreSet {
    pairs: Vec<NodePair>,
}

impl CoreSet {
    /// Build a core set from pairs in any order.
    #[must_use]
    pub fn new(pairs: impl IntoIterator<Item = NodePair>) -> Self {
        Self {
            pairs: pairs.into_iter().sorted().collect(),
        }
    }

    /// Number of mapped pattern nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True for the empty mapping.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in pattern-node order.
    #[must_use]
    pub fn pairs(&self) -> &[NodePair] {
        &self.pairs
    }

    /// Target node mapped to `pattern`, if any.
    #[must_use]
    pub fn target_of(&self, pattern: NodeId) -> Option<NodeId> {
        self.pairs
            .binary_search_by_key(&pattern, |p| p.pattern)
            .ok()
            .map(|i| self.pairs[i].target)
    }

    /// Target nodes covered by the match, sorted. Automorphic matches share it.
    #[must_use]
    pub fn target_nodes(&self) -> Vec<NodeId> {
        self.pairs.iter().map(|p| p.target).sorted().collect()
    }
}

impl fmt::Display for CoreSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pair in &self.pairs {
            write!(f, "{},{}:", pair.pattern, pair.target)?;
        }
        Ok(())
    }
}

impl FromIterator<NodePair> for CoreSet {
    fn from_iter<I: IntoIterator<Item = NodePair>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(p: u32, t: u32) -> NodePair {
        NodePair {
            pattern: NodeId::new(p),
            target: NodeId::new(t),
        }
    }

    #[test]
    fn pairs_are_sorted_by_pattern() {
        let set: CoreSet = [pair(2, 0), pair(0, 5), pair(1, 3)].into_iter().collect();
        assert_eq!(set.to_string(), "0,5:1,3:2,0:");
        assert_eq!(set.target_of(NodeId::new(1)), Some(NodeId::new(3)));
        assert_eq!(set.target_of(NodeId::new(7)), None);
    }

    #[test]
    fn target_nodes_ignore_pattern_order() {
        let a = CoreSet::new([pair(0, 4), pair(1, 2)]);
        let b = CoreSet::new([pair(0, 2), pair(1, 4)]);
        assert_ne!(a, b);
        assert_eq!(a.target_nodes(), b.target_nodes());
    }

    #[test]
    fn empty_set_displays_nothing() {
        let set = CoreSet::default();
        assert!(set.is_empty());
        assert_eq!(set.to_string(), "");
    }

    #[test]
    fn serializes_as_pair_list() {
        let set = CoreSet::new([pair(0, 1)]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"[{"pattern":0,"target":1}]"#);
        let back: CoreSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}

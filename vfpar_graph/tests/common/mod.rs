#![allow(dead_code)]

use std::sync::OnceLock;

use itertools::Itertools;
use lazy_static::lazy_static;
use quickcheck::{Arbitrary, Gen};
use vfpar_graph::{Graph, NodeId};

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn undirected(nodes: usize, edges: &[(u32, u32)]) -> Graph {
    let mut b = Graph::builder();
    for _ in 0..nodes {
        b.add_node(0).unwrap();
    }
    for &(x, y) in edges {
        b.add_undirected_edge(NodeId::new(x), NodeId::new(y)).unwrap();
    }
    b.build()
}

pub fn complete(nodes: u32) -> Graph {
    let edges: Vec<(u32, u32)> = (0..nodes).tuple_combinations().collect();
    undirected(nodes as usize, &edges)
}

pub fn cycle(nodes: u32) -> Graph {
    let edges: Vec<_> = (0..nodes).map(|i| (i, (i + 1) % nodes)).collect();
    undirected(nodes as usize, &edges)
}

lazy_static! {
    /// Complete graph on four nodes.
    pub static ref K4: Graph = complete(4);

    /// {0, 1, 2, 3} fully connected, node 4 attached to 0 and 1.
    pub static ref K4_PLUS_TAIL: Graph = undirected(
        5,
        &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3), (4, 0), (4, 1)],
    );

    /// Outer 5-cycle 0..5, inner pentagram 5..10, spokes i -- i+5.
    pub static ref PETERSEN: Graph = undirected(
        10,
        &[
            (0, 1), (1, 2), (2, 3), (3, 4), (4, 0),
            (5, 7), (7, 9), (9, 6), (6, 8), (8, 5),
            (0, 5), (1, 6), (2, 7), (3, 8), (4, 9),
        ],
    );
}

/// Count induced embeddings by trying every injective map.
pub fn brute_force_count(pattern: &Graph, target: &Graph) -> usize {
    let k = pattern.node_count();
    if k == 0 {
        return 1;
    }
    let pattern_nodes: Vec<NodeId> = pattern.nodes().collect();
    target
        .nodes()
        .permutations(k)
        .filter(|image| {
            pattern_nodes.iter().zip(image).all(|(&p, &t)| pattern.label(p) == target.label(t))
                && pattern_nodes.iter().zip(image).all(|(&p, &t)| {
                    pattern_nodes
                        .iter()
                        .zip(image)
                        .all(|(&q, &u)| pattern.has_edge(p, q) == target.has_edge(t, u))
                })
        })
        .count()
}

/// Small random directed graph with two labels, for property tests.
#[derive(Clone, Debug)]
pub struct SmallGraph {
    pub labels: Vec<u32>,
    pub edges: Vec<(u32, u32)>,
}

impl SmallGraph {
    fn random(g: &mut Gen, max_nodes: usize) -> Self {
        let n = usize::arbitrary(g) % (max_nodes + 1);
        let labels = (0..n).map(|_| u32::arbitrary(g) % 2).collect();
        let mut edges = Vec::new();
        for a in 0..n as u32 {
            for b in 0..n as u32 {
                // about one pair in three is connected
                if u8::arbitrary(g) % 3 == 0 {
                    edges.push((a, b));
                }
            }
        }
        Self { labels, edges }
    }

    pub fn graph(&self) -> Graph {
        let mut b = Graph::builder();
        for &l in &self.labels {
            b.add_node(l).unwrap();
        }
        for &(x, y) in &self.edges {
            b.add_edge(NodeId::new(x), NodeId::new(y)).unwrap();
        }
        b.build()
    }
}

/// A pattern of at most 3 nodes and a target of at most 6.
#[derive(Clone, Debug)]
pub struct MatchCase {
    pub pattern: SmallGraph,
    pub target: SmallGraph,
    pub threads: usize,
}

impl Arbitrary for MatchCase {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            pattern: SmallGraph::random(g, 3),
            target: SmallGraph::random(g, 6),
            threads: usize::arbitrary(g) % 8 + 1,
        }
    }
}

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use lazy_static::lazy_static;
use vfpar_engine::MatchState;

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Allocation and dispatch bookkeeping shared by every state of one search.
#[derive(Debug, Default)]
pub struct Counters {
    next_id: AtomicUsize,
    pub clones: AtomicUsize,
    pub drops: AtomicUsize,
    dispatched: Mutex<HashSet<usize>>,
    pub duplicate_dispatch: AtomicBool,
}

impl Counters {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            // id 0 belongs to the root
            next_id: AtomicUsize::new(1),
            ..Self::default()
        })
    }

    pub fn clones(&self) -> usize {
        self.clones.load(Ordering::SeqCst)
    }

    pub fn drops(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }

    pub fn dispatched(&self) -> usize {
        self.dispatched.lock().unwrap().len()
    }

    fn mark_dispatched(&self, id: usize) {
        if !self.dispatched.lock().unwrap().insert(id) {
            self.duplicate_dispatch.store(true, Ordering::SeqCst);
        }
    }
}

/// Shape of a synthetic, deterministic search tree.
#[derive(Clone, Copy, Debug)]
pub struct TreeShape {
    pub depth: u32,
    pub branching: u32,
    pub seed: u64,
    /// Panic when a state at this depth is classified.
    pub panic_at_depth: Option<u32>,
}

impl TreeShape {
    pub const fn new(depth: u32, branching: u32, seed: u64) -> Self {
        Self {
            depth,
            branching,
            seed,
            panic_at_depth: None,
        }
    }
}

fn mix(h: u64, v: u64) -> u64 {
    let mut x = h ^ v.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    x ^= x >> 31;
    x = x.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x ^ (x >> 29)
}

/// A state in a synthetic tree; pruning and goals derive from a path hash.
///
/// Every clone and drop is counted, and `is_goal` (called exactly once per
/// classification) records the state id so double dispatch can be detected.
#[derive(Debug)]
pub struct TreeState {
    shape: TreeShape,
    level: u32,
    path: u64,
    id: usize,
    counters: Arc<Counters>,
}

impl TreeState {
    pub fn root(shape: TreeShape, counters: &Arc<Counters>) -> Self {
        Self {
            shape,
            level: 0,
            path: shape.seed,
            id: 0,
            counters: Arc::clone(counters),
        }
    }
}

impl Clone for TreeState {
    fn clone(&self) -> Self {
        self.counters.clones.fetch_add(1, Ordering::SeqCst);
        Self {
            shape: self.shape,
            level: self.level,
            path: self.path,
            id: self.counters.next_id.fetch_add(1, Ordering::SeqCst),
            counters: Arc::clone(&self.counters),
        }
    }
}

impl Drop for TreeState {
    fn drop(&mut self) {
        self.counters.drops.fetch_add(1, Ordering::SeqCst);
    }
}

impl MatchState for TreeState {
    type Pair = u32;
    type Solution = u64;

    fn is_goal(&self) -> bool {
        self.counters.mark_dispatched(self.id);
        if self.shape.panic_at_depth == Some(self.level) {
            panic!("state {} exploded at depth {}", self.id, self.level);
        }
        self.level == self.shape.depth && self.path % 3 != 0
    }

    fn is_dead(&self) -> bool {
        self.level > 0 && self.level < self.shape.depth && self.path % 11 == 0
    }

    fn next_pair(&self, prev: Option<u32>) -> Option<u32> {
        if self.level >= self.shape.depth {
            return None;
        }
        let next = prev.map_or(0, |p| p + 1);
        (next < self.shape.branching).then_some(next)
    }

    fn is_feasible_pair(&self, branch: u32) -> bool {
        mix(self.path, u64::from(branch)) % 5 != 0
    }

    fn add_pair(&mut self, branch: u32) {
        self.path = mix(self.path, u64::from(branch));
        self.level += 1;
    }

    fn core_set(&self) -> u64 {
        self.path
    }
}

/// Reference goal count for a shape, computed by plain recursion.
pub fn expected_goals(shape: TreeShape) -> usize {
    fn walk(shape: TreeShape, level: u32, path: u64) -> usize {
        if level == shape.depth && path % 3 != 0 {
            return 1;
        }
        if level > 0 && level < shape.depth && path % 11 == 0 {
            return 0;
        }
        if level >= shape.depth {
            return 0;
        }
        (0..shape.branching)
            .filter(|&b| mix(path, u64::from(b)) % 5 != 0)
            .map(|b| walk(shape, level + 1, mix(path, u64::from(b))))
            .sum()
    }
    walk(shape, 0, shape.seed)
}

/// Enumerates k-cliques of an undirected graph, each exactly once.
///
/// Query node `i` is matched to the i-th smallest target node of the clique,
/// so the automorphisms of the complete query graph collapse to one match.
#[derive(Clone, Debug)]
pub struct CliqueState {
    adjacency: Arc<Vec<Vec<bool>>>,
    k: usize,
    mapped: Vec<usize>,
}

impl CliqueState {
    pub fn new(nodes: usize, edges: &[(usize, usize)], k: usize) -> Self {
        let mut adjacency = vec![vec![false; nodes]; nodes];
        for &(a, b) in edges {
            adjacency[a][b] = true;
            adjacency[b][a] = true;
        }
        Self {
            adjacency: Arc::new(adjacency),
            k,
            mapped: Vec::new(),
        }
    }

    fn target_len(&self) -> usize {
        self.adjacency.len()
    }
}

impl MatchState for CliqueState {
    type Pair = (usize, usize);
    type Solution = Vec<usize>;

    fn is_goal(&self) -> bool {
        self.mapped.len() == self.k
    }

    fn is_dead(&self) -> bool {
        let next_free = self.mapped.last().map_or(0, |&t| t + 1);
        self.target_len().saturating_sub(next_free) < self.k - self.mapped.len()
    }

    fn next_pair(&self, prev: Option<(usize, usize)>) -> Option<(usize, usize)> {
        let query = self.mapped.len();
        let target = prev.map_or(0, |(_, t)| t + 1);
        (query < self.k && target < self.target_len()).then_some((query, target))
    }

    fn is_feasible_pair(&self, (_, target): (usize, usize)) -> bool {
        self.mapped.last().is_none_or(|&last| target > last)
            && self.mapped.iter().all(|&m| self.adjacency[m][target])
    }

    fn add_pair(&mut self, (_, target): (usize, usize)) {
        self.mapped.push(target);
    }

    fn core_set(&self) -> Vec<usize> {
        self.mapped.clone()
    }
}

lazy_static! {
    /// Five nodes where {0, 1, 2, 3} is the only 4-clique.
    pub static ref SINGLE_K4: CliqueState = CliqueState::new(
        5,
        &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3), (4, 0), (4, 1)],
        4,
    );
}

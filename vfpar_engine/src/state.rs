//! The partial-matching state contract consumed by the engines.
//!
//! The engines never look inside a state. They only ask it whether it is a
//! goal or a dead end, walk its candidate pairs, and clone-and-extend it to
//! produce children. Any isomorphism algorithm that fits this shape (VF2, VF3,
//! ordered clique enumeration, ...) can be scheduled.

/// A partial mapping between a query structure and a target structure.
///
/// `Clone` must produce an independent deep copy: children are built by
/// cloning the parent and calling [`MatchState::add_pair`] on the clone, and
/// the parent keeps being read while its children live on other threads.
///
/// Implementations are trusted. A cursor that never returns `None` or a state
/// that is neither a goal nor dead but never produces feasible pairs leading
/// anywhere will make the search diverge; the engines do not check for this.
pub trait MatchState: Clone + Send {
    /// A candidate `(query node, target node)` pair.
    type Pair: Copy + Send;

    /// Immutable snapshot of the correspondences held by a goal state.
    type Solution: Send;

    /// True iff the state is a complete match.
    fn is_goal(&self) -> bool;

    /// True iff no completion is reachable from this state.
    fn is_dead(&self) -> bool;

    /// Returns the candidate pair following `prev`, or `None` once every
    /// candidate has been offered. `None` as input starts the walk.
    fn next_pair(&self, prev: Option<Self::Pair>) -> Option<Self::Pair>;

    /// True iff extending the state with `pair` keeps the mapping valid.
    fn is_feasible_pair(&self, pair: Self::Pair) -> bool;

    /// Extends the mapping with `pair`.
    fn add_pair(&mut self, pair: Self::Pair);

    /// Extracts the correspondence set of this state.
    fn core_set(&self) -> Self::Solution;
}

/// Callback invoked once per discovered goal, on the discovering thread.
///
/// Returning `true` asks the engine to stop the search.
pub type Visitor<S> = dyn Fn(&S) -> bool + Send + Sync;

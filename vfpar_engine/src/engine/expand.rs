//! The per-state expansion step shared by both engines.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::sink::SolutionSink;
use crate::state::{MatchState, Visitor};
use crate::stats::SearchStats;

/// How [`SearchCore::process_state`] classified a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Classification {
    /// Complete match; recorded in the sink.
    Goal,
    /// Pruned without children.
    Dead,
    /// Expanded; `children` feasible extensions were pushed.
    Expanded { children: usize },
}

/// Solution sink, statistics, visitor and stop flag of one search.
pub(crate) struct SearchCore<S: MatchState> {
    pub(crate) sink: SolutionSink<S::Solution>,
    pub(crate) stats: SearchStats,
    visitor: Option<Box<Visitor<S>>>,
    stop: AtomicBool,
}

impl<S: MatchState> SearchCore<S> {
    pub(crate) fn new(store_solutions: bool) -> Self {
        Self {
            sink: SolutionSink::new(store_solutions),
            stats: SearchStats::new(),
            visitor: None,
            stop: AtomicBool::new(false),
        }
    }

    pub(crate) fn set_visitor(&mut self, visitor: Box<Visitor<S>>) {
        self.visitor = Some(visitor);
    }

    /// Ask every worker to stop after the state it currently holds.
    pub(crate) fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Classify `state` and, unless it is a goal or dead, push its children.
    ///
    /// Every child is pushed before this returns, which is what lets the
    /// parallel engine release its active credit afterwards.
    pub(crate) fn process_state(
        &self,
        state: &S,
        mut push: impl FnMut(Box<S>),
    ) -> Classification {
        if state.is_goal() {
            self.stats.record_goal();
            self.sink.record(|| state.core_set());
            if self.visitor.as_ref().is_some_and(|visit| visit(state)) {
                tracing::event!(tracing::Level::DEBUG, "visitor requested stop");
                self.request_stop();
            }
            return Classification::Goal;
        }

        if state.is_dead() {
            self.stats.record_dead();
            return Classification::Dead;
        }

        let mut children = 0;
        let mut cursor = None;
        while let Some(pair) = state.next_pair(cursor) {
            if state.is_feasible_pair(pair) {
                let mut child = Box::new(state.clone());
                child.add_pair(pair);
                push(child);
                children += 1;
            }
            cursor = Some(pair);
        }
        self.stats.record_expanded(children);
        Classification::Expanded { children }
    }
}

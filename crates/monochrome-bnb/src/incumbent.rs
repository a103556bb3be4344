// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Incumbent access for the branch-and-bound search
//!
//! `IncumbentStore` is the minimal interface the search needs to read the
//! best known score and publish new solutions. It abstracts over a local,
//! single-threaded run and a run that shares its incumbent with other
//! workers.
//!
//! - `NoSharedIncumbent`: local only. Starts at a fixed ceiling,
//!   `tighten(x) = x`, every improvement is accepted.
//! - `SharedIncumbentAdapter<'a>`: wraps `monochrome_search::SharedIncumbent`;
//!   `tighten(x)` returns `min(shared, x)` and improvements go through
//!   `try_install`.

use monochrome_model::cost::{IMPOSSIBLE_SCORE, Score};
use monochrome_search::{incumbent::SharedIncumbent, node::SearchNode};

pub trait IncumbentStore {
    /// Returns the score a solution has to beat when the search starts.
    fn initial_upper_bound(&self) -> Score;
    /// Merges the local best score with whatever the backing knows.
    fn tighten(&self, current_local_best: Score) -> Score;
    /// Offers a qualifying ended node. Returns `true` if it was accepted.
    fn on_solution_found(&self, node: &SearchNode) -> bool;
    /// Propagates a stop request to everybody sharing the backing.
    fn abort(&self);
}

/// An `IncumbentStore` that keeps everything local to one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoSharedIncumbent {
    ceiling: Score,
}

impl Default for NoSharedIncumbent {
    fn default() -> Self {
        Self::new()
    }
}

impl NoSharedIncumbent {
    #[inline(always)]
    pub fn new() -> Self {
        Self::with_ceiling(IMPOSSIBLE_SCORE)
    }

    /// Only solutions strictly below `ceiling` are accepted.
    #[inline(always)]
    pub fn with_ceiling(ceiling: Score) -> Self {
        Self { ceiling }
    }
}

impl IncumbentStore for NoSharedIncumbent {
    #[inline(always)]
    fn initial_upper_bound(&self) -> Score {
        self.ceiling
    }

    #[inline(always)]
    fn tighten(&self, current_local_best: Score) -> Score {
        current_local_best
    }

    #[inline(always)]
    fn on_solution_found(&self, _node: &SearchNode) -> bool {
        true
    }

    #[inline(always)]
    fn abort(&self) {}
}

/// An `IncumbentStore` backed by a `SharedIncumbent`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy)]
pub struct SharedIncumbentAdapter<'a> {
    inner: &'a SharedIncumbent,
}

impl<'a> SharedIncumbentAdapter<'a> {
    #[inline(always)]
    pub fn new(inner: &'a SharedIncumbent) -> Self {
        Self { inner }
    }
}

impl IncumbentStore for SharedIncumbentAdapter<'_> {
    #[inline(always)]
    fn initial_upper_bound(&self) -> Score {
        self.inner.score()
    }

    #[inline(always)]
    fn tighten(&self, current_local_best: Score) -> Score {
        self.inner.score().min(current_local_best)
    }

    #[inline(always)]
    fn on_solution_found(&self, node: &SearchNode) -> bool {
        self.inner.try_install(node)
    }

    #[inline(always)]
    fn abort(&self) {
        self.inner.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monochrome_model::{action::Action, cost::CostModel};

    fn finished_node(seed: u32) -> SearchNode {
        let costs = CostModel::reference();
        let mut node = SearchNode::root(seed, 0, &costs);
        while !node.has_ended() {
            node.apply(Action::Raise, &costs);
        }
        node
    }

    #[test]
    fn test_no_shared_incumbent_is_local() {
        let store = NoSharedIncumbent::with_ceiling(5000);
        assert_eq!(store.initial_upper_bound(), 5000);
        assert_eq!(store.tighten(4200), 4200);
        assert!(store.on_solution_found(&finished_node(845_126)));
        assert_eq!(NoSharedIncumbent::new().initial_upper_bound(), IMPOSSIBLE_SCORE);
    }

    #[test]
    fn test_shared_adapter_tightens_and_installs() {
        let shared = SharedIncumbent::default();
        let adapter = SharedIncumbentAdapter::new(&shared);
        assert_eq!(adapter.initial_upper_bound(), IMPOSSIBLE_SCORE);

        let node = finished_node(845_126);
        assert!(adapter.on_solution_found(&node));
        assert_eq!(shared.score(), node.score());
        assert_eq!(adapter.tighten(IMPOSSIBLE_SCORE), node.score());
        assert_eq!(adapter.tighten(1), 1);

        // The same score does not improve.
        assert!(!adapter.on_solution_found(&node));
    }

    #[test]
    fn test_shared_adapter_abort_zeroes_the_bound() {
        let shared = SharedIncumbent::default();
        let adapter = SharedIncumbentAdapter::new(&shared);
        adapter.abort();
        assert_eq!(adapter.tighten(IMPOSSIBLE_SCORE), 0);
    }
}

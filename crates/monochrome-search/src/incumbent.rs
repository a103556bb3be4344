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

//! # Shared Incumbent (Best Solution Holder)
//!
//! A concurrent container for the best qualifying solution discovered so far
//! by any worker. It exposes the best score through an atomic for lock-free
//! bound comparisons and stores the actual [`Solution`] behind a `Mutex` as
//! the source of truth.
//!
//! ## Motivation
//!
//! - Fast pruning checks: every node expansion compares its bound against the
//!   best score. That read must not take a lock.
//! - Correctness by locking: installation compares and replaces the pair
//!   `(score, solution)` under the mutex, so a worse candidate can never
//!   overwrite a better one.
//! - Coarse cancellation: [`SharedIncumbent::abort`] drops the score to 0,
//!   after which every bound comparison in every worker fails.
//!
//! ## Highlights
//!
//! - `new(ceiling)` starts with a caller-supplied ceiling; candidates at or
//!   above it are never accepted.
//! - `try_install(&SearchNode) -> bool` installs strictly better candidates.
//! - `score()` is a relaxed atomic load. A stale value only weakens pruning;
//!   the installation check is repeated under the lock.
//! - `snapshot()` clones the current best solution.
//!
//! ## Usage
//!
//! ```rust
//! use monochrome_model::cost::IMPOSSIBLE_SCORE;
//! use monochrome_search::incumbent::SharedIncumbent;
//!
//! let incumbent = SharedIncumbent::new(IMPOSSIBLE_SCORE);
//! assert_eq!(incumbent.score(), IMPOSSIBLE_SCORE);
//! assert!(incumbent.snapshot().is_none());
//! ```

use crate::{node::SearchNode, solution::Solution};
use monochrome_model::cost::{IMPOSSIBLE_SCORE, Score};
use std::sync::{
    Mutex, MutexGuard, PoisonError,
    atomic::{AtomicU32, AtomicU64, Ordering},
};

/// A concurrent holder for the best solution found during search.
///
/// The score is loaded and stored with `Ordering::Relaxed`. Every store
/// except [`abort`](Self::abort) happens while holding the solution mutex,
/// and the score is re-read under that mutex before installing, which keeps
/// the pair consistent and the score non-increasing.
#[derive(Debug)]
pub struct SharedIncumbent {
    score: AtomicU32,
    installs: AtomicU64,
    solution: Mutex<Option<Solution>>,
}

impl Default for SharedIncumbent {
    fn default() -> Self {
        Self::new(IMPOSSIBLE_SCORE)
    }
}

impl std::fmt::Display for SharedIncumbent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Incumbent(score: {}, installs: {})",
            self.score(),
            self.installs()
        )
    }
}

impl SharedIncumbent {
    /// Creates an incumbent without a solution and with `ceiling` as the
    /// best score.
    #[inline]
    pub fn new(ceiling: Score) -> Self {
        Self {
            score: AtomicU32::new(ceiling),
            installs: AtomicU64::new(0),
            solution: Mutex::new(None),
        }
    }

    /// Returns the current best score.
    #[inline(always)]
    pub fn score(&self) -> Score {
        self.score.load(Ordering::Relaxed)
    }

    /// Number of successful installations so far.
    #[inline]
    pub fn installs(&self) -> u64 {
        self.installs.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of the current best solution, if any.
    #[inline]
    pub fn snapshot(&self) -> Option<Solution> {
        self.lock().clone()
    }

    /// Installs the solution described by `node` if its score is strictly
    /// below the current best. Returns `true` if the candidate was installed.
    ///
    /// The node is not checked for qualification; callers only hand in nodes
    /// that ended with enough profit.
    pub fn try_install(&self, node: &SearchNode) -> bool {
        let candidate = node.score();
        if candidate >= self.score() {
            return false;
        }

        let mut guard = self.lock();
        // Another worker may have installed or aborted while we waited.
        if candidate >= self.score.load(Ordering::Relaxed) {
            return false;
        }

        let solution = node.to_solution();
        tracing::info!(
            score = candidate,
            seed = solution.seed(),
            advances = solution.advances(),
            steps = solution.steps().len(),
            "new best solution"
        );
        *guard = Some(solution);
        self.score.store(candidate, Ordering::Relaxed);
        self.installs.fetch_add(1, Ordering::Relaxed);
        true
    }

    /// Forces the best score to 0. Every later bound comparison fails and no
    /// further candidate can be installed. The stored solution is kept.
    #[inline]
    pub fn abort(&self) {
        self.score.store(0, Ordering::Relaxed);
    }

    /// Consumes the incumbent and returns the best solution, if any.
    pub fn into_solution(self) -> Option<Solution> {
        self.solution
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, Option<Solution>> {
        // The score is stored after the solution, so a poisoned guard still
        // holds a consistent pair.
        self.solution.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::SharedIncumbent;
    use crate::node::SearchNode;
    use monochrome_model::{action::Action, cost::CostModel, cost::IMPOSSIBLE_SCORE};
    use std::sync::Arc;
    use std::thread;

    /// A node whose score is `16 * cancels`.
    fn node_with_cancels(cancels: usize) -> SearchNode {
        let costs = CostModel::reference();
        SearchNode::replay(1_508_351_762, 0, &vec![Action::CancelRaise; cancels], &costs)
    }

    #[test]
    fn test_initial_state() {
        let incumbent = SharedIncumbent::default();
        assert_eq!(incumbent.score(), IMPOSSIBLE_SCORE);
        assert_eq!(incumbent.installs(), 0);
        assert!(incumbent.snapshot().is_none());
    }

    #[test]
    fn test_install_better_candidate() {
        let incumbent = SharedIncumbent::default();
        let node = node_with_cancels(3);
        assert!(incumbent.try_install(&node));
        assert_eq!(incumbent.score(), 48);
        assert_eq!(incumbent.installs(), 1);

        let snapshot = incumbent.snapshot().expect("snapshot should be Some");
        assert_eq!(snapshot.score(), 48);
        assert_eq!(snapshot.steps().len(), 3);
    }

    #[test]
    fn test_reject_worse_or_equal_candidates() {
        let incumbent = SharedIncumbent::default();
        assert!(incumbent.try_install(&node_with_cancels(5)));
        assert!(!incumbent.try_install(&node_with_cancels(6)));
        assert!(!incumbent.try_install(&node_with_cancels(5)));
        assert_eq!(incumbent.score(), 80);
        assert_eq!(incumbent.installs(), 1);
        assert_eq!(incumbent.snapshot().unwrap().steps().len(), 5);
    }

    #[test]
    fn test_ceiling_rejects_candidates_at_or_above() {
        let incumbent = SharedIncumbent::new(48);
        assert!(!incumbent.try_install(&node_with_cancels(3)));
        assert!(incumbent.try_install(&node_with_cancels(2)));

        let closed = SharedIncumbent::new(0);
        assert!(!closed.try_install(&node_with_cancels(0)));
        assert!(closed.snapshot().is_none());
    }

    #[test]
    fn test_abort_blocks_installs_and_keeps_solution() {
        let incumbent = SharedIncumbent::default();
        assert!(incumbent.try_install(&node_with_cancels(4)));
        incumbent.abort();
        assert_eq!(incumbent.score(), 0);
        assert!(!incumbent.try_install(&node_with_cancels(1)));
        assert_eq!(incumbent.into_solution().unwrap().score(), 64);
    }

    #[test]
    fn test_concurrent_installs_minimum_wins() {
        let incumbent = Arc::new(SharedIncumbent::default());
        let cancels = vec![9, 4, 12, 2, 7, 3, 10, 5];

        let handles = cancels
            .iter()
            .cloned()
            .map(|count| {
                let incumbent = Arc::clone(&incumbent);
                thread::spawn(move || incumbent.try_install(&node_with_cancels(count)))
            })
            .collect::<Vec<_>>();

        let results = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>();
        assert!(results.iter().any(|&installed| installed));

        assert_eq!(incumbent.score(), 32);
        assert_eq!(incumbent.snapshot().unwrap().score(), 32);
    }

    #[test]
    fn test_observed_score_never_increases() {
        let incumbent = Arc::new(SharedIncumbent::default());
        let reader = {
            let incumbent = Arc::clone(&incumbent);
            thread::spawn(move || {
                let mut last = incumbent.score();
                for _ in 0..10_000 {
                    let now = incumbent.score();
                    assert!(now <= last, "score regressed from {} to {}", last, now);
                    last = now;
                }
            })
        };

        let writers = (0..4)
            .map(|offset| {
                let incumbent = Arc::clone(&incumbent);
                thread::spawn(move || {
                    for count in (0..20).rev() {
                        incumbent.try_install(&node_with_cancels(count + offset));
                    }
                })
            })
            .collect::<Vec<_>>();

        for writer in writers {
            writer.join().unwrap();
        }
        reader.join().unwrap();
        assert_eq!(incumbent.score(), 0);
    }
}

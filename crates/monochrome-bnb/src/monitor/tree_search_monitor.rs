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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait and `PruneReason` for observing and
//! controlling the wave search. Callbacks follow the solver lifecycle, and a
//! monitor can stop the search via `SearchCommand` (default: Continue).
//!
//! Lifecycle
//! - enter → {wave → expand → lower bound → prune | branch} → solution → exit
//! - `BnbSolverStatistics` is passed to every callback.
//!
//! Monitors are driven from a single worker thread and should stay cheap;
//! `on_expand` runs once per expanded node.

use crate::stats::BnbSolverStatistics;
use monochrome_model::cost::Score;
use monochrome_search::{monitor::search_monitor::SearchCommand, node::SearchNode, solution::Solution};

/// Reasons for dropping a node without expanding it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// The lower bound is no better than the incumbent.
    BoundDominated,
    /// The remaining customers cannot be served within the length limit.
    LengthExceeded,
    /// The lowered offer is skipped because the raise already sells.
    LowerDominated,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
            PruneReason::LengthExceeded => write!(f, "LengthExceeded"),
            PruneReason::LowerDominated => write!(f, "LowerDominated"),
        }
    }
}

/// Trait for monitoring and controlling the branch-and-bound search.
pub trait TreeSearchMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when the search starts.
    fn on_enter_search(&mut self, root: &SearchNode, statistics: &BnbSolverStatistics);
    /// Called when the search ends.
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics);
    /// Polled at the start of every wave.
    fn search_command(
        &mut self,
        _node: &SearchNode,
        _statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called when a wave finished; `frontier` is the number of nodes it
    /// produced.
    fn on_wave(&mut self, _frontier: usize, _statistics: &BnbSolverStatistics) {}
    /// Called for every node taken off a frontier.
    fn on_expand(&mut self, node: &SearchNode, statistics: &BnbSolverStatistics);
    /// Called when the lower bound of an open node is known.
    fn on_lower_bound_computed(
        &mut self,
        node: &SearchNode,
        lower_bound: Score,
        statistics: &BnbSolverStatistics,
    );
    /// Called when a node or branch is dropped.
    fn on_prune(&mut self, node: &SearchNode, reason: PruneReason, statistics: &BnbSolverStatistics);
    /// Called when the search installs a new best solution.
    fn on_solution_found(&mut self, solution: &Solution, statistics: &BnbSolverStatistics);
}

impl std::fmt::Debug for dyn TreeSearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn TreeSearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

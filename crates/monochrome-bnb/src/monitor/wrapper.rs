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

//! Adapter for portfolio search monitors
//!
//! `WrapperMonitor` bridges this crate's `TreeSearchMonitor` with a generic
//! `SearchMonitor` from `monochrome_search`. Lifecycle events and the search
//! command go to the inner monitor; tree-specific callbacks are dropped.
//!
//! - Delegates: enter, expand (as a step), solution, exit and `search_command`.
//! - Ignores: wave, prune and lower bound.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    stats::BnbSolverStatistics,
};
use monochrome_model::cost::Score;
use monochrome_search::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    node::SearchNode,
    solution::Solution,
};

/// A tree search monitor that forwards to a general search monitor.
pub struct WrapperMonitor<'a> {
    inner: &'a mut dyn SearchMonitor,
    name: String,
}

impl<'a> WrapperMonitor<'a> {
    #[inline(always)]
    pub fn new(inner: &'a mut dyn SearchMonitor) -> Self {
        let name = format!("WrapperMonitor({})", inner.name());
        Self { inner, name }
    }
}

impl std::fmt::Debug for WrapperMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrapperMonitor")
            .field("name", &self.name)
            .finish()
    }
}

impl TreeSearchMonitor for WrapperMonitor<'_> {
    #[inline(always)]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    fn on_enter_search(&mut self, root: &SearchNode, _statistics: &BnbSolverStatistics) {
        self.inner.on_enter_search(root);
    }

    #[inline(always)]
    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {
        self.inner.on_exit_search();
    }

    #[inline(always)]
    fn search_command(
        &mut self,
        _node: &SearchNode,
        _statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        self.inner.search_command()
    }

    #[inline(always)]
    fn on_expand(&mut self, _node: &SearchNode, _statistics: &BnbSolverStatistics) {
        self.inner.on_step();
    }

    #[inline(always)]
    fn on_lower_bound_computed(
        &mut self,
        _node: &SearchNode,
        _lower_bound: Score,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        _node: &SearchNode,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    #[inline(always)]
    fn on_solution_found(&mut self, solution: &Solution, _statistics: &BnbSolverStatistics) {
        self.inner.on_solution_found(solution);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monochrome_model::cost::CostModel;
    use monochrome_search::monitor::interrupt::InterruptMonitor;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_forwards_stop_requests() {
        let flag = AtomicBool::new(false);
        let mut inner = InterruptMonitor::new(&flag);
        let mut wrapper = WrapperMonitor::new(&mut inner);
        let root = SearchNode::root(1, 0, &CostModel::reference());
        let stats = BnbSolverStatistics::default();

        assert_eq!(wrapper.search_command(&root, &stats), SearchCommand::Continue);
        flag.store(true, Ordering::Relaxed);
        assert!(matches!(
            wrapper.search_command(&root, &stats),
            SearchCommand::Terminate(_)
        ));
        assert_eq!(wrapper.name(), "WrapperMonitor(InterruptMonitor)");
    }
}

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

//! Progress logging through `tracing`.
//!
//! `LogMonitor` emits one `info` event when the search starts, a throttled
//! progress event while it runs and a summary when it exits. The clock is
//! only read when `nodes_expanded & clock_check_mask == 0`, so the mask should
//! be one less than a power of two.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    stats::BnbSolverStatistics,
};
use monochrome_model::cost::Score;
use monochrome_search::{node::SearchNode, solution::Solution};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_score: Option<Score>,
}

impl LogMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_score: None,
        }
    }

    #[inline(always)]
    fn log_progress(&mut self, node: &SearchNode, stats: &BnbSolverStatistics) {
        let now = Instant::now();
        tracing::info!(
            elapsed = ?now.duration_since(self.start_time),
            nodes = stats.nodes_expanded,
            depth = node.len(),
            best = ?self.best_score,
            pruned = stats.prunings_bound,
            "branch-and-bound progress"
        );
        self.last_log_time = now;
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl TreeSearchMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, root: &SearchNode, stats: &BnbSolverStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_score = None;
        tracing::info!(
            seed = root.session().initial_seed(),
            advances = root.session().advances(),
            root_lower_bound = stats.root_lower_bound,
            "branch-and-bound search started"
        );
    }

    fn on_exit_search(&mut self, stats: &BnbSolverStatistics) {
        tracing::info!(
            nodes = stats.nodes_expanded,
            waves = stats.waves,
            solutions = stats.solutions_found,
            best = ?self.best_score,
            elapsed = ?stats.time_total,
            "branch-and-bound search finished"
        );
    }

    fn on_expand(&mut self, node: &SearchNode, stats: &BnbSolverStatistics) {
        if (stats.nodes_expanded & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_progress(node, stats);
        }
    }

    fn on_lower_bound_computed(
        &mut self,
        _node: &SearchNode,
        _lower_bound: Score,
        _stats: &BnbSolverStatistics,
    ) {
    }

    fn on_prune(&mut self, _node: &SearchNode, _reason: PruneReason, _stats: &BnbSolverStatistics) {}

    fn on_solution_found(&mut self, solution: &Solution, _stats: &BnbSolverStatistics) {
        self.best_score = Some(solution.score());
    }
}

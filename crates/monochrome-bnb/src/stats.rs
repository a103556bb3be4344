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

use monochrome_model::cost::Score;
use std::time::Duration;

/// Statistics collected during a branch-and-bound run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BnbSolverStatistics {
    /// Nodes taken off a frontier.
    pub nodes_expanded: u64,
    /// Children pushed onto a frontier.
    pub children_generated: u64,
    /// Completed waves.
    pub waves: u64,
    /// Nodes whose lower bound did not beat the incumbent.
    pub prunings_bound: u64,
    /// Nodes that could not finish within the length limit.
    pub prunings_length: u64,
    /// Lowered offers skipped because the raise already sold.
    pub lower_dominations: u64,
    /// Solutions installed as the new incumbent.
    pub solutions_found: u64,
    /// The longest history expanded.
    pub max_depth: u64,
    /// Total time spent in the solver.
    pub time_total: Duration,
    /// The lower bound at the root node.
    pub root_lower_bound: Score,
}

impl BnbSolverStatistics {
    #[inline]
    pub fn on_node_expanded(&mut self) {
        self.nodes_expanded = self.nodes_expanded.saturating_add(1);
    }

    #[inline]
    pub fn on_child_generated(&mut self) {
        self.children_generated = self.children_generated.saturating_add(1);
    }

    #[inline]
    pub fn on_wave(&mut self) {
        self.waves = self.waves.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_length(&mut self) {
        self.prunings_length = self.prunings_length.saturating_add(1);
    }

    #[inline]
    pub fn on_lower_dominated(&mut self) {
        self.lower_dominations = self.lower_dominations.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    #[inline]
    pub fn set_root_lower_bound(&mut self, bound: Score) {
        self.root_lower_bound = bound;
    }
}

impl std::fmt::Display for BnbSolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Monochrome-BnB Solver Statistics:")?;
        writeln!(f, "  Nodes expanded:        {}", self.nodes_expanded)?;
        writeln!(f, "  Children generated:    {}", self.children_generated)?;
        writeln!(f, "  Waves:                 {}", self.waves)?;
        writeln!(f, "  Max depth reached:     {}", self.max_depth)?;
        writeln!(f, "  Prunings (bound):      {}", self.prunings_bound)?;
        writeln!(f, "  Prunings (length):     {}", self.prunings_length)?;
        writeln!(f, "  Lower offers skipped:  {}", self.lower_dominations)?;
        writeln!(f, "  Solutions found:       {}", self.solutions_found)?;
        writeln!(f, "  Root Lower Bound:      {}", self.root_lower_bound)?;
        writeln!(f, "  Total time:            {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero_and_count() {
        let mut stats = BnbSolverStatistics::default();
        assert_eq!(stats.nodes_expanded, 0);
        stats.on_node_expanded();
        stats.on_node_expanded();
        stats.on_pruning_bound();
        stats.on_depth_update(12);
        stats.on_depth_update(7);
        assert_eq!(stats.nodes_expanded, 2);
        assert_eq!(stats.prunings_bound, 1);
        assert_eq!(stats.max_depth, 12);
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = BnbSolverStatistics {
            waves: u64::MAX,
            ..Default::default()
        };
        stats.on_wave();
        assert_eq!(stats.waves, u64::MAX);
    }
}

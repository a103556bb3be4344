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

//! The seam between the orchestrator and the individual search strategies.
//!
//! Each worker thread receives a [`PortfolioSolverContext`] for one root
//! (one pre-advance offset) and reports a [`PortfolioSolverResult`]. The
//! incumbent inside the context is shared by all workers.

use crate::{
    incumbent::SharedIncumbent,
    monitor::search_monitor::SearchMonitor,
    node::SearchNode,
    result::{SolverResult, TerminationReason},
    solution::Solution,
};
use monochrome_model::rules::ShopRules;

pub struct PortfolioSolverContext<'a> {
    pub root: &'a SearchNode,
    pub rules: &'a ShopRules,
    pub incumbent: &'a SharedIncumbent,
    pub monitor: &'a mut dyn SearchMonitor,
}

impl<'a> PortfolioSolverContext<'a> {
    #[inline(always)]
    pub fn new(
        root: &'a SearchNode,
        rules: &'a ShopRules,
        incumbent: &'a SharedIncumbent,
        monitor: &'a mut dyn SearchMonitor,
    ) -> Self {
        Self {
            root,
            rules,
            incumbent,
            monitor,
        }
    }
}

impl std::fmt::Debug for PortfolioSolverContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioSolverContext")
            .field("root", &self.root)
            .field("rules", &self.rules)
            .field("incumbent", &self.incumbent)
            .field("monitor", &self.monitor.name())
            .finish()
    }
}

impl std::fmt::Display for PortfolioSolverContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PortfolioSolverContext(root: {}, monitor: {})",
            self.root,
            self.monitor.name(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioSolverResult {
    result: SolverResult,
    termination_reason: TerminationReason,
}

impl PortfolioSolverResult {
    /// The tree below the root was exhausted. Any solution is optimal for
    /// this root.
    #[inline]
    pub fn exhausted(solution: Option<Solution>) -> Self {
        let result = match solution {
            Some(solution) => SolverResult::Optimal(solution),
            None => SolverResult::Unknown,
        };
        Self {
            result,
            termination_reason: TerminationReason::SearchExhausted,
        }
    }

    /// The attempt budget was used up.
    #[inline]
    pub fn attempts_exhausted(solution: Option<Solution>) -> Self {
        Self {
            result: Self::feasible_or_unknown(solution),
            termination_reason: TerminationReason::AttemptsExhausted,
        }
    }

    #[inline]
    pub fn aborted<R>(solution: Option<Solution>, reason: R) -> Self
    where
        R: Into<String>,
    {
        Self {
            result: Self::feasible_or_unknown(solution),
            termination_reason: TerminationReason::Aborted(reason.into()),
        }
    }

    #[inline]
    pub fn result(&self) -> &SolverResult {
        &self.result
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    fn feasible_or_unknown(solution: Option<Solution>) -> SolverResult {
        match solution {
            Some(solution) => SolverResult::Feasible(solution),
            None => SolverResult::Unknown,
        }
    }
}

impl std::fmt::Display for PortfolioSolverResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PortfolioSolverResult(result: {}, termination_reason: {})",
            self.result, self.termination_reason
        )
    }
}

/// A search strategy that can run as one worker of the portfolio.
pub trait PortfolioSolver: Send {
    fn invoke(&mut self, context: PortfolioSolverContext<'_>) -> PortfolioSolverResult;
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution() -> Solution {
        Solution::new(Vec::new(), 4000, 20, 3072, 1, 0)
    }

    #[test]
    fn test_exhausted_is_optimal_when_solved() {
        let result = PortfolioSolverResult::exhausted(Some(solution()));
        assert!(matches!(result.result(), SolverResult::Optimal(_)));
        assert_eq!(
            result.termination_reason(),
            &TerminationReason::SearchExhausted
        );
        assert_eq!(
            PortfolioSolverResult::exhausted(None).result(),
            &SolverResult::Unknown
        );
    }

    #[test]
    fn test_attempts_and_abort_are_never_optimal() {
        let sampled = PortfolioSolverResult::attempts_exhausted(Some(solution()));
        assert!(matches!(sampled.result(), SolverResult::Feasible(_)));

        let aborted = PortfolioSolverResult::aborted(None, "stop");
        assert_eq!(aborted.result(), &SolverResult::Unknown);
        assert_eq!(
            aborted.termination_reason(),
            &TerminationReason::Aborted("stop".to_string())
        );
    }
}

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

use crate::stats::BnbSolverStatistics;
use monochrome_search::{
    portfolio::PortfolioSolverResult,
    result::{SolverResult, TerminationReason},
    solution::Solution,
};

/// Result of a branch-and-bound run.
///
/// A run that exhausts its tree proves that no qualifying path within the
/// length limit beats the incumbent it started with; the best solution it
/// installed on the way is therefore optimal.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome {
    result: SolverResult,
    termination_reason: TerminationReason,
    statistics: BnbSolverStatistics,
}

impl BnbSolverOutcome {
    #[inline]
    pub fn exhausted(solution: Option<Solution>, statistics: BnbSolverStatistics) -> Self {
        let result = match solution {
            Some(solution) => SolverResult::Optimal(solution),
            None => SolverResult::Unknown,
        };
        Self {
            result,
            termination_reason: TerminationReason::SearchExhausted,
            statistics,
        }
    }

    #[inline]
    pub fn aborted<R>(
        solution: Option<Solution>,
        reason: R,
        statistics: BnbSolverStatistics,
    ) -> Self
    where
        R: Into<String>,
    {
        let result = match solution {
            Some(solution) => SolverResult::Feasible(solution),
            None => SolverResult::Unknown,
        };
        Self {
            result,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    /// Returns the solver result.
    #[inline]
    pub fn result(&self) -> &SolverResult {
        &self.result
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics {
        &self.statistics
    }

    /// Returns the solution, if the run installed one.
    #[inline]
    pub fn solution(&self) -> Option<&Solution> {
        self.result.solution()
    }
}

impl std::fmt::Display for BnbSolverOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BnbSolverOutcome(result: {}, termination_reason: {})",
            self.result, self.termination_reason
        )
    }
}

impl From<BnbSolverOutcome> for PortfolioSolverResult {
    fn from(val: BnbSolverOutcome) -> Self {
        let solution = match val.result {
            SolverResult::Optimal(solution) | SolverResult::Feasible(solution) => Some(solution),
            SolverResult::Unknown => None,
        };
        match val.termination_reason {
            TerminationReason::SearchExhausted => PortfolioSolverResult::exhausted(solution),
            TerminationReason::Aborted(reason) => PortfolioSolverResult::aborted(solution, reason),
            TerminationReason::AttemptsExhausted => panic!(
                "called `BnbSolverOutcome::into()` with inconsistent state: branch-and-bound has no attempt budget"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution() -> Solution {
        Solution::new(Vec::new(), 3900, 20, 3100, 3_580_817_068, 0)
    }

    #[test]
    fn test_exhausted_maps_to_optimal() {
        let outcome = BnbSolverOutcome::exhausted(Some(solution()), BnbSolverStatistics::default());
        let portfolio: PortfolioSolverResult = outcome.into();
        assert!(matches!(portfolio.result(), SolverResult::Optimal(s) if s.score() == 3900));
        assert_eq!(
            portfolio.termination_reason(),
            &TerminationReason::SearchExhausted
        );
    }

    #[test]
    fn test_exhausted_without_solution_is_unknown() {
        let outcome = BnbSolverOutcome::exhausted(None, BnbSolverStatistics::default());
        let portfolio: PortfolioSolverResult = outcome.into();
        assert_eq!(portfolio.result(), &SolverResult::Unknown);
    }

    #[test]
    fn test_aborted_keeps_solution_as_feasible() {
        let outcome =
            BnbSolverOutcome::aborted(Some(solution()), "time limit", BnbSolverStatistics::default());
        assert!(matches!(outcome.result(), SolverResult::Feasible(_)));
        let portfolio: PortfolioSolverResult = outcome.into();
        assert!(matches!(portfolio.result(), SolverResult::Feasible(_)));
        match portfolio.termination_reason() {
            TerminationReason::Aborted(msg) => assert_eq!(msg, "time limit"),
            other => panic!("expected Aborted, got {:?}", other),
        }
    }

    #[test]
    #[should_panic(expected = "branch-and-bound has no attempt budget")]
    fn test_attempts_exhausted_is_inconsistent() {
        let outcome = BnbSolverOutcome {
            result: SolverResult::Unknown,
            termination_reason: TerminationReason::AttemptsExhausted,
            statistics: BnbSolverStatistics::default(),
        };
        let _portfolio: PortfolioSolverResult = outcome.into();
    }
}

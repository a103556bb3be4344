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

use crate::stats::SamplerStatistics;
use monochrome_search::{
    portfolio::PortfolioSolverResult,
    result::{SolverResult, TerminationReason},
    solution::Solution,
};

/// Result of a sampling run. A sampler never proves optimality, so any
/// solution it reports is feasible only.
#[derive(Debug, Clone)]
pub struct SamplerOutcome {
    result: SolverResult,
    termination_reason: TerminationReason,
    statistics: SamplerStatistics,
}

impl SamplerOutcome {
    #[inline]
    pub fn attempts_exhausted(solution: Option<Solution>, statistics: SamplerStatistics) -> Self {
        Self::new(solution, TerminationReason::AttemptsExhausted, statistics)
    }

    #[inline]
    pub fn aborted<R>(solution: Option<Solution>, reason: R, statistics: SamplerStatistics) -> Self
    where
        R: Into<String>,
    {
        Self::new(solution, TerminationReason::Aborted(reason.into()), statistics)
    }

    #[inline]
    fn new(
        solution: Option<Solution>,
        termination_reason: TerminationReason,
        statistics: SamplerStatistics,
    ) -> Self {
        let result = match solution {
            Some(solution) => SolverResult::Feasible(solution),
            None => SolverResult::Unknown,
        };
        Self {
            result,
            termination_reason,
            statistics,
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

    #[inline]
    pub fn statistics(&self) -> &SamplerStatistics {
        &self.statistics
    }

    #[inline]
    pub fn solution(&self) -> Option<&Solution> {
        self.result.solution()
    }
}

impl From<SamplerOutcome> for PortfolioSolverResult {
    fn from(val: SamplerOutcome) -> Self {
        let solution = match val.result {
            SolverResult::Optimal(solution) | SolverResult::Feasible(solution) => Some(solution),
            SolverResult::Unknown => None,
        };
        match val.termination_reason {
            TerminationReason::Aborted(reason) => PortfolioSolverResult::aborted(solution, reason),
            TerminationReason::AttemptsExhausted | TerminationReason::SearchExhausted => {
                PortfolioSolverResult::attempts_exhausted(solution)
            }
        }
    }
}

impl std::fmt::Display for SamplerOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SamplerOutcome(result: {}, termination_reason: {})",
            self.result, self.termination_reason
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampled_solutions_are_never_optimal() {
        let solution = Solution::new(Vec::new(), 4100, 20, 3200, 1, 0);
        let outcome = SamplerOutcome::attempts_exhausted(Some(solution), SamplerStatistics::default());
        assert!(matches!(outcome.result(), SolverResult::Feasible(_)));

        let portfolio: PortfolioSolverResult = outcome.into();
        assert!(matches!(portfolio.result(), SolverResult::Feasible(_)));
        assert_eq!(
            portfolio.termination_reason(),
            &TerminationReason::AttemptsExhausted
        );
    }

    #[test]
    fn test_aborted_without_solution() {
        let outcome = SamplerOutcome::aborted(None, "stop", SamplerStatistics::default());
        let portfolio: PortfolioSolverResult = outcome.into();
        assert_eq!(portfolio.result(), &SolverResult::Unknown);
        assert_eq!(
            portfolio.termination_reason(),
            &TerminationReason::Aborted("stop".to_string())
        );
    }
}

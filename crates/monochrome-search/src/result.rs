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

use crate::{solution::Solution, stats::SolverStatistics};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult {
    /// Every branch-and-bound worker exhausted its space; the solution is
    /// optimal within the sequence-length limit.
    Optimal(Solution),
    /// A qualifying solution was found, but optimality was not proven.
    Feasible(Solution),
    /// No qualifying sequence scored below the ceiling.
    Unknown,
}

impl SolverResult {
    /// Returns the solution, if any.
    #[inline]
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolverResult::Optimal(solution) | SolverResult::Feasible(solution) => Some(solution),
            SolverResult::Unknown => None,
        }
    }
}

impl std::fmt::Display for SolverResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Optimal(solution) => write!(f, "Optimal(score={})", solution.score()),
            SolverResult::Feasible(solution) => write!(f, "Feasible(score={})", solution.score()),
            SolverResult::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The tree search visited every node that could improve the incumbent.
    SearchExhausted,
    /// The sampler used up its attempt budget.
    AttemptsExhausted,
    /// The search was stopped early. The string describes why.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::SearchExhausted => write!(f, "Search Exhausted"),
            TerminationReason::AttemptsExhausted => write!(f, "Attempts Exhausted"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverOutcome {
    pub result: SolverResult,
    pub reason: TerminationReason,
    pub statistics: SolverStatistics,
}

impl SolverOutcome {
    #[inline]
    pub fn new(
        result: SolverResult,
        reason: TerminationReason,
        statistics: SolverStatistics,
    ) -> Self {
        Self {
            result,
            reason,
            statistics,
        }
    }

    #[inline]
    pub fn optimal(solution: Solution, statistics: SolverStatistics) -> Self {
        Self::new(
            SolverResult::Optimal(solution),
            TerminationReason::SearchExhausted,
            statistics,
        )
    }

    #[inline]
    pub fn feasible(
        solution: Solution,
        reason: TerminationReason,
        statistics: SolverStatistics,
    ) -> Self {
        Self::new(SolverResult::Feasible(solution), reason, statistics)
    }

    #[inline]
    pub fn unknown(reason: TerminationReason, statistics: SolverStatistics) -> Self {
        Self::new(SolverResult::Unknown, reason, statistics)
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }

    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self.result, SolverResult::Feasible(_))
    }

    #[inline]
    pub fn has_solution(&self) -> bool {
        self.result.solution().is_some()
    }

    #[inline]
    pub fn solution(&self) -> Option<&Solution> {
        self.result.solution()
    }
}

impl std::fmt::Display for SolverOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result: {}", self.result)?;
        writeln!(f, "Termination: {}", self.reason)?;
        write!(f, "{}", self.statistics)?;
        if let Some(solution) = self.solution() {
            write!(f, "{}", solution)?;
        }
        Ok(())
    }
}

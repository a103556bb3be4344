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

//! Statistics of a whole solver run across all offsets and workers.

use crate::result::TerminationReason;
use std::time::Duration;

/// Statistics collected by the orchestrator over one run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolverStatistics {
    /// Pre-advance offsets searched, one root each.
    pub offsets_searched: u32,
    /// Workers that exhausted the tree below their root.
    pub exhausted_searches: usize,
    /// Workers that used up their attempt budget.
    pub exhausted_samplers: usize,
    /// Workers that were stopped early.
    pub aborted_workers: usize,
    /// Solutions installed in the shared incumbent.
    pub solutions_installed: u64,
    /// Offset of the reported solution.
    pub best_offset: Option<u32>,
    /// Wall-clock duration of the run.
    pub solve_duration: Duration,
}

impl SolverStatistics {
    #[inline]
    pub fn new(offsets_searched: u32) -> Self {
        Self {
            offsets_searched,
            ..Self::default()
        }
    }

    /// Tallies a finished worker by how it terminated.
    #[inline]
    pub fn on_worker_finished(&mut self, reason: &TerminationReason) {
        match reason {
            TerminationReason::SearchExhausted => self.exhausted_searches += 1,
            TerminationReason::AttemptsExhausted => self.exhausted_samplers += 1,
            TerminationReason::Aborted(_) => self.aborted_workers += 1,
        }
    }

    #[inline]
    pub fn set_solutions_installed(&mut self, installs: u64) {
        self.solutions_installed = installs;
    }

    #[inline]
    pub fn set_best_offset(&mut self, advances: Option<u32>) {
        self.best_offset = advances;
    }

    #[inline]
    pub fn set_solve_duration(&mut self, duration: Duration) {
        self.solve_duration = duration;
    }

    /// Worker threads that ran, one per offset and strategy.
    #[inline]
    pub fn used_threads(&self) -> usize {
        self.exhausted_searches + self.exhausted_samplers + self.aborted_workers
    }
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solver Statistics:")?;
        writeln!(f, "  Offsets Searched: {}", self.offsets_searched)?;
        writeln!(
            f,
            "  Workers: {} ({} exhausted, {} sampled out, {} aborted)",
            self.used_threads(),
            self.exhausted_searches,
            self.exhausted_samplers,
            self.aborted_workers
        )?;
        writeln!(f, "  Solutions Installed: {}", self.solutions_installed)?;
        match self.best_offset {
            Some(advances) => writeln!(f, "  Best Offset: {}", advances)?,
            None => writeln!(f, "  Best Offset: none")?,
        }
        writeln!(
            f,
            "  Solve Duration (secs): {:.3}",
            self.solve_duration.as_secs_f64()
        )
    }
}

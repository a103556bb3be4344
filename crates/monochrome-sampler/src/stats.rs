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

use std::time::Duration;

/// Statistics collected during a sampling run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SamplerStatistics {
    /// Completed rollouts.
    pub rollouts: u64,
    /// Rollouts that ended with enough profit.
    pub qualifying_rollouts: u64,
    /// Rollouts installed as the new incumbent.
    pub improvements: u64,
    /// Actions applied over all rollouts.
    pub steps_simulated: u64,
    /// Total time spent in the sampler.
    pub time_total: Duration,
}

impl SamplerStatistics {
    #[inline]
    pub fn on_rollout(&mut self, steps: u64) {
        self.rollouts = self.rollouts.saturating_add(1);
        self.steps_simulated = self.steps_simulated.saturating_add(steps);
    }

    #[inline]
    pub fn on_qualifying_rollout(&mut self) {
        self.qualifying_rollouts = self.qualifying_rollouts.saturating_add(1);
    }

    #[inline]
    pub fn on_improvement(&mut self) {
        self.improvements = self.improvements.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for SamplerStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Monochrome Sampler Statistics:")?;
        writeln!(f, "  Rollouts:             {}", self.rollouts)?;
        writeln!(f, "  Qualifying rollouts:  {}", self.qualifying_rollouts)?;
        writeln!(f, "  Improvements:         {}", self.improvements)?;
        writeln!(f, "  Steps simulated:      {}", self.steps_simulated)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

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

use crate::{
    policy::{CategoricalPolicy, RolloutPolicy},
    sampler::Sampler,
};
use monochrome_search::portfolio::{PortfolioSolver, PortfolioSolverContext, PortfolioSolverResult};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Runs a [`Sampler`] as one worker of a portfolio.
#[derive(Clone, Debug)]
pub struct SamplerPortfolioSolver<R = StdRng, P = CategoricalPolicy> {
    inner: Sampler<R, P>,
}

impl SamplerPortfolioSolver {
    /// A sampler with the reference policy and an OS-seeded random source.
    #[inline]
    pub fn new(attempts: u64) -> Self {
        Self::from_sampler(Sampler::new(
            StdRng::from_os_rng(),
            CategoricalPolicy::reference(),
            attempts,
        ))
    }
}

impl<R, P> SamplerPortfolioSolver<R, P>
where
    R: Rng,
    P: RolloutPolicy,
{
    #[inline]
    pub fn from_sampler(inner: Sampler<R, P>) -> Self {
        Self { inner }
    }

    #[inline]
    pub fn inner(&self) -> &Sampler<R, P> {
        &self.inner
    }
}

impl<R, P> PortfolioSolver for SamplerPortfolioSolver<R, P>
where
    R: Rng + Send,
    P: RolloutPolicy,
{
    fn invoke(&mut self, context: PortfolioSolverContext<'_>) -> PortfolioSolverResult {
        let outcome = self.inner.sample_with_incumbent(
            context.root,
            context.rules,
            context.monitor,
            context.incumbent,
        );
        tracing::debug!(
            solver = self.name(),
            advances = context.root.session().advances(),
            rollouts = outcome.statistics().rollouts,
            qualifying = outcome.statistics().qualifying_rollouts,
            "sampler worker finished"
        );
        outcome.into()
    }

    fn name(&self) -> &str {
        "SamplerPortfolioSolver"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monochrome_model::rules::ShopRules;
    use monochrome_search::{
        incumbent::SharedIncumbent, monitor::no_op::NoOpMonitor, node::SearchNode,
        result::TerminationReason,
    };
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_invoke_reports_attempts_exhausted() {
        let rules = ShopRules::default();
        let root = SearchNode::root(3_580_817_068, 0, &rules.costs);
        let incumbent = SharedIncumbent::default();
        let mut monitor = NoOpMonitor::new();
        let mut solver = SamplerPortfolioSolver::from_sampler(Sampler::new(
            ChaCha8Rng::seed_from_u64(11),
            CategoricalPolicy::reference(),
            100,
        ));

        let result = solver.invoke(PortfolioSolverContext::new(
            &root,
            &rules,
            &incumbent,
            &mut monitor,
        ));
        assert_eq!(
            result.termination_reason(),
            &TerminationReason::AttemptsExhausted
        );
        assert_eq!(
            result.result().solution().map(|s| s.score()),
            incumbent.snapshot().map(|s| s.score())
        );
    }

    #[test]
    fn test_os_seeded_sampler_uses_reference_policy() {
        let solver = SamplerPortfolioSolver::new(10);
        assert_eq!(solver.inner().attempts(), 10);
        assert_eq!(solver.inner().policy(), &CategoricalPolicy::reference());
    }
}

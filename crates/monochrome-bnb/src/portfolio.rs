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
    bnb::BnbSolver,
    monitor::{composite::CompositeTreeSearchMonitor, log::LogMonitor, wrapper::WrapperMonitor},
};
use monochrome_search::portfolio::{PortfolioSolver, PortfolioSolverContext, PortfolioSolverResult};

/// Runs a [`BnbSolver`] as one worker of a portfolio.
#[derive(Clone, Debug, Default)]
pub struct BnbPortfolioSolver {
    inner: BnbSolver,
    progress: Option<LogMonitor>,
}

impl BnbPortfolioSolver {
    #[inline]
    pub fn new(inner: BnbSolver) -> Self {
        Self {
            inner,
            progress: None,
        }
    }

    /// Also reports progress through `log` while solving.
    #[inline]
    pub fn with_progress_log(mut self, log: LogMonitor) -> Self {
        self.progress = Some(log);
        self
    }

    #[inline]
    pub fn inner(&self) -> &BnbSolver {
        &self.inner
    }
}

impl PortfolioSolver for BnbPortfolioSolver {
    fn invoke(&mut self, context: PortfolioSolverContext<'_>) -> PortfolioSolverResult {
        let wrapper = WrapperMonitor::new(context.monitor);
        let outcome = match &self.progress {
            Some(log) => {
                let mut composite = CompositeTreeSearchMonitor::with_capacity(2);
                composite.add_monitor(wrapper);
                composite.add_monitor(log.clone());
                self.inner.solve_with_incumbent(
                    context.root,
                    context.rules,
                    composite,
                    context.incumbent,
                )
            }
            None => self.inner.solve_with_incumbent(
                context.root,
                context.rules,
                wrapper,
                context.incumbent,
            ),
        };
        tracing::debug!(
            solver = self.name(),
            advances = context.root.session().advances(),
            nodes = outcome.statistics().nodes_expanded,
            "branch-and-bound worker finished"
        );
        outcome.into()
    }

    fn name(&self) -> &str {
        "BnbPortfolioSolver"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monochrome_model::rules::ShopRules;
    use monochrome_search::{
        incumbent::SharedIncumbent,
        monitor::no_op::NoOpMonitor,
        node::SearchNode,
        result::{SolverResult, TerminationReason},
    };

    #[test]
    fn test_invoke_installs_into_shared_incumbent() {
        let rules = ShopRules::default();
        let root = SearchNode::root(3_580_817_068, 0, &rules.costs);
        let incumbent = SharedIncumbent::default();
        let mut monitor = NoOpMonitor::new();
        let mut solver =
            BnbPortfolioSolver::new(BnbSolver::new().with_max_sequence_length(20))
                .with_progress_log(LogMonitor::default());

        let result = solver.invoke(PortfolioSolverContext::new(
            &root,
            &rules,
            &incumbent,
            &mut monitor,
        ));

        assert_eq!(
            result.termination_reason(),
            &TerminationReason::SearchExhausted
        );
        assert!(matches!(result.result(), SolverResult::Optimal(s) if s.score() == 3900));
        assert_eq!(incumbent.score(), 3900);
        assert_eq!(solver.name(), "BnbPortfolioSolver");
    }
}

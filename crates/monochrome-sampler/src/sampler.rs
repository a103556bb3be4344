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

//! # Randomized Sampler
//!
//! Plays complete sessions with a [`RolloutPolicy`] and offers every
//! qualifying result to the incumbent. Rollouts are never pruned and have no
//! length limit; they only stop when the session ends. The stop signal is
//! polled once per attempt, so a stop request takes effect after at most one
//! rollout.
//!
//! The sampler is generic over its random source: production code seeds a
//! `StdRng` from the OS, tests use a fixed `ChaCha8Rng` seed and are fully
//! reproducible.

use crate::{
    policy::{CategoricalPolicy, RolloutPolicy},
    result::SamplerOutcome,
    stats::SamplerStatistics,
};
use monochrome_model::{cost::CostModel, rules::ShopRules};
use monochrome_search::{
    incumbent::SharedIncumbent,
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    node::SearchNode,
};
use rand::Rng;

#[derive(Clone, Debug)]
pub struct Sampler<R, P = CategoricalPolicy> {
    rng: R,
    policy: P,
    attempts: u64,
}

impl<R, P> Sampler<R, P>
where
    R: Rng,
    P: RolloutPolicy,
{
    /// Creates a sampler that plays at most `attempts` rollouts per run.
    #[inline]
    pub fn new(rng: R, policy: P, attempts: u64) -> Self {
        Self {
            rng,
            policy,
            attempts,
        }
    }

    #[inline]
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    #[inline]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Plays `root` to the end of its session.
    pub fn rollout(&mut self, root: &SearchNode, costs: &CostModel) -> SearchNode {
        let mut node = root.clone();
        while !node.has_ended() {
            let action = self.policy.choose(&mut self.rng);
            node.apply(action, costs);
        }
        node
    }

    /// Samples from `root` against a local incumbent.
    pub fn sample<M>(&mut self, root: &SearchNode, rules: &ShopRules, monitor: &mut M) -> SamplerOutcome
    where
        M: SearchMonitor + ?Sized,
    {
        let incumbent = SharedIncumbent::default();
        self.sample_with_incumbent(root, rules, monitor, &incumbent)
    }

    /// Samples from `root`, installing every improvement into `incumbent`.
    ///
    /// The reported solution is the last one this run installed; a better
    /// solution found by another worker is not reported here.
    pub fn sample_with_incumbent<M>(
        &mut self,
        root: &SearchNode,
        rules: &ShopRules,
        monitor: &mut M,
        incumbent: &SharedIncumbent,
    ) -> SamplerOutcome
    where
        M: SearchMonitor + ?Sized,
    {
        let start_time = std::time::Instant::now();
        let mut stats = SamplerStatistics::default();
        let mut best_solution = None;
        let mut abort_reason = None;

        monitor.on_enter_search(root);
        for _ in 0..self.attempts {
            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                tracing::info!(reason = %reason, "sampler aborted");
                incumbent.abort();
                abort_reason = Some(reason);
                break;
            }
            monitor.on_step();

            let node = self.rollout(root, &rules.costs);
            stats.on_rollout((node.len() - root.len()) as u64);
            if !node.is_solution(rules) {
                continue;
            }
            stats.on_qualifying_rollout();

            if node.score() < incumbent.score() && incumbent.try_install(&node) {
                stats.on_improvement();
                let solution = node.to_solution();
                monitor.on_solution_found(&solution);
                best_solution = Some(solution);
            }
        }
        stats.set_total_time(start_time.elapsed());
        monitor.on_exit_search();

        match abort_reason {
            Some(reason) => SamplerOutcome::aborted(best_solution, reason, stats),
            None => SamplerOutcome::attempts_exhausted(best_solution, stats),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monochrome_model::action::Action;
    use monochrome_search::{
        monitor::{interrupt::InterruptMonitor, no_op::NoOpMonitor},
        result::{SolverResult, TerminationReason},
        solution::Solution,
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::atomic::AtomicBool;

    const SEED: u32 = 3_580_817_068;

    fn sampler(seed: u64, attempts: u64) -> Sampler<ChaCha8Rng> {
        Sampler::new(
            ChaCha8Rng::seed_from_u64(seed),
            CategoricalPolicy::reference(),
            attempts,
        )
    }

    /// Records the score of every reported solution.
    #[derive(Default)]
    struct RecordingMonitor {
        scores: Vec<u32>,
        steps: u64,
    }

    impl SearchMonitor for RecordingMonitor {
        fn name(&self) -> &str {
            "RecordingMonitor"
        }
        fn on_enter_search(&mut self, _root: &SearchNode) {}
        fn on_exit_search(&mut self) {}
        fn on_solution_found(&mut self, solution: &Solution) {
            self.scores.push(solution.score());
        }
        fn on_step(&mut self) {
            self.steps += 1;
        }
        fn search_command(&self) -> SearchCommand {
            SearchCommand::Continue
        }
    }

    #[test]
    fn test_rollout_runs_to_the_end() {
        let costs = CostModel::reference();
        let root = SearchNode::root(SEED, 2, &costs);
        let mut sampler = sampler(1, 1);
        for _ in 0..50 {
            let node = sampler.rollout(&root, &costs);
            assert!(node.has_ended());
            assert_eq!(node.customers_served(), 20);
            assert_eq!(
                node.score(),
                node.history().iter().map(|step| step.cost()).sum::<u32>()
            );
            assert!(
                node.history()[2..]
                    .iter()
                    .all(|step| step.action() != Action::PreAdvance)
            );
        }
    }

    #[test]
    fn test_finds_qualifying_solution() {
        let rules = ShopRules::default();
        let root = SearchNode::root(SEED, 0, &rules.costs);
        let incumbent = SharedIncumbent::default();
        let mut monitor = RecordingMonitor::default();

        let outcome = sampler(42, 200).sample_with_incumbent(&root, &rules, &mut monitor, &incumbent);

        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::AttemptsExhausted
        );
        let stats = outcome.statistics();
        assert_eq!(stats.rollouts, 200);
        assert_eq!(monitor.steps, 200);
        assert!(stats.qualifying_rollouts > 0);
        assert_eq!(stats.improvements as usize, monitor.scores.len());

        let solution = match outcome.result() {
            SolverResult::Feasible(solution) => solution,
            other => panic!("expected Feasible, got {}", other),
        };
        assert!(solution.profit() >= rules.required_profit);
        assert!(solution.score() >= 20 * 183);
        assert_eq!(incumbent.score(), solution.score());
        // Every report improves on the previous one.
        assert!(monitor.scores.windows(2).all(|pair| pair[1] < pair[0]));
        assert_eq!(monitor.scores.last().copied(), Some(solution.score()));
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let rules = ShopRules::default();
        let root = SearchNode::root(SEED, 0, &rules.costs);
        let first = sampler(9, 100).sample(&root, &rules, &mut NoOpMonitor::new());
        let second = sampler(9, 100).sample(&root, &rules, &mut NoOpMonitor::new());
        assert_eq!(first.solution(), second.solution());
        assert_eq!(
            first.statistics().qualifying_rollouts,
            second.statistics().qualifying_rollouts
        );
    }

    #[test]
    fn test_zero_ceiling_rejects_everything() {
        let rules = ShopRules::default();
        let root = SearchNode::root(SEED, 0, &rules.costs);
        let incumbent = SharedIncumbent::new(0);
        let outcome =
            sampler(3, 50).sample_with_incumbent(&root, &rules, &mut NoOpMonitor::new(), &incumbent);
        assert_eq!(outcome.result(), &SolverResult::Unknown);
        assert_eq!(outcome.statistics().improvements, 0);
        assert!(incumbent.snapshot().is_none());
    }

    #[test]
    fn test_stop_signal_is_checked_before_each_attempt() {
        let rules = ShopRules::default();
        let root = SearchNode::root(SEED, 0, &rules.costs);
        let incumbent = SharedIncumbent::default();
        let flag = AtomicBool::new(true);
        let mut monitor = InterruptMonitor::new(&flag);

        let outcome = sampler(5, 1000).sample_with_incumbent(&root, &rules, &mut monitor, &incumbent);

        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::Aborted("stop signal received".to_string())
        );
        assert_eq!(outcome.statistics().rollouts, 0);
        assert_eq!(incumbent.score(), 0);
    }

    #[test]
    fn test_zero_attempts() {
        let rules = ShopRules::default();
        let root = SearchNode::root(SEED, 0, &rules.costs);
        let outcome = sampler(1, 0).sample(&root, &rules, &mut NoOpMonitor::new());
        assert_eq!(outcome.result(), &SolverResult::Unknown);
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::AttemptsExhausted
        );
    }
}

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

//! # Portfolio-Orchestrated Solver
//!
//! Runs the configured strategies for every pre-advance offset in parallel,
//! all sharing one incumbent, and folds the per-worker results into a single
//! [`SolverOutcome`].
//!
//! ## Highlights
//!
//! - Portfolio execution:
//!   - One root per offset `0..=max_advances`.
//!   - One thread per (offset, strategy) pair, spawned with `std::thread::scope`.
//!   - Each thread gets a `CompositeMonitor` holding an `InterruptMonitor` over
//!     the stop flag of the solver's [`StopHandle`].
//! - Shared state:
//!   - `SharedIncumbent` starts at the configured score ceiling.
//!   - The stop flag is reset at the start of every run.
//! - Outcome construction:
//!   - `Optimal` when branch-and-bound ran and no worker was aborted.
//!   - `Feasible` when a solution exists but was not proven optimal.
//!   - `Unknown` when nothing scored below the ceiling.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use monochrome_solver::{config::{SearchMode, SolverConfig}, solver::SolverBuilder};
//!
//! let config = SolverConfig::default()
//!     .with_mode(SearchMode::BranchAndBound)
//!     .with_max_sequence_length(22);
//! let solver = SolverBuilder::new().with_config(config).build().unwrap();
//! let outcome = solver.solve(3_580_817_068);
//! println!("{}", outcome);
//! ```

use crate::{
    config::{ConfigError, SolverConfig},
    stop::StopHandle,
};
use monochrome_bnb::{bnb::BnbSolver, monitor::log::LogMonitor, portfolio::BnbPortfolioSolver};
use monochrome_sampler::portfolio::SamplerPortfolioSolver;
use monochrome_search::{
    incumbent::SharedIncumbent,
    monitor::{composite::CompositeMonitor, interrupt::InterruptMonitor},
    node::SearchNode,
    portfolio::{PortfolioSolver, PortfolioSolverContext, PortfolioSolverResult},
    result::{SolverOutcome, TerminationReason},
    solution::Solution,
    stats::SolverStatistics,
};
use std::time::Instant;

#[derive(Debug)]
pub struct Solver {
    config: SolverConfig,
    stop_handle: StopHandle,
    progress_log: Option<LogMonitor>,
}

impl Solver {
    /// Validates `config` and builds a solver without progress logging.
    #[inline]
    pub fn new(config: SolverConfig) -> Result<Self, ConfigError> {
        SolverBuilder::new().with_config(config).build()
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Returns a handle that stops the current run from any thread.
    #[inline]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop_handle.clone()
    }

    /// Searches every configured offset of `seed` and returns the best
    /// qualifying sequence found.
    pub fn solve(&self, seed: u32) -> SolverOutcome {
        let start_time = Instant::now();

        // 1. Reset state for this run
        self.stop_handle.reset();
        let incumbent = SharedIncumbent::new(self.config.score_ceiling);
        let rules = &self.config.rules;
        let roots: Vec<SearchNode> = (0..=self.config.max_advances)
            .map(|advances| SearchNode::open(seed, advances, rules))
            .collect();

        tracing::info!(
            seed,
            mode = %self.config.mode,
            offsets = roots.len(),
            ceiling = self.config.score_ceiling,
            "solver started"
        );

        // 2. Run parallel workers
        let results = self.run_portfolio_parallel(&roots, &incumbent);

        // 3. Construct and return outcome
        let outcome = self.construct_outcome(start_time, incumbent, results);
        tracing::info!(
            result = %outcome.result,
            reason = %outcome.reason,
            elapsed = ?outcome.statistics.solve_duration,
            "solver finished"
        );
        outcome
    }

    /// The workers launched for one offset.
    fn build_workers(&self) -> Vec<Box<dyn PortfolioSolver>> {
        let mode = self.config.mode;
        let mut workers: Vec<Box<dyn PortfolioSolver>> =
            Vec::with_capacity(mode.workers_per_offset());

        if mode.runs_branch_and_bound() {
            let inner = BnbSolver::new()
                .with_wave_size(self.config.wave_size)
                .with_max_sequence_length(self.config.max_sequence_length);
            let mut worker = BnbPortfolioSolver::new(inner);
            if let Some(log) = &self.progress_log {
                worker = worker.with_progress_log(log.clone());
            }
            workers.push(Box::new(worker));
        }
        if mode.runs_sampler() {
            workers.push(Box::new(SamplerPortfolioSolver::new(
                self.config.sampler_attempts,
            )));
        }
        workers
    }

    fn run_portfolio_parallel(
        &self,
        roots: &[SearchNode],
        incumbent: &SharedIncumbent,
    ) -> Vec<PortfolioSolverResult> {
        let rules = &self.config.rules;
        let stop_flag = self.stop_handle.flag();
        let worker_count = self.config.worker_count();

        let mut results = Vec::with_capacity(worker_count);

        std::thread::scope(|scope| {
            let mut handles = Vec::with_capacity(worker_count);

            for root in roots {
                for mut worker in self.build_workers() {
                    let handle = scope.spawn(move || {
                        let mut monitor = CompositeMonitor::with_capacity(1);
                        monitor.add_monitor(InterruptMonitor::new(stop_flag));

                        tracing::debug!(
                            solver = worker.name(),
                            advances = root.session().advances(),
                            "worker started"
                        );
                        let context = PortfolioSolverContext::new(root, rules, incumbent, &mut monitor);
                        worker.invoke(context)
                    });
                    handles.push(handle);
                }
            }

            for handle in handles {
                let result = handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
                results.push(result);
            }
        });

        results
    }

    /// The best solution among the worker results and the shared incumbent.
    fn find_best_solution(
        &self,
        results: &[PortfolioSolverResult],
        incumbent: SharedIncumbent,
    ) -> Option<Solution> {
        let thread_solutions = results.iter().filter_map(|r| r.result().solution());
        let incumbent_solution = incumbent.into_solution();

        thread_solutions
            .chain(incumbent_solution.as_ref())
            .min_by_key(|s| s.score())
            .cloned()
    }

    fn build_statistics(
        &self,
        start_time: Instant,
        incumbent: &SharedIncumbent,
        results: &[PortfolioSolverResult],
    ) -> SolverStatistics {
        let mut stats = SolverStatistics::new(self.config.max_advances + 1);
        for result in results {
            stats.on_worker_finished(result.termination_reason());
        }
        stats.set_solutions_installed(incumbent.installs());
        stats.set_solve_duration(start_time.elapsed());
        stats
    }

    fn construct_outcome(
        &self,
        start_time: Instant,
        incumbent: SharedIncumbent,
        results: Vec<PortfolioSolverResult>,
    ) -> SolverOutcome {
        let mut stats = self.build_statistics(start_time, &incumbent, &results);
        let best_solution = self.find_best_solution(&results, incumbent);
        stats.set_best_offset(best_solution.as_ref().map(Solution::advances));
        let abort_reason = self.determine_abort_reason(&results);

        // Without an abort every branch-and-bound worker exhausted its offset,
        // which proves the best solution optimal within the length limit.
        let exhausted_reason = if self.config.mode.runs_branch_and_bound() {
            TerminationReason::SearchExhausted
        } else {
            TerminationReason::AttemptsExhausted
        };

        match (best_solution, abort_reason) {
            (Some(solution), None) if self.config.mode.runs_branch_and_bound() => {
                SolverOutcome::optimal(solution, stats)
            }
            (Some(solution), None) => SolverOutcome::feasible(solution, exhausted_reason, stats),
            (Some(solution), Some(reason)) => {
                SolverOutcome::feasible(solution, TerminationReason::Aborted(reason), stats)
            }
            (None, Some(reason)) => {
                SolverOutcome::unknown(TerminationReason::Aborted(reason), stats)
            }
            (None, None) => SolverOutcome::unknown(exhausted_reason, stats),
        }
    }

    /// The first abort message reported by a worker, if any.
    fn determine_abort_reason(&self, results: &[PortfolioSolverResult]) -> Option<String> {
        results.iter().find_map(|res| match res.termination_reason() {
            TerminationReason::Aborted(msg) => Some(msg.clone()),
            _ => None,
        })
    }
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.config)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SolverBuilder {
    config: SolverConfig,
    stop_handle: Option<StopHandle>,
    progress_log: Option<LogMonitor>,
}

impl SolverBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses `handle` as the stop flag instead of a fresh one.
    #[inline]
    pub fn with_stop_handle(mut self, handle: StopHandle) -> Self {
        self.stop_handle = Some(handle);
        self
    }

    /// Every branch-and-bound worker also reports progress through `log`.
    #[inline]
    pub fn with_progress_log(mut self, log: LogMonitor) -> Self {
        self.progress_log = Some(log);
        self
    }

    pub fn build(self) -> Result<Solver, ConfigError> {
        self.config.validate()?;
        Ok(Solver {
            config: self.config,
            stop_handle: self.stop_handle.unwrap_or_default(),
            progress_log: self.progress_log,
        })
    }
}

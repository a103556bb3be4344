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

//! Branch-and-Bound solver for the shop session.
//!
//! The search explores action sequences from a root `SearchNode` in waves.
//! A wave expands every node of the current frontier by one ply, `wave_size`
//! times in a row. The surviving frontier is then sorted ascending by lower
//! bound (stable, so ties keep generation order) and every node of it starts
//! a wave of its own, depth-first. Stop requests are polled once at the start
//! of every wave, never inside one.
//!
//! Expanding a node applies, in order:
//!
//! 1. Ended nodes are offered to the incumbent if they qualify and beat it.
//!    They have no children.
//! 2. Nodes that cannot resolve their remaining customers within
//!    `max_sequence_length` steps are dropped.
//! 3. Nodes whose admissible lower bound does not beat the incumbent are
//!    dropped.
//! 4. Otherwise the children `CancelRaise`, `Normal`, `Raise` and `Lower` are
//!    generated in that order. `Lower` is skipped whenever `Raise` already
//!    sells: both consume the same draws, so the lowered sale ends in the same
//!    generator state with less profit at a higher cost.
//!
//! An exhausted search proves that no qualifying sequence within the length
//! limit beats the incumbent the run started with.

use crate::{
    bound::optimistic_remaining_cost,
    incumbent::{IncumbentStore, NoSharedIncumbent, SharedIncumbentAdapter},
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    result::BnbSolverOutcome,
    stats::BnbSolverStatistics,
};
use monochrome_model::{
    action::{Action, Outcome},
    cost::{CostModel, IMPOSSIBLE_SCORE, Score},
    rules::ShopRules,
};
use monochrome_search::{
    incumbent::SharedIncumbent, monitor::search_monitor::SearchCommand, node::SearchNode,
    solution::Solution,
};
use smallvec::SmallVec;

/// Plies expanded per wave unless configured otherwise.
pub const DEFAULT_WAVE_SIZE: usize = 10;

/// Maximum history length, pre-advances included, unless configured otherwise.
pub const DEFAULT_MAX_SEQUENCE_LENGTH: usize = 30;

/// Upper limit of children per expanded node.
pub const MAX_CHILDREN: usize = 4;

/// The children of an expanded node.
pub type Children = SmallVec<[SearchNode; MAX_CHILDREN]>;

/// Generates the children of `node` in expansion order.
///
/// The lowered offer is omitted when the raised offer results in a purchase.
///
/// # Panics
///
/// Panics if the session of `node` has already ended.
pub fn branch(node: &SearchNode, costs: &CostModel) -> Children {
    let mut children = Children::new();
    children.push(node.child(Action::CancelRaise, costs));
    children.push(node.child(Action::Normal, costs));

    let raise = node.child(Action::Raise, costs);
    let raise_sold = raise.last_outcome().is_some_and(Outcome::is_purchase);
    children.push(raise);

    if !raise_sold {
        children.push(node.child(Action::Lower, costs));
    }
    children
}

/// The wave-expansion branch-and-bound solver.
///
/// The solver itself only holds its configuration; every run keeps its state
/// in a private search session, so one solver can be reused across roots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BnbSolver {
    wave_size: usize,
    max_sequence_length: usize,
}

impl Default for BnbSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl BnbSolver {
    #[inline]
    pub fn new() -> Self {
        Self {
            wave_size: DEFAULT_WAVE_SIZE,
            max_sequence_length: DEFAULT_MAX_SEQUENCE_LENGTH,
        }
    }

    /// Sets the number of plies per wave.
    ///
    /// # Panics
    ///
    /// Panics if `wave_size` is zero.
    #[inline]
    pub fn with_wave_size(mut self, wave_size: usize) -> Self {
        assert!(
            wave_size > 0,
            "called `BnbSolver::with_wave_size` with a wave size of zero"
        );
        self.wave_size = wave_size;
        self
    }

    /// Sets the maximum history length.
    ///
    /// # Panics
    ///
    /// Panics if `max_sequence_length` is zero.
    #[inline]
    pub fn with_max_sequence_length(mut self, max_sequence_length: usize) -> Self {
        assert!(
            max_sequence_length > 0,
            "called `BnbSolver::with_max_sequence_length` with a length of zero"
        );
        self.max_sequence_length = max_sequence_length;
        self
    }

    #[inline]
    pub fn wave_size(&self) -> usize {
        self.wave_size
    }

    #[inline]
    pub fn max_sequence_length(&self) -> usize {
        self.max_sequence_length
    }

    /// Solves from `root` as a standalone, single threaded solver.
    #[inline]
    pub fn solve<S>(&self, root: &SearchNode, rules: &ShopRules, monitor: S) -> BnbSolverOutcome
    where
        S: TreeSearchMonitor,
    {
        self.solve_internal(root, rules, monitor, NoSharedIncumbent::new())
    }

    /// Solves from `root`, pruning against and publishing to `incumbent`.
    ///
    /// A stop request observed by this run aborts the shared incumbent, so
    /// every other run sharing it stops pruning-wise right away.
    #[inline]
    pub fn solve_with_incumbent<S>(
        &self,
        root: &SearchNode,
        rules: &ShopRules,
        monitor: S,
        incumbent: &SharedIncumbent,
    ) -> BnbSolverOutcome
    where
        S: TreeSearchMonitor,
    {
        self.solve_internal(root, rules, monitor, SharedIncumbentAdapter::new(incumbent))
    }

    #[inline(always)]
    fn solve_internal<S, I>(
        &self,
        root: &SearchNode,
        rules: &ShopRules,
        mut monitor: S,
        backing: I,
    ) -> BnbSolverOutcome
    where
        S: TreeSearchMonitor,
        I: IncumbentStore,
    {
        BnbSolverSearchSession::new(self, rules, &mut monitor, backing).run(root)
    }
}

impl std::fmt::Display for BnbSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BnbSolver(wave_size: {}, max_sequence_length: {})",
            self.wave_size, self.max_sequence_length
        )
    }
}

/// State of a single search run.
struct BnbSolverSearchSession<'a, S, I> {
    solver: &'a BnbSolver,
    rules: &'a ShopRules,
    monitor: &'a mut S,
    incumbent: I,
    best_score: Score,
    best_solution: Option<Solution>,
    abort_reason: Option<String>,
    stats: BnbSolverStatistics,
    start_time: std::time::Instant,
}

impl<S, I> std::fmt::Debug for BnbSolverSearchSession<'_, S, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("solver", &self.solver)
            .field("best_score", &self.best_score)
            .field("best_solution", &self.best_solution)
            .field("abort_reason", &self.abort_reason)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, S, I> BnbSolverSearchSession<'a, S, I>
where
    S: TreeSearchMonitor,
    I: IncumbentStore,
{
    #[inline]
    fn new(solver: &'a BnbSolver, rules: &'a ShopRules, monitor: &'a mut S, incumbent: I) -> Self {
        let best_score = incumbent.initial_upper_bound();
        Self {
            solver,
            rules,
            monitor,
            incumbent,
            best_score,
            best_solution: None,
            abort_reason: None,
            stats: BnbSolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    fn run(mut self, root: &SearchNode) -> BnbSolverOutcome {
        let mut root = root.clone();
        let root_bound = optimistic_remaining_cost(&root, self.rules);
        root.set_lower_bound(root_bound);
        self.stats.set_root_lower_bound(root_bound);
        self.monitor.on_enter_search(&root, &self.stats);

        self.descend(root);

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        self.finalize_result()
    }

    #[inline]
    fn finalize_result(self) -> BnbSolverOutcome {
        match self.abort_reason {
            Some(reason) => BnbSolverOutcome::aborted(self.best_solution, reason, self.stats),
            None => BnbSolverOutcome::exhausted(self.best_solution, self.stats),
        }
    }

    /// Runs one wave below `node`, then recurses into its frontier best-first.
    fn descend(&mut self, node: SearchNode) {
        if self.abort_reason.is_some() {
            return;
        }
        if let SearchCommand::Terminate(reason) = self.monitor.search_command(&node, &self.stats)
        {
            tracing::info!(reason = %reason, "branch-and-bound search aborted");
            self.incumbent.abort();
            self.abort_reason = Some(reason);
            return;
        }

        let mut frontier = vec![node];
        let mut next = Vec::new();
        for _ in 0..self.solver.wave_size {
            if frontier.is_empty() {
                break;
            }
            for node in frontier.drain(..) {
                self.expand(&node, &mut next);
            }
            std::mem::swap(&mut frontier, &mut next);
        }
        self.stats.on_wave();
        self.monitor.on_wave(frontier.len(), &self.stats);

        frontier.sort_by_key(|node| node.lower_bound().unwrap_or(IMPOSSIBLE_SCORE));
        for node in frontier {
            self.descend(node);
        }
    }

    /// Expands `node` by one ply, pushing surviving children onto `next`.
    fn expand(&mut self, node: &SearchNode, next: &mut Vec<SearchNode>) {
        self.stats.on_node_expanded();
        self.stats.on_depth_update(node.len() as u64);
        self.monitor.on_expand(node, &self.stats);
        self.best_score = self.incumbent.tighten(self.best_score);

        if node.has_ended() {
            if node.is_solution(self.rules) && node.score() < self.best_score {
                self.handle_complete_solution(node);
            }
            return;
        }

        let max_len = self.solver.max_sequence_length;
        let min_steps_left = node.session().min_resolutions_left() as usize;
        if node.len() >= max_len || node.len() + min_steps_left > max_len {
            self.stats.on_pruning_length();
            self.monitor
                .on_prune(node, PruneReason::LengthExceeded, &self.stats);
            return;
        }

        let lower_bound = node
            .lower_bound()
            .unwrap_or_else(|| optimistic_remaining_cost(node, self.rules));
        self.monitor
            .on_lower_bound_computed(node, lower_bound, &self.stats);
        if lower_bound >= self.best_score {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(node, PruneReason::BoundDominated, &self.stats);
            return;
        }

        let children = branch(node, &self.rules.costs);
        if children.len() < MAX_CHILDREN {
            self.stats.on_lower_dominated();
            self.monitor
                .on_prune(node, PruneReason::LowerDominated, &self.stats);
        }
        for mut child in children {
            child.set_lower_bound(optimistic_remaining_cost(&child, self.rules));
            self.stats.on_child_generated();
            next.push(child);
        }
    }

    fn handle_complete_solution(&mut self, node: &SearchNode) {
        if !self.incumbent.on_solution_found(node) {
            return;
        }
        let solution = node.to_solution();
        self.best_score = node.score();
        self.stats.on_solution_found();
        self.monitor.on_solution_found(&solution, &self.stats);
        self.best_solution = Some(solution);
    }
}

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

//! # Search Node
//!
//! `SearchNode` is the single value type shared by every search strategy in
//! the workspace. It owns a copy of a [`ShopSession`] together with the
//! ordered history of [`ActionStep`]s that produced it and the running score.
//!
//! ## Motivation
//!
//! - Value semantics: deriving a child clones the parent. Siblings never share
//!   mutable state, so nodes can be moved freely between threads.
//! - One type, many strategies: the branch-and-bound solver and the sampler
//!   both drive the same node through [`SearchNode::apply`]; neither needs a
//!   specialised node.
//!
//! ## Highlights
//!
//! - `root(seed, advances, costs)` records the pre-advance draws as
//!   `PRE_ADVANCE -> ADVANCE` steps and charges them. `open(seed, advances,
//!   rules)` does the same on a session played under `rules`.
//! - `child(action, costs)` and `apply(action, costs)` extend the history.
//! - `replay(seed, advances, actions, costs)` rebuilds a node from a literal
//!   action list.
//! - An optional cached lower bound, invalidated on every `apply`.
//!
//! ## Usage
//!
//! ```rust
//! use monochrome_model::{action::Action, cost::CostModel};
//! use monochrome_search::node::SearchNode;
//!
//! let costs = CostModel::reference();
//! let root = SearchNode::root(1_508_351_762, 0, &costs);
//! let child = root.child(Action::CancelRaise, &costs);
//! assert_eq!(child.len(), 1);
//! assert_eq!(child.score(), 16);
//! ```

use crate::solution::Solution;
use monochrome_model::{
    action::{Action, Outcome},
    cost::{CostModel, Score},
    rules::ShopRules,
    shop::ShopSession,
    step::ActionStep,
};

/// A session snapshot plus the history that led to it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SearchNode {
    session: ShopSession,
    history: Vec<ActionStep>,
    score: Score,
    customers_served: u32,
    lower_bound: Option<Score>,
}

impl SearchNode {
    /// Opens a session at `seed`, burning `advances` draws first.
    #[inline]
    pub fn root(seed: u32, advances: u32, costs: &CostModel) -> Self {
        Self::from_session(ShopSession::with_advances(seed, advances), costs)
    }

    /// Opens a session under `rules`, burning `advances` draws first.
    #[inline]
    pub fn open(seed: u32, advances: u32, rules: &ShopRules) -> Self {
        Self::from_session(rules.open_session(seed, advances), &rules.costs)
    }

    fn from_session(session: ShopSession, costs: &CostModel) -> Self {
        let advances = session.advances();
        let step = ActionStep::pre_advance(costs);
        let history = vec![step; advances as usize];
        let score = step.cost() * advances;
        Self {
            session,
            history,
            score,
            customers_served: 0,
            lower_bound: None,
        }
    }

    /// Rebuilds the node reached by feeding `actions` to a fresh root.
    ///
    /// # Panics
    ///
    /// Panics if an action is applied after the session has ended.
    pub fn replay(seed: u32, advances: u32, actions: &[Action], costs: &CostModel) -> Self {
        let mut node = Self::root(seed, advances, costs);
        node.history.reserve(actions.len());
        for &action in actions {
            node.apply(action, costs);
        }
        node
    }

    /// Returns a copy of this node with `action` applied.
    #[inline]
    pub fn child(&self, action: Action, costs: &CostModel) -> Self {
        let mut child = self.clone();
        child.apply(action, costs);
        child
    }

    /// Applies `action` in place and records the step.
    ///
    /// # Panics
    ///
    /// Panics if the session has already ended.
    pub fn apply(&mut self, action: Action, costs: &CostModel) -> Outcome {
        let customer = *self.session.customer();
        let outcome = self.session.transition(action);
        let step = ActionStep::new(Some(customer), action, outcome, costs);

        self.score += step.cost();
        if outcome.resolves_customer() {
            self.customers_served += 1;
        }
        self.history.push(step);
        self.lower_bound = None;
        outcome
    }

    #[inline(always)]
    pub fn session(&self) -> &ShopSession {
        &self.session
    }

    #[inline(always)]
    pub fn history(&self) -> &[ActionStep] {
        &self.history
    }

    /// Number of recorded steps, pre-advances included.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Sum of all step costs so far.
    #[inline(always)]
    pub fn score(&self) -> Score {
        self.score
    }

    #[inline(always)]
    pub fn customers_served(&self) -> u32 {
        self.customers_served
    }

    #[inline(always)]
    pub fn has_ended(&self) -> bool {
        self.session.has_ended()
    }

    /// Outcome of the most recent step.
    #[inline]
    pub fn last_outcome(&self) -> Option<Outcome> {
        self.history.last().map(ActionStep::outcome)
    }

    /// The cached lower bound, if one was stored since the last `apply`.
    #[inline(always)]
    pub fn lower_bound(&self) -> Option<Score> {
        self.lower_bound
    }

    #[inline(always)]
    pub fn set_lower_bound(&mut self, bound: Score) {
        self.lower_bound = Some(bound);
    }

    /// Returns `true` if the session ended with enough profit.
    #[inline]
    pub fn is_solution(&self, rules: &ShopRules) -> bool {
        rules.is_qualifying(&self.session)
    }

    /// Extracts the candidate solution described by this node.
    pub fn to_solution(&self) -> Solution {
        Solution::new(
            self.history.clone(),
            self.score,
            self.customers_served,
            self.session.profit(),
            self.session.initial_seed(),
            self.session.advances(),
        )
    }
}

impl std::fmt::Display for SearchNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchNode(score: {}, steps: {}, served: {}, profit: {}, ended: {})",
            self.score,
            self.history.len(),
            self.customers_served,
            self.session.profit(),
            self.session.has_ended()
        )
    }
}

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

//! One recorded step of a search history.

use crate::{
    action::{Action, Outcome},
    cost::{CostModel, Score},
    customer::Customer,
};

/// A single action applied to a session, together with the customer it was
/// applied to, the outcome and the derived cost.
///
/// Pre-advance steps carry no customer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ActionStep {
    customer: Option<Customer>,
    action: Action,
    outcome: Outcome,
    cost: Score,
}

impl ActionStep {
    /// Records `action` on `customer` and prices it with `costs`.
    #[inline]
    pub fn new(customer: Option<Customer>, action: Action, outcome: Outcome, costs: &CostModel) -> Self {
        let cost = costs.step_cost(customer.as_ref(), action, outcome);
        Self {
            customer,
            action,
            outcome,
            cost,
        }
    }

    /// A burned draw before the first customer.
    #[inline]
    pub fn pre_advance(costs: &CostModel) -> Self {
        Self::new(None, Action::PreAdvance, Outcome::Advance, costs)
    }

    /// The customer as it was before the action was applied.
    #[inline(always)]
    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    #[inline(always)]
    pub fn action(&self) -> Action {
        self.action
    }

    #[inline(always)]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[inline(always)]
    pub fn cost(&self) -> Score {
        self.cost
    }
}

impl std::fmt::Display for ActionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.customer {
            Some(customer) => write!(
                f,
                "ActionStep({} -> {}, {} / {}, cost: {})",
                self.action,
                self.outcome,
                customer.species(),
                customer.item(),
                self.cost
            ),
            None => write!(
                f,
                "ActionStep({} -> {}, cost: {})",
                self.action, self.outcome, self.cost
            ),
        }
    }
}

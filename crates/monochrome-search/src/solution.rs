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

//! A complete candidate: the recorded steps of a qualifying session together
//! with its score and the data needed to reproduce it.

use monochrome_model::{action::Action, cost::Score, step::ActionStep};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Solution {
    steps: Vec<ActionStep>,
    score: Score,
    customers_served: u32,
    profit: u32,
    seed: u32,
    advances: u32,
}

impl Solution {
    #[inline]
    pub fn new(
        steps: Vec<ActionStep>,
        score: Score,
        customers_served: u32,
        profit: u32,
        seed: u32,
        advances: u32,
    ) -> Self {
        Self {
            steps,
            score,
            customers_served,
            profit,
            seed,
            advances,
        }
    }

    #[inline(always)]
    pub fn steps(&self) -> &[ActionStep] {
        &self.steps
    }

    #[inline(always)]
    pub fn score(&self) -> Score {
        self.score
    }

    #[inline(always)]
    pub fn customers_served(&self) -> u32 {
        self.customers_served
    }

    #[inline(always)]
    pub fn profit(&self) -> u32 {
        self.profit
    }

    /// The base seed, before any pre-advance.
    #[inline(always)]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    #[inline(always)]
    pub fn advances(&self) -> u32 {
        self.advances
    }

    /// The player inputs after the pre-advance steps, in order.
    pub fn actions(&self) -> Vec<Action> {
        self.steps
            .iter()
            .map(ActionStep::action)
            .filter(|action| *action != Action::PreAdvance)
            .collect()
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Seed: {} (advances: {})", self.seed, self.advances)?;
        writeln!(
            f,
            "Score: {}, customers: {}, profit: {}",
            self.score, self.customers_served, self.profit
        )?;
        writeln!(
            f,
            "{:>4}  {:<14} {:<12} {:<10} {:<12} {:>5}",
            "#", "ACTION", "OUTCOME", "CUSTOMER", "ITEM", "COST"
        )?;
        for (i, step) in self.steps.iter().enumerate() {
            let (species, item) = match step.customer() {
                Some(customer) => (customer.species().name(), customer.item().name()),
                None => ("-", "-"),
            };
            writeln!(
                f,
                "{:>4}  {:<14} {:<12} {:<10} {:<12} {:>5}",
                i + 1,
                step.action().name(),
                step.outcome().name(),
                species,
                item,
                step.cost()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monochrome_model::{
        action::Outcome,
        cost::CostModel,
        customer::{Customer, Item, Species},
    };

    fn sample() -> Solution {
        let costs = CostModel::reference();
        let steps = vec![
            ActionStep::pre_advance(&costs),
            ActionStep::new(
                Some(Customer::new(Species::Muchomon, Item::Medicine)),
                Action::Raise,
                Outcome::Buy,
                &costs,
            ),
        ];
        Solution::new(steps, 203, 1, 800, 42, 1)
    }

    #[test]
    fn test_actions_skip_pre_advances() {
        assert_eq!(sample().actions(), vec![Action::Raise]);
    }

    #[test]
    fn test_display_renders_table() {
        let rendered = sample().to_string();
        assert!(rendered.contains("Seed: 42 (advances: 1)"));
        assert!(rendered.contains("Score: 203, customers: 1, profit: 800"));
        assert!(rendered.contains("PRE_ADVANCE"));
        assert!(rendered.contains("MUCHOMON"));
        assert!(rendered.contains("MEDICINE"));
        assert_eq!(rendered.lines().count(), 5);
    }
}

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

//! # Cost Model
//!
//! Every [`ActionStep`](crate::step::ActionStep) is charged a time cost made of
//! an action part and an outcome part. The values are frame counts measured on
//! the real game and are fixed.
//!
//! | part                    | cost                                             |
//! |-------------------------|--------------------------------------------------|
//! | `Raise`                 | 12                                               |
//! | `Normal`, `Lower`       | 17                                               |
//! | `CancelRaise`           | 16                                               |
//! | `PreAdvance`            | 20                                               |
//! | `Deny`                  | 36                                               |
//! | `Buy`, `Leave` (+ended) | walk of the species + 100, + 10 for meat, + 10   |
//!
//! ## Medicine adjustment
//!
//! A Muchomon buying medicine is charged a 10 frame reduction. The reference
//! scoring subtracts the reduction and then adds the flat 10 in the same path,
//! so the pair cancels and the sale costs walk + 100. An older scoring variant
//! kept the reduction on top of that, charging walk + 90. [`MedicineAdjustment`]
//! selects between the two; the default reproduces the reference scoring.

use crate::{
    action::{Action, Outcome},
    customer::{Customer, Item, Species},
};

/// A time cost in frames.
pub type Score = u32;

/// Sentinel for "no qualifying completion exists". Also the default ceiling.
pub const IMPOSSIBLE_SCORE: Score = 99_999;

pub const RAISE_COST: Score = 12;
pub const NORMAL_COST: Score = 17;
pub const LOWER_COST: Score = 17;
pub const CANCEL_RAISE_COST: Score = 16;
pub const PRE_ADVANCE_COST: Score = 20;
pub const DENY_COST: Score = 36;
/// Spawn, request, reaction and wait of every customer.
pub const STATIC_COST: Score = 100;
pub const MEAT_COST: Score = 10;
/// Flat term added to every resolved customer.
pub const RESOLUTION_COST: Score = 10;
/// Reduction for a medicine sale to a Muchomon.
pub const MEDICINE_REBATE: Score = 10;

/// Walk-in plus walk-out frames indexed by species.
const WALK_COSTS: [Score; 4] = [82, 73, 65, 71];

/// Selects how the Muchomon medicine reduction is applied.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum MedicineAdjustment {
    /// The reduction cancels the flat resolution term.
    #[default]
    SelfCancelling,
    /// The reduction is applied and the flat resolution term is skipped.
    Rebate,
}

impl std::fmt::Display for MedicineAdjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MedicineAdjustment::SelfCancelling => f.write_str("self-cancelling"),
            MedicineAdjustment::Rebate => f.write_str("rebate"),
        }
    }
}

/// Computes step costs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct CostModel {
    medicine_adjustment: MedicineAdjustment,
}

impl CostModel {
    #[inline]
    pub const fn new(medicine_adjustment: MedicineAdjustment) -> Self {
        Self {
            medicine_adjustment,
        }
    }

    /// The reference scoring.
    #[inline]
    pub const fn reference() -> Self {
        Self::new(MedicineAdjustment::SelfCancelling)
    }

    #[inline(always)]
    pub const fn medicine_adjustment(&self) -> MedicineAdjustment {
        self.medicine_adjustment
    }

    /// Walk-in plus walk-out frames of `species`.
    #[inline(always)]
    pub const fn walk_cost(species: Species) -> Score {
        WALK_COSTS[species.index()]
    }

    /// Cost of performing `action`, independent of its outcome.
    #[inline]
    pub const fn action_cost(&self, action: Action) -> Score {
        match action {
            Action::Raise => RAISE_COST,
            Action::Normal => NORMAL_COST,
            Action::Lower => LOWER_COST,
            Action::CancelRaise => CANCEL_RAISE_COST,
            Action::PreAdvance => PRE_ADVANCE_COST,
            Action::CancelNormal | Action::CancelLower => 0,
        }
    }

    /// Cost of resolving `customer`, with or without a purchase.
    pub const fn resolution_cost(&self, customer: &Customer, purchased: bool) -> Score {
        let mut cost = Self::walk_cost(customer.species()) + STATIC_COST;
        if matches!(customer.item(), Item::Meat) {
            cost += MEAT_COST;
        }
        if purchased
            && matches!(customer.species(), Species::Muchomon)
            && matches!(customer.item(), Item::Medicine)
        {
            cost -= MEDICINE_REBATE;
            if matches!(self.medicine_adjustment, MedicineAdjustment::Rebate) {
                return cost;
            }
        }
        cost + RESOLUTION_COST
    }

    /// Cost of `outcome` for `customer`.
    ///
    /// # Panics
    ///
    /// Panics if `outcome` resolves a customer but `customer` is `None`.
    pub fn outcome_cost(&self, customer: Option<&Customer>, outcome: Outcome) -> Score {
        match outcome {
            Outcome::Advance | Outcome::Cancel => 0,
            Outcome::Deny => DENY_COST,
            Outcome::Buy | Outcome::BuyEnded | Outcome::Leave | Outcome::LeaveEnded => {
                let customer = customer.unwrap_or_else(|| {
                    panic!(
                        "called `CostModel::outcome_cost` with outcome {} but without a customer",
                        outcome
                    )
                });
                self.resolution_cost(customer, outcome.is_purchase())
            }
        }
    }

    /// Total cost of one step.
    #[inline]
    pub fn step_cost(&self, customer: Option<&Customer>, action: Action, outcome: Outcome) -> Score {
        self.action_cost(action) + self.outcome_cost(customer, outcome)
    }

    /// Lower bound on the cost of serving a customer that buys.
    pub fn sale_floor(&self) -> Score {
        self.cheapest_resolution(true)
    }

    /// Lower bound on the cost of serving any customer, whether it buys or
    /// walks out.
    pub fn customer_floor(&self) -> Score {
        self.sale_floor().min(self.cheapest_resolution(false))
    }

    /// Every customer needs at least one offer to be resolved; the raise is
    /// the cheapest offer.
    fn cheapest_resolution(&self, purchased: bool) -> Score {
        Species::ALL
            .into_iter()
            .flat_map(|species| Item::ALL.into_iter().map(move |item| Customer::new(species, item)))
            .map(|customer| RAISE_COST + self.resolution_cost(&customer, purchased))
            .min()
            .unwrap_or(0)
    }
}

impl std::fmt::Display for CostModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CostModel(medicine: {})", self.medicine_adjustment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_customers() -> impl Iterator<Item = Customer> {
        Species::ALL
            .into_iter()
            .flat_map(|species| Item::ALL.into_iter().map(move |item| Customer::new(species, item)))
    }

    #[test]
    fn test_action_costs() {
        let model = CostModel::reference();
        assert_eq!(model.action_cost(Action::Raise), 12);
        assert_eq!(model.action_cost(Action::Normal), 17);
        assert_eq!(model.action_cost(Action::Lower), 17);
        assert_eq!(model.action_cost(Action::CancelRaise), 16);
        assert_eq!(model.action_cost(Action::PreAdvance), 20);
        assert_eq!(model.action_cost(Action::CancelNormal), 0);
        assert_eq!(model.action_cost(Action::CancelLower), 0);
    }

    #[test]
    fn test_non_resolving_outcomes() {
        let model = CostModel::reference();
        assert_eq!(model.outcome_cost(None, Outcome::Advance), 0);
        assert_eq!(model.outcome_cost(None, Outcome::Cancel), 0);
        assert_eq!(model.outcome_cost(None, Outcome::Deny), 36);
        assert_eq!(model.step_cost(None, Action::PreAdvance, Outcome::Advance), 20);
    }

    #[test]
    fn test_resolution_costs_reference() {
        let model = CostModel::reference();
        let gob_meat = Customer::new(Species::Goburimon, Item::Meat);
        assert_eq!(model.outcome_cost(Some(&gob_meat), Outcome::Buy), 82 + 100 + 10 + 10);
        assert_eq!(model.outcome_cost(Some(&gob_meat), Outcome::LeaveEnded), 202);

        let weed_potty = Customer::new(Species::Weedmon, Item::PortaPotty);
        assert_eq!(model.outcome_cost(Some(&weed_potty), Outcome::Leave), 175);
        assert_eq!(
            model.step_cost(Some(&weed_potty), Action::Raise, Outcome::BuyEnded),
            187
        );

        let gots_medicine = Customer::new(Species::Gotsumon, Item::Medicine);
        assert_eq!(model.outcome_cost(Some(&gots_medicine), Outcome::Buy), 183);
    }

    #[test]
    fn test_muchomon_medicine_self_cancelling() {
        let model = CostModel::reference();
        let customer = Customer::new(Species::Muchomon, Item::Medicine);
        // Reduction and flat term cancel; a departure keeps the flat term.
        assert_eq!(model.outcome_cost(Some(&customer), Outcome::Buy), 171);
        assert_eq!(model.outcome_cost(Some(&customer), Outcome::BuyEnded), 171);
        assert_eq!(model.outcome_cost(Some(&customer), Outcome::Leave), 181);
        assert_eq!(model.outcome_cost(Some(&customer), Outcome::LeaveEnded), 181);
    }

    #[test]
    fn test_muchomon_medicine_rebate() {
        let model = CostModel::new(MedicineAdjustment::Rebate);
        let customer = Customer::new(Species::Muchomon, Item::Medicine);
        assert_eq!(model.outcome_cost(Some(&customer), Outcome::Buy), 161);
        assert_eq!(model.outcome_cost(Some(&customer), Outcome::BuyEnded), 161);
        assert_eq!(model.outcome_cost(Some(&customer), Outcome::Leave), 181);

        // Every other customer is scored exactly as in the reference.
        let reference = CostModel::reference();
        for other in all_customers() {
            if other.species() == Species::Muchomon && other.item() == Item::Medicine {
                continue;
            }
            for outcome in [Outcome::Buy, Outcome::Leave] {
                assert_eq!(
                    model.outcome_cost(Some(&other), outcome),
                    reference.outcome_cost(Some(&other), outcome)
                );
            }
        }
    }

    #[test]
    fn test_floors_bound_every_resolution() {
        for model in [
            CostModel::reference(),
            CostModel::new(MedicineAdjustment::Rebate),
        ] {
            assert!(model.sale_floor() <= model.customer_floor());
            for customer in all_customers() {
                for action in [Action::Raise, Action::Normal, Action::Lower] {
                    for outcome in [Outcome::Buy, Outcome::Leave] {
                        let cost = model.step_cost(Some(&customer), action, outcome);
                        assert!(cost >= model.customer_floor(), "{} {}", customer, outcome);
                    }
                }
            }
        }
        // The cheapest resolution is a raised medicine sale to a Muchomon.
        assert_eq!(CostModel::reference().sale_floor(), 183);
        assert_eq!(CostModel::reference().customer_floor(), 183);
        assert_eq!(CostModel::new(MedicineAdjustment::Rebate).sale_floor(), 173);
        assert_eq!(CostModel::new(MedicineAdjustment::Rebate).customer_floor(), 173);
    }

    #[test]
    #[should_panic(expected = "without a customer")]
    fn test_resolution_without_customer_panics() {
        CostModel::reference().outcome_cost(None, Outcome::Buy);
    }
}

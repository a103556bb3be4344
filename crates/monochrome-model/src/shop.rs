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

//! # Transaction State Machine
//!
//! `ShopSession` simulates one complete shop run of exactly
//! [`CUSTOMERS_PER_SESSION`] customers. Every random decision is taken from the
//! session's own [`GameRng`], so two sessions with the same seed and the same
//! action history are identical bit for bit.
//!
//! ## Lifecycle
//!
//! - Construction draws the first customer (optionally after burning a number
//!   of pre-advance draws).
//! - [`ShopSession::transition`] applies one action. Offers resolve to a
//!   purchase, a refusal, or a departure. Purchases and departures move on to
//!   the next customer or, for the last customer, end the session.
//! - Once ended, the session is latched; queries stay valid but a further
//!   transition is a programmer error and panics.
//!
//! ## Customer accounting
//!
//! The remaining-customer counter starts at 20 and is decremented once per
//! customer draw, including the first. When a customer is resolved while the
//! counter is already zero, that customer was the 20th and the session ends.
//!
//! Under [`DepartureCounting::Double`] a departure decrements the counter once
//! more before the next draw, so every departure uses up two of the 20 slots
//! and a session with departures ends after fewer than 20 customers.

use crate::{
    action::{Action, Outcome},
    customer::{Customer, Item, Species},
    offer::OfferTier,
    random::GameRng,
    tables,
};

/// Number of customers served over the life of a session.
pub const CUSTOMERS_PER_SESSION: u32 = 20;

const RAISE_TIER_COUNT: u32 = OfferTier::RAISE_TIERS.len() as u32;
const LOWER_TIER_COUNT: u32 = OfferTier::LOWER_TIERS.len() as u32;

/// How a departing customer counts against the customers of a session.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum DepartureCounting {
    /// Every resolved customer uses one slot.
    #[default]
    Single,
    /// A departure uses two slots: its own and the next customer's.
    Double,
}

impl DepartureCounting {
    /// Minimum number of customer resolutions that use up `slots` slots.
    #[inline]
    pub const fn min_resolutions(self, slots: u32) -> u32 {
        match self {
            DepartureCounting::Single => slots,
            DepartureCounting::Double => slots.div_ceil(2),
        }
    }
}

impl std::fmt::Display for DepartureCounting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepartureCounting::Single => write!(f, "single"),
            DepartureCounting::Double => write!(f, "double"),
        }
    }
}

/// The reaction of a customer to an offer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Response {
    Buy,
    Deny,
    Leave,
}

/// A single simulated shop run.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ShopSession {
    seed: u32,
    advances: u32,
    rng: GameRng,
    departures: DepartureCounting,
    remaining: u32,
    profit: u32,
    customer: Customer,
    ended: bool,
}

impl ShopSession {
    /// Opens a session at `seed` and draws the first customer.
    #[inline]
    pub fn new(seed: u32) -> Self {
        Self::with_advances(seed, 0)
    }

    /// Opens a session at `seed`, burns `advances` draws, then draws the
    /// first customer.
    #[inline]
    pub fn with_advances(seed: u32, advances: u32) -> Self {
        Self::with_counting(seed, advances, DepartureCounting::Single)
    }

    /// Like [`ShopSession::with_advances`], counting departures as given.
    pub fn with_counting(seed: u32, advances: u32, departures: DepartureCounting) -> Self {
        let mut rng = GameRng::new(seed);
        rng.advance(advances);
        Self::open(seed, advances, rng, departures)
    }

    /// Opens a session on an already positioned generator.
    #[inline]
    pub fn from_rng(rng: GameRng) -> Self {
        Self::open(rng.state(), 0, rng, DepartureCounting::Single)
    }

    fn open(seed: u32, advances: u32, rng: GameRng, departures: DepartureCounting) -> Self {
        let mut session = Self {
            seed,
            advances,
            rng,
            departures,
            remaining: CUSTOMERS_PER_SESSION,
            profit: 0,
            // Placeholder, replaced by the first draw below.
            customer: Customer::new(Species::Goburimon, Item::Meat),
            ended: false,
        };
        session.next_customer();
        session
    }

    /// Applies `action` and returns its outcome.
    ///
    /// # Panics
    ///
    /// Panics if the session has already ended.
    pub fn transition(&mut self, action: Action) -> Outcome {
        assert!(
            !self.ended,
            "called `ShopSession::transition` with action {} on a session that has already ended",
            action
        );

        let tier = match action {
            Action::PreAdvance | Action::CancelRaise | Action::CancelLower => {
                // Only the advance matters; the value itself is discarded.
                self.rng.draw();
                return Outcome::Cancel;
            }
            Action::CancelNormal => return Outcome::Cancel,
            Action::Raise => {
                OfferTier::from_index(self.rng.scaled_draw(RAISE_TIER_COUNT) as usize)
            }
            Action::Normal => OfferTier::Normal,
            Action::Lower => OfferTier::from_index(
                OfferTier::Minus10.index() + self.rng.scaled_draw(LOWER_TIER_COUNT) as usize,
            ),
        };

        match self.resolve_offer(tier) {
            Response::Deny => Outcome::Deny,
            Response::Buy => {
                self.profit += tables::profit(self.customer.item(), tier);
                self.finish_customer(Outcome::Buy, Outcome::BuyEnded)
            }
            Response::Leave => {
                if self.departures == DepartureCounting::Double && self.remaining > 0 {
                    self.remaining -= 1;
                }
                self.finish_customer(Outcome::Leave, Outcome::LeaveEnded)
            }
        }
    }

    /// The customer currently at the counter. After the session ended this is
    /// the last customer served.
    #[inline(always)]
    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    #[inline(always)]
    pub fn has_ended(&self) -> bool {
        self.ended
    }

    /// Accumulated profit. Only ever increases, and only on purchases.
    #[inline(always)]
    pub fn profit(&self) -> u32 {
        self.profit
    }

    /// Customer slots not yet used. The current customer is not included.
    #[inline(always)]
    pub fn remaining_customers(&self) -> u32 {
        self.remaining
    }

    /// Open customer slots, the current customer included. With
    /// [`DepartureCounting::Single`] this is exactly the number of customers
    /// still to be resolved; otherwise it is an upper bound.
    #[inline]
    pub fn customers_left(&self) -> u32 {
        if self.ended { 0 } else { self.remaining + 1 }
    }

    /// Fewest customer resolutions that can still end the session.
    #[inline]
    pub fn min_resolutions_left(&self) -> u32 {
        self.departures.min_resolutions(self.customers_left())
    }

    /// Customer slots used so far. Equals the customers drawn with
    /// [`DepartureCounting::Single`].
    #[inline]
    pub fn customers_drawn(&self) -> u32 {
        CUSTOMERS_PER_SESSION - self.remaining
    }

    #[inline(always)]
    pub fn departure_counting(&self) -> DepartureCounting {
        self.departures
    }

    /// The seed the session was opened with, before any pre-advance.
    #[inline(always)]
    pub fn initial_seed(&self) -> u32 {
        self.seed
    }

    /// Number of draws burned before the first customer.
    #[inline(always)]
    pub fn advances(&self) -> u32 {
        self.advances
    }

    /// The current generator.
    #[inline(always)]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    fn next_customer(&mut self) {
        let species = tables::species_from_roll(self.rng.scaled_draw(tables::SPECIES_ROLL_LIMIT));
        let item = tables::item_from_roll(species, self.rng.scaled_draw(tables::PERCENT_ROLL_LIMIT));
        self.remaining -= 1;
        self.customer = Customer::new(species, item);
    }

    fn resolve_offer(&mut self, tier: OfferTier) -> Response {
        let buy_chance = tables::buy_chance(self.customer.species(), self.customer.item(), tier);
        if self.rng.scaled_draw(tables::PERCENT_ROLL_LIMIT) < buy_chance {
            return Response::Buy;
        }

        let leave_chance = tables::leave_chance(self.customer.species(), self.customer.fail_count());
        self.customer.record_failure();
        if self.rng.scaled_draw(tables::PERCENT_ROLL_LIMIT) < leave_chance {
            Response::Leave
        } else {
            Response::Deny
        }
    }

    fn finish_customer(&mut self, fresh: Outcome, last: Outcome) -> Outcome {
        if self.remaining == 0 {
            self.ended = true;
            last
        } else {
            self.next_customer();
            fresh
        }
    }
}

impl std::fmt::Display for ShopSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ShopSession(seed: {}, advances: {}, departures: {}, profit: {}, remaining: {}, ended: {}, {})",
            self.seed,
            self.advances,
            self.departures,
            self.profit,
            self.remaining,
            self.ended,
            self.customer
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEEDS: [u32; 6] = [
        0,
        1,
        845_126,
        1_508_351_762,
        3_580_817_068,
        4_063_756_419,
    ];

    fn run_to_end(seed: u32, policy: &[Action]) -> (ShopSession, u32) {
        let mut session = ShopSession::new(seed);
        let mut resolved = 0;
        let mut i = 0;
        while !session.has_ended() {
            let outcome = session.transition(policy[i % policy.len()]);
            if outcome.resolves_customer() {
                resolved += 1;
            }
            i += 1;
        }
        (session, resolved)
    }

    #[test]
    fn test_first_customer_is_drawn_on_open() {
        let session = ShopSession::new(3_580_817_068);
        assert_eq!(session.customer().species(), Species::Muchomon);
        assert_eq!(session.customer().item(), Item::Medicine);
        assert_eq!(session.customer().fail_count(), 0);
        assert_eq!(session.remaining_customers(), CUSTOMERS_PER_SESSION - 1);
        assert_eq!(session.customers_left(), CUSTOMERS_PER_SESSION);
        assert_eq!(session.customers_drawn(), 1);
        assert_eq!(session.profit(), 0);
        assert!(!session.has_ended());

        // Two draws were consumed.
        let mut rng = GameRng::new(3_580_817_068);
        rng.advance(2);
        assert_eq!(*session.rng(), rng);
    }

    #[test]
    fn test_pre_advance_shifts_generator_and_keeps_seed() {
        let session = ShopSession::with_advances(3_580_817_068, 3);
        let mut rng = GameRng::new(3_580_817_068);
        rng.advance(5);
        assert_eq!(*session.rng(), rng);
        assert_eq!(session.initial_seed(), 3_580_817_068);
        assert_eq!(session.advances(), 3);
    }

    #[test]
    fn test_from_rng_matches_with_advances() {
        let mut rng = GameRng::new(1_508_351_762);
        rng.advance(2);
        let a = ShopSession::from_rng(rng);
        let b = ShopSession::with_advances(1_508_351_762, 2);
        assert_eq!(a.customer(), b.customer());
        assert_eq!(a.rng(), b.rng());
        assert_eq!(a.initial_seed(), rng.state());
    }

    #[test]
    fn test_cancel_draw_consumption() {
        let base = ShopSession::new(1_508_351_762);

        let mut session = base;
        assert_eq!(session.transition(Action::CancelNormal), Outcome::Cancel);
        assert_eq!(session, base);

        for action in [Action::CancelRaise, Action::CancelLower, Action::PreAdvance] {
            let mut session = base;
            assert_eq!(session.transition(action), Outcome::Cancel);
            let mut rng = *base.rng();
            rng.draw();
            assert_eq!(*session.rng(), rng);
            assert_eq!(session.customer(), base.customer());
            assert_eq!(session.remaining_customers(), base.remaining_customers());
        }
    }

    #[test]
    fn test_every_completed_session_serves_exactly_twenty_customers() {
        let policies: [&[Action]; 4] = [
            &[Action::Raise],
            &[Action::Normal],
            &[Action::Lower, Action::CancelRaise],
            &[Action::CancelRaise, Action::Raise, Action::Normal, Action::CancelNormal],
        ];
        for seed in SEEDS {
            for policy in policies {
                let (session, resolved) = run_to_end(seed, policy);
                assert_eq!(resolved, CUSTOMERS_PER_SESSION, "seed {}", seed);
                assert_eq!(session.customers_drawn(), CUSTOMERS_PER_SESSION);
                assert_eq!(session.customers_left(), 0);
            }
        }
    }

    #[test]
    fn test_session_ends_exactly_on_twentieth_resolution() {
        for seed in SEEDS {
            let mut session = ShopSession::new(seed);
            let mut resolved = 0;
            loop {
                let outcome = session.transition(Action::Raise);
                if outcome.resolves_customer() {
                    resolved += 1;
                }
                assert_eq!(outcome.ends_session(), session.has_ended());
                assert_eq!(session.has_ended(), resolved == CUSTOMERS_PER_SESSION);
                if session.has_ended() {
                    break;
                }
            }
        }
    }

    #[test]
    fn test_profit_changes_only_on_purchase() {
        for seed in SEEDS {
            let mut session = ShopSession::new(seed);
            let mut i = 0usize;
            let policy = [Action::Raise, Action::Normal, Action::CancelRaise, Action::Lower];
            while !session.has_ended() {
                let before = session.profit();
                let item = session.customer().item();
                let outcome = session.transition(policy[i % policy.len()]);
                if outcome.is_purchase() {
                    assert!(session.profit() >= before);
                    assert!(session.profit() - before <= tables::profit(item, OfferTier::Plus50));
                } else {
                    assert_eq!(session.profit(), before);
                }
                i += 1;
            }
        }
    }

    #[test]
    fn test_denial_keeps_customer_and_counts_failure() {
        // Find a refusal by scanning seeds; the customer must persist.
        let mut found = false;
        for seed in 0..500u32 {
            let mut session = ShopSession::new(seed);
            let before = *session.customer();
            if session.transition(Action::Raise) == Outcome::Deny {
                assert_eq!(session.customer().species(), before.species());
                assert_eq!(session.customer().item(), before.item());
                assert_eq!(session.customer().fail_count(), 1);
                assert_eq!(session.remaining_customers(), CUSTOMERS_PER_SESSION - 1);
                found = true;
                break;
            }
        }
        assert!(found, "no refusal found in the scanned seeds");
    }

    #[test]
    fn test_raise_purchase_implies_lower_purchase_on_same_draws() {
        for seed in 0..2000u32 {
            let base = ShopSession::new(seed);
            let mut raised = base;
            let mut lowered = base;
            let raise = raised.transition(Action::Raise);
            let lower = lowered.transition(Action::Lower);
            if raise.is_purchase() {
                assert!(lower.is_purchase(), "seed {}", seed);
                assert_eq!(raised.rng(), lowered.rng());
                assert_eq!(raised.customer(), lowered.customer());
                assert!(lowered.profit() < raised.profit());
            }
        }
    }

    #[test]
    #[should_panic(expected = "already ended")]
    fn test_transition_after_end_panics() {
        let (mut session, _) = run_to_end(845_126, &[Action::Raise]);
        session.transition(Action::Raise);
    }

    const REFERENCE_HISTORY: [Action; 23] = {
        use crate::action::Action::{CancelRaise as CR, Normal as N, Raise as R};
        [
            CR, R, R, CR, R, R, R, N, R, R, R, R, CR, R, CR, R, R, R, R, R, R, CR, R,
        ]
    };

    /// Replays the reference history and returns the session together with
    /// the number of purchases and departures.
    fn replay_reference(departures: DepartureCounting) -> (ShopSession, u32, u32) {
        let mut session = ShopSession::with_counting(1_508_351_762, 0, departures);
        let (mut buys, mut leaves) = (0, 0);
        for action in REFERENCE_HISTORY {
            let outcome = session.transition(action);
            if outcome.is_purchase() {
                buys += 1;
            } else if outcome.resolves_customer() {
                leaves += 1;
            }
        }
        (session, buys, leaves)
    }

    #[test]
    fn test_reference_history() {
        // 14 resolutions use 14 of the 20 slots, so the session is still open.
        let (session, buys, leaves) = replay_reference(DepartureCounting::Single);
        assert_eq!(session.profit(), 3325);
        assert!(!session.has_ended());
        assert_eq!((buys, leaves), (8, 6));
        assert_eq!(session.remaining_customers(), 5);
        assert_eq!(session.customers_left(), 6);
    }

    #[test]
    fn test_reference_history_with_double_departures() {
        // 8 purchases plus 6 departures at two slots each use all 20 slots.
        let (session, buys, leaves) = replay_reference(DepartureCounting::Double);
        assert_eq!(session.profit(), 3325);
        assert!(session.has_ended());
        assert_eq!((buys, leaves), (8, 6));
        assert_eq!(session.remaining_customers(), 0);
        assert_eq!(session.customers_left(), 0);
        assert_eq!(session.min_resolutions_left(), 0);
    }

    #[test]
    fn test_double_departures_use_two_slots() {
        let policies: [&[Action]; 3] = [
            &[Action::Raise],
            &[Action::Lower, Action::CancelRaise],
            &[Action::CancelRaise, Action::Raise, Action::Normal],
        ];
        for seed in SEEDS {
            for policy in policies {
                let mut session = ShopSession::with_counting(seed, 0, DepartureCounting::Double);
                let (mut slots, mut i) = (0, 0);
                while !session.has_ended() {
                    let before = session.customers_left();
                    let outcome = session.transition(policy[i % policy.len()]);
                    if outcome.is_purchase() {
                        slots += 1;
                        assert_eq!(session.customers_left(), before - 1);
                    } else if outcome.resolves_customer() {
                        slots += 2;
                        assert_eq!(session.customers_left(), before.saturating_sub(2));
                    }
                    i += 1;
                }
                // A departure on the last slot overshoots by one.
                assert!(slots == CUSTOMERS_PER_SESSION || slots == CUSTOMERS_PER_SESSION + 1);
            }
        }
    }

    #[test]
    fn test_departure_counting_keeps_draw_sequence() {
        // The counting only moves the end of the session, never the draws.
        let mut single = ShopSession::new(1_508_351_762);
        let mut double = ShopSession::with_counting(1_508_351_762, 0, DepartureCounting::Double);
        let (last, prefix) = REFERENCE_HISTORY.split_last().expect("non-empty history");
        for &action in prefix {
            assert_eq!(single.transition(action), double.transition(action));
            assert_eq!(single.rng(), double.rng());
            assert_eq!(single.customer(), double.customer());
        }
        assert_eq!(single.transition(*last), Outcome::Leave);
        assert_eq!(double.transition(*last), Outcome::LeaveEnded);
    }

    #[test]
    fn test_min_resolutions() {
        use DepartureCounting::{Double, Single};
        assert_eq!(Single.min_resolutions(0), 0);
        assert_eq!(Single.min_resolutions(7), 7);
        assert_eq!(Double.min_resolutions(0), 0);
        assert_eq!(Double.min_resolutions(1), 1);
        assert_eq!(Double.min_resolutions(2), 1);
        assert_eq!(Double.min_resolutions(7), 4);
        assert_eq!(Double.min_resolutions(20), 10);
        assert_eq!(DepartureCounting::default(), Single);
    }

    #[test]
    fn test_determinism_of_identical_histories() {
        let policy = [Action::CancelRaise, Action::Raise, Action::Raise, Action::Normal];
        let (a, _) = run_to_end(4_063_756_419, &policy);
        let (b, _) = run_to_end(4_063_756_419, &policy);
        assert_eq!(a, b);
    }
}

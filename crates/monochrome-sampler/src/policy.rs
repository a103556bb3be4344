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

//! Rollout policies.
//!
//! A policy picks the next action of a rollout from an exploration random
//! source. That source is unrelated to the game generator: it only decides
//! which branch to follow, never how the shop reacts.

use monochrome_model::action::Action;
use rand::Rng;

/// Picks the next action of a rollout.
pub trait RolloutPolicy: Send {
    fn name(&self) -> &str;
    fn choose<R>(&self, rng: &mut R) -> Action
    where
        R: Rng;
}

/// The reference weights: raise 60, cancel-raise 20, normal 10, lower 10.
pub const REFERENCE_WEIGHTS: [(Action, u32); 4] = [
    (Action::Raise, 60),
    (Action::CancelRaise, 20),
    (Action::Normal, 10),
    (Action::Lower, 10),
];

/// A fixed categorical distribution over actions.
///
/// A roll in `0..total_weight` is drawn and mapped onto the first entry whose
/// cumulative weight exceeds it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoricalPolicy {
    weights: Vec<(Action, u32)>,
    total_weight: u32,
}

impl Default for CategoricalPolicy {
    fn default() -> Self {
        Self::reference()
    }
}

impl CategoricalPolicy {
    /// Creates a policy from `(action, weight)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if no offer action has a positive weight, if an entry is a
    /// pre-advance, or if the weights overflow.
    pub fn new(weights: &[(Action, u32)]) -> Self {
        assert!(
            weights
                .iter()
                .any(|(action, weight)| action.is_offer() && *weight > 0),
            "called `CategoricalPolicy::new` without a positive offer weight"
        );
        assert!(
            weights
                .iter()
                .all(|(action, _)| *action != Action::PreAdvance),
            "called `CategoricalPolicy::new` with a pre-advance entry"
        );
        let total_weight = weights
            .iter()
            .try_fold(0u32, |acc, (_, weight)| acc.checked_add(*weight));
        let total_weight = match total_weight {
            Some(total) => total,
            None => panic!("called `CategoricalPolicy::new` with overflowing weights"),
        };
        Self {
            weights: weights.to_vec(),
            total_weight,
        }
    }

    #[inline]
    pub fn reference() -> Self {
        Self::new(&REFERENCE_WEIGHTS)
    }

    #[inline]
    pub fn weights(&self) -> &[(Action, u32)] {
        &self.weights
    }

    /// Maps a roll in `0..total_weight` onto an action.
    #[inline]
    fn action_for_roll(&self, mut roll: u32) -> Action {
        for &(action, weight) in &self.weights {
            if roll < weight {
                return action;
            }
            roll -= weight;
        }
        // Unreachable for rolls below the total weight.
        self.weights[self.weights.len() - 1].0
    }
}

impl RolloutPolicy for CategoricalPolicy {
    fn name(&self) -> &str {
        "CategoricalPolicy"
    }

    #[inline]
    fn choose<R>(&self, rng: &mut R) -> Action
    where
        R: Rng,
    {
        self.action_for_roll(rng.random_range(0..self.total_weight))
    }
}

impl std::fmt::Display for CategoricalPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CategoricalPolicy(")?;
        for (i, (action, weight)) in self.weights.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", action, weight)?;
        }
        write!(f, ")")
    }
}

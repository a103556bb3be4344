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

//! Player actions and their outcomes.
//!
//! An `Action` is one input of the player. Feeding it to a
//! [`crate::shop::ShopSession`] yields an `Outcome`. The draw consumption per
//! action is fixed:
//!
//! | action                                     | draws                                  |
//! |--------------------------------------------|----------------------------------------|
//! | `PreAdvance`, `CancelRaise`, `CancelLower` | 1, discarded                           |
//! | `CancelNormal`                             | 0                                      |
//! | `Normal`                                   | buy roll, plus a leave roll if refused |
//! | `Raise`, `Lower`                           | one tier draw, then as `Normal`        |
//!
//! Whenever a customer is resolved and the session goes on, two more draws
//! pick the next customer.

use thiserror::Error;

/// One input of the player.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum Action {
    /// Offer a raised price picked among the five most favourable tiers.
    Raise,
    /// Open the raise menu and back out. Consumes one draw.
    CancelRaise,
    /// Offer the regular price.
    Normal,
    /// Open the normal menu and back out. Consumes no draw.
    CancelNormal,
    /// Offer a lowered price picked among the three least favourable tiers.
    Lower,
    /// Open the lower menu and back out. Consumes one draw.
    CancelLower,
    /// Burn one draw before the first customer appears.
    PreAdvance,
}

impl Action {
    /// All actions.
    pub const ALL: [Action; 7] = [
        Action::Raise,
        Action::CancelRaise,
        Action::Normal,
        Action::CancelNormal,
        Action::Lower,
        Action::CancelLower,
        Action::PreAdvance,
    ];

    /// Returns `true` if the action presents an offer to the customer.
    #[inline]
    pub const fn is_offer(self) -> bool {
        matches!(self, Action::Raise | Action::Normal | Action::Lower)
    }

    /// Returns the upper-case display name.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Action::Raise => "RAISE",
            Action::CancelRaise => "CANCEL_RAISE",
            Action::Normal => "NORMAL",
            Action::CancelNormal => "CANCEL_NORMAL",
            Action::Lower => "LOWER",
            Action::CancelLower => "CANCEL_LOWER",
            Action::PreAdvance => "PRE_ADVANCE",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an [`Action`] from an unknown name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action `{0}`")]
pub struct ParseActionError(pub String);

impl std::str::FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Action::ALL
            .into_iter()
            .find(|action| action.name() == normalized)
            .ok_or_else(|| ParseActionError(s.to_string()))
    }
}

/// The result of feeding an [`Action`] to a session.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum Outcome {
    /// A pre-advance draw was burned.
    Advance,
    /// A menu was opened and closed; the customer is still waiting.
    Cancel,
    /// The offer was refused; the customer stays.
    Deny,
    /// The customer bought and the next customer was drawn.
    Buy,
    /// The last customer bought; the session is over.
    BuyEnded,
    /// The customer walked out and the next customer was drawn.
    Leave,
    /// The last customer walked out; the session is over.
    LeaveEnded,
}

impl Outcome {
    /// Returns `true` for both purchase variants.
    #[inline]
    pub const fn is_purchase(self) -> bool {
        matches!(self, Outcome::Buy | Outcome::BuyEnded)
    }

    /// Returns `true` if the current customer is done with (bought or left).
    #[inline]
    pub const fn resolves_customer(self) -> bool {
        matches!(
            self,
            Outcome::Buy | Outcome::BuyEnded | Outcome::Leave | Outcome::LeaveEnded
        )
    }

    /// Returns `true` if the outcome closed the session.
    #[inline]
    pub const fn ends_session(self) -> bool {
        matches!(self, Outcome::BuyEnded | Outcome::LeaveEnded)
    }

    /// Returns the upper-case display name.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Outcome::Advance => "ADVANCE",
            Outcome::Cancel => "CANCEL",
            Outcome::Deny => "DENY",
            Outcome::Buy => "BUY",
            Outcome::BuyEnded => "BUY_ENDED",
            Outcome::Leave => "LEAVE",
            Outcome::LeaveEnded => "LEAVE_ENDED",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action_accepts_names_and_dashes() {
        assert_eq!("RAISE".parse::<Action>(), Ok(Action::Raise));
        assert_eq!("cancel-raise".parse::<Action>(), Ok(Action::CancelRaise));
        assert_eq!(" lower ".parse::<Action>(), Ok(Action::Lower));
        for action in Action::ALL {
            assert_eq!(action.to_string().parse::<Action>(), Ok(action));
        }
    }

    #[test]
    fn test_parse_action_rejects_unknown() {
        let err = "haggle".parse::<Action>().unwrap_err();
        assert_eq!(err, ParseActionError("haggle".to_string()));
        assert_eq!(err.to_string(), "unknown action `haggle`");
    }

    #[test]
    fn test_offer_actions() {
        let offers: Vec<Action> = Action::ALL.into_iter().filter(|a| a.is_offer()).collect();
        assert_eq!(offers, vec![Action::Raise, Action::Normal, Action::Lower]);
    }

    #[test]
    fn test_outcome_classification() {
        assert!(Outcome::Buy.is_purchase());
        assert!(Outcome::BuyEnded.is_purchase());
        assert!(!Outcome::Leave.is_purchase());

        assert!(Outcome::LeaveEnded.resolves_customer());
        assert!(!Outcome::Deny.resolves_customer());
        assert!(!Outcome::Cancel.resolves_customer());
        assert!(!Outcome::Advance.resolves_customer());

        assert!(Outcome::BuyEnded.ends_session());
        assert!(Outcome::LeaveEnded.ends_session());
        assert!(!Outcome::Buy.ends_session());
    }
}

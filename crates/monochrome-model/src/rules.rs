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

//! Acceptance rules of a search.

use crate::{
    cost::CostModel,
    shop::{DepartureCounting, ShopSession},
};

/// Profit a session must reach to count as a candidate solution.
pub const REQUIRED_PROFIT: u32 = 3072;

/// The profit threshold, the cost model used to price steps, and how
/// departures count against the customers of a session.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ShopRules {
    pub required_profit: u32,
    pub costs: CostModel,
    pub departures: DepartureCounting,
}

impl ShopRules {
    #[inline]
    pub const fn new(required_profit: u32, costs: CostModel) -> Self {
        Self {
            required_profit,
            costs,
            departures: DepartureCounting::Single,
        }
    }

    #[inline]
    pub const fn with_departure_counting(mut self, departures: DepartureCounting) -> Self {
        self.departures = departures;
        self
    }

    /// Opens a session played under these rules.
    #[inline]
    pub fn open_session(&self, seed: u32, advances: u32) -> ShopSession {
        ShopSession::with_counting(seed, advances, self.departures)
    }

    /// Returns `true` if `session` ended with enough profit.
    #[inline]
    pub fn is_qualifying(&self, session: &ShopSession) -> bool {
        session.has_ended() && session.profit() >= self.required_profit
    }
}

impl Default for ShopRules {
    fn default() -> Self {
        Self::new(REQUIRED_PROFIT, CostModel::reference())
    }
}

impl std::fmt::Display for ShopRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ShopRules(required profit: {}, {}, departures: {})",
            self.required_profit, self.costs, self.departures
        )
    }
}

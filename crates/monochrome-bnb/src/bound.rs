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

//! Admissible lower bound on the final score reachable from a node.
//!
//! The bound assumes the best case for everything still open:
//!
//! - the current customer buys at `+50%`, and
//! - every further sale needed to close the profit gap is a medicine sale at
//!   `+50%` (the highest profit any sale can yield).
//!
//! The number of sales this requires is a lower bound on the sales any real
//! completion needs. If it exceeds the customers still to be resolved, no
//! completion can qualify and the node gets [`IMPOSSIBLE_SCORE`]. Otherwise
//! each required sale is charged the cheapest possible sale and each other
//! customer the cheapest possible resolution, both from the cost model. Every
//! customer needs at least one offer plus a resolution, so no completion can
//! be cheaper.
//!
//! When departures count twice, the slots not covered by sales may be used up
//! by departures, so only half of them (rounded up) are charged.

use monochrome_model::{
    cost::{IMPOSSIBLE_SCORE, Score},
    offer::OfferTier,
    rules::ShopRules,
    tables,
};
use monochrome_search::node::SearchNode;

/// Minimum number of `MAX_SALE_PROFIT` sales needed to cover `gap`.
#[inline]
pub fn sales_needed(gap: i64) -> u32 {
    if gap <= 0 {
        0
    } else {
        (gap as u64).div_ceil(tables::MAX_SALE_PROFIT as u64) as u32
    }
}

/// Returns a lower bound on the score of any qualifying completion of `node`,
/// or [`IMPOSSIBLE_SCORE`] if no completion can reach the required profit.
///
/// For an ended node the bound is its exact score.
pub fn optimistic_remaining_cost(node: &SearchNode, rules: &ShopRules) -> Score {
    let session = node.session();
    if session.has_ended() {
        return node.score();
    }

    let current_best = tables::profit(session.customer().item(), OfferTier::Plus50);
    let gap = rules.required_profit as i64 - session.profit() as i64 - current_best as i64;
    let sales = sales_needed(gap);
    let customers_left = session.customers_left();
    if sales > customers_left {
        return IMPOSSIBLE_SCORE;
    }

    let rest = session
        .departure_counting()
        .min_resolutions(customers_left - sales);
    node.score() + sales * rules.costs.sale_floor() + rest * rules.costs.customer_floor()
}

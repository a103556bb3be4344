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

//! Static probability and profit tables of the shop.
//!
//! All chances are percentages compared against a `scaled_draw(100)` roll:
//! a roll strictly below the chance succeeds. The buy-chance table is
//! monotone over the tier axis for every `(species, item)` pair in the sense
//! that every `Lower` tier accepts at least as often as every `Raise` tier.
//! The branch-and-bound solver relies on that property to skip lowered offers
//! once a raise already sells.

use crate::{
    customer::{Item, Species},
    offer::OfferTier,
};

/// Cumulative-free item chances per species: `[meat, porta potty, medicine]`.
const ITEM_CHANCES: [[u32; 3]; 4] = [
    [35, 50, 15], // Goburimon
    [30, 55, 15], // Gotsumon
    [50, 35, 15], // Weedmon
    [32, 35, 33], // Muchomon
];

const GOBURIMON_BUY: [u32; 9] = [45, 55, 65, 75, 85, 95, 97, 99, 100];
const GOTSUMON_BUY: [u32; 9] = [1, 10, 30, 50, 70, 90, 92, 94, 96];
const WEEDMON_BUY: [u32; 9] = [1, 1, 1, 20, 50, 80, 85, 90, 95];
const WEEDMON_MEDICINE_BUY: [u32; 9] = [2, 2, 2, 20, 50, 80, 85, 90, 95];
const MUCHOMON_BUY: [u32; 9] = [45, 50, 55, 60, 65, 70, 75, 80, 85];

/// Buy chance indexed by `[species][item][tier]`.
const BUY_CHANCES: [[[u32; 9]; 3]; 4] = [
    [GOBURIMON_BUY, GOBURIMON_BUY, GOBURIMON_BUY],
    [GOTSUMON_BUY, GOTSUMON_BUY, GOTSUMON_BUY],
    [WEEDMON_BUY, WEEDMON_BUY, WEEDMON_MEDICINE_BUY],
    [MUCHOMON_BUY, MUCHOMON_BUY, MUCHOMON_BUY],
];

/// Leave chance indexed by `[species][min(fail_count, 2)]`.
const LEAVE_CHANCES: [[u32; 3]; 4] = [[5, 15, 50], [10, 30, 70], [20, 60, 90], [50, 50, 100]];

/// Profit indexed by `[item][tier]`.
const PROFITS: [[u32; 9]; 3] = [
    [40, 35, 30, 25, 20, 15, 10, 5, 0],
    [240, 210, 180, 150, 120, 90, 60, 30, 0],
    [800, 700, 600, 500, 400, 300, 200, 100, 0],
];

/// The limit of the species roll (`scaled_draw(9)`).
pub const SPECIES_ROLL_LIMIT: u32 = 9;

/// The limit of every percentage roll (`scaled_draw(100)`).
pub const PERCENT_ROLL_LIMIT: u32 = 100;

/// The highest profit a single sale can yield (medicine at `+50%`).
pub const MAX_SALE_PROFIT: u32 = PROFITS[Item::Medicine as usize][OfferTier::Plus50 as usize];

/// Maps a species roll in `0..9` onto a species.
#[inline]
pub const fn species_from_roll(roll: u32) -> Species {
    match roll {
        0..=2 => Species::Goburimon,
        3..=5 => Species::Gotsumon,
        6..=7 => Species::Weedmon,
        _ => Species::Muchomon,
    }
}

/// Maps an item roll in `0..100` onto the item requested by `species`.
#[inline]
pub const fn item_from_roll(species: Species, roll: u32) -> Item {
    let chances = &ITEM_CHANCES[species.index()];
    if roll < chances[0] {
        Item::Meat
    } else if roll < chances[0] + chances[1] {
        Item::PortaPotty
    } else {
        Item::Medicine
    }
}

/// Returns the percentage chance that `species` buys `item` at `tier`.
#[inline(always)]
pub const fn buy_chance(species: Species, item: Item, tier: OfferTier) -> u32 {
    BUY_CHANCES[species.index()][item.index()][tier.index()]
}

/// Returns the percentage chance that `species` walks out after
/// `fail_count` rejected offers. The count saturates at 2.
#[inline(always)]
pub const fn leave_chance(species: Species, fail_count: u32) -> u32 {
    let column = if fail_count > 2 { 2 } else { fail_count as usize };
    LEAVE_CHANCES[species.index()][column]
}

/// Returns the profit of selling `item` at `tier`.
#[inline(always)]
pub const fn profit(item: Item, tier: OfferTier) -> u32 {
    PROFITS[item.index()][tier.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_tiers_dominate_raise_tiers() {
        // Every lowered offer must accept whenever any raised offer accepts
        // with the same roll.
        for species in Species::ALL {
            for item in Item::ALL {
                let best_raise = OfferTier::RAISE_TIERS
                    .iter()
                    .map(|tier| buy_chance(species, item, *tier))
                    .max()
                    .unwrap();
                let worst_lower = OfferTier::LOWER_TIERS
                    .iter()
                    .map(|tier| buy_chance(species, item, *tier))
                    .min()
                    .unwrap();
                assert!(
                    worst_lower >= best_raise,
                    "{} / {}: lower {} < raise {}",
                    species,
                    item,
                    worst_lower,
                    best_raise
                );
            }
        }
    }

    #[test]
    fn test_roll_level_domination_for_every_raw_roll() {
        for species in Species::ALL {
            for item in Item::ALL {
                for roll in 0..PERCENT_ROLL_LIMIT {
                    for raise in OfferTier::RAISE_TIERS {
                        if roll < buy_chance(species, item, raise) {
                            for lower in OfferTier::LOWER_TIERS {
                                assert!(roll < buy_chance(species, item, lower));
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_lower_sales_never_beat_raise_sales() {
        for item in Item::ALL {
            let worst_raise = OfferTier::RAISE_TIERS
                .iter()
                .map(|tier| profit(item, *tier))
                .min()
                .unwrap();
            let best_lower = OfferTier::LOWER_TIERS
                .iter()
                .map(|tier| profit(item, *tier))
                .max()
                .unwrap();
            assert!(best_lower < worst_raise);
        }
    }

    #[test]
    fn test_species_thresholds() {
        let species: Vec<Species> = (0..SPECIES_ROLL_LIMIT).map(species_from_roll).collect();
        assert_eq!(
            species,
            vec![
                Species::Goburimon,
                Species::Goburimon,
                Species::Goburimon,
                Species::Gotsumon,
                Species::Gotsumon,
                Species::Gotsumon,
                Species::Weedmon,
                Species::Weedmon,
                Species::Muchomon,
            ]
        );
    }

    #[test]
    fn test_item_thresholds() {
        assert_eq!(item_from_roll(Species::Goburimon, 34), Item::Meat);
        assert_eq!(item_from_roll(Species::Goburimon, 35), Item::PortaPotty);
        assert_eq!(item_from_roll(Species::Goburimon, 84), Item::PortaPotty);
        assert_eq!(item_from_roll(Species::Goburimon, 85), Item::Medicine);
        assert_eq!(item_from_roll(Species::Muchomon, 66), Item::PortaPotty);
        assert_eq!(item_from_roll(Species::Muchomon, 67), Item::Medicine);
        assert_eq!(item_from_roll(Species::Weedmon, 49), Item::Meat);
    }

    #[test]
    fn test_item_chances_sum_to_hundred() {
        for chances in ITEM_CHANCES {
            assert_eq!(chances.iter().sum::<u32>(), 100);
        }
    }

    #[test]
    fn test_leave_chance_saturates() {
        assert_eq!(leave_chance(Species::Gotsumon, 0), 10);
        assert_eq!(leave_chance(Species::Gotsumon, 2), 70);
        assert_eq!(leave_chance(Species::Gotsumon, 7), 70);
        assert_eq!(leave_chance(Species::Muchomon, u32::MAX), 100);
    }

    #[test]
    fn test_max_sale_profit() {
        assert_eq!(MAX_SALE_PROFIT, 800);
        for item in Item::ALL {
            for tier in OfferTier::ALL {
                assert!(profit(item, tier) <= MAX_SALE_PROFIT);
            }
        }
    }
}

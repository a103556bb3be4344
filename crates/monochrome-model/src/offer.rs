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

//! Offer tiers.
//!
//! A price offer is one of nine discrete adjustments, from `+50%` down to
//! `-30%`. The discriminant is the column index into the buy-chance and profit
//! tables. `Raise` picks uniformly among the five most favourable tiers,
//! `Normal` is fixed to the midpoint, and `Lower` picks uniformly among the
//! three least favourable tiers.

/// One of the nine price adjustment levels.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum OfferTier {
    Plus50 = 0,
    Plus40 = 1,
    Plus30 = 2,
    Plus20 = 3,
    Plus10 = 4,
    Normal = 5,
    Minus10 = 6,
    Minus20 = 7,
    Minus30 = 8,
}

impl OfferTier {
    /// All tiers in table order.
    pub const ALL: [OfferTier; 9] = [
        OfferTier::Plus50,
        OfferTier::Plus40,
        OfferTier::Plus30,
        OfferTier::Plus20,
        OfferTier::Plus10,
        OfferTier::Normal,
        OfferTier::Minus10,
        OfferTier::Minus20,
        OfferTier::Minus30,
    ];

    /// The tiers a raise can land on.
    pub const RAISE_TIERS: [OfferTier; 5] = [
        OfferTier::Plus50,
        OfferTier::Plus40,
        OfferTier::Plus30,
        OfferTier::Plus20,
        OfferTier::Plus10,
    ];

    /// The tiers a lowered offer can land on.
    pub const LOWER_TIERS: [OfferTier; 3] =
        [OfferTier::Minus10, OfferTier::Minus20, OfferTier::Minus30];

    /// Returns the table index of the tier.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the tier at table index `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..9`.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        assert!(
            index < Self::ALL.len(),
            "called `OfferTier::from_index` with index out of bounds: the len is {} but the index is {}",
            Self::ALL.len(),
            index
        );
        Self::ALL[index]
    }

    /// Returns the signed percentage adjustment of the tier.
    #[inline]
    pub const fn percent(self) -> i32 {
        50 - 10 * (self as i32)
    }
}

impl std::fmt::Display for OfferTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+}%", self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::OfferTier;

    #[test]
    fn test_from_index_roundtrips_table_order() {
        for (i, tier) in OfferTier::ALL.iter().enumerate() {
            assert_eq!(OfferTier::from_index(i), *tier);
        }
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_from_index_out_of_range_panics() {
        OfferTier::from_index(9);
    }

    #[test]
    fn test_percentages() {
        assert_eq!(OfferTier::Plus50.percent(), 50);
        assert_eq!(OfferTier::Normal.percent(), 0);
        assert_eq!(OfferTier::Minus30.percent(), -30);
        assert_eq!(OfferTier::Plus10.to_string(), "+10%");
        assert_eq!(OfferTier::Minus20.to_string(), "-20%");
    }

    #[test]
    fn test_raise_and_lower_tiers_are_disjoint_from_normal() {
        assert!(!OfferTier::RAISE_TIERS.contains(&OfferTier::Normal));
        assert!(!OfferTier::LOWER_TIERS.contains(&OfferTier::Normal));
        assert!(
            OfferTier::RAISE_TIERS
                .iter()
                .all(|tier| *tier < OfferTier::Normal)
        );
        assert!(
            OfferTier::LOWER_TIERS
                .iter()
                .all(|tier| *tier > OfferTier::Normal)
        );
    }
}

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

//! Customers of the shop.
//!
//! A customer is a `(Species, Item)` pair drawn from the generator plus the
//! number of consecutive rejected offers it has seen. The failure count only
//! lives as long as the customer; a freshly drawn customer always starts at 0.

/// The four species that visit the shop.
///
/// The discriminants are the row indices of the static tables in
/// [`crate::tables`].
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum Species {
    Goburimon = 0,
    Gotsumon = 1,
    Weedmon = 2,
    Muchomon = 3,
}

impl Species {
    /// All species in table order.
    pub const ALL: [Species; 4] = [
        Species::Goburimon,
        Species::Gotsumon,
        Species::Weedmon,
        Species::Muchomon,
    ];

    /// Returns the table index of the species.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the upper-case display name.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Species::Goburimon => "GOBURIMON",
            Species::Gotsumon => "GOTSUMON",
            Species::Weedmon => "WEEDMON",
            Species::Muchomon => "MUCHOMON",
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The three goods a customer may ask for.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum Item {
    Meat = 0,
    PortaPotty = 1,
    Medicine = 2,
}

impl Item {
    /// All items in table order.
    pub const ALL: [Item; 3] = [Item::Meat, Item::PortaPotty, Item::Medicine];

    /// Returns the table index of the item.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the upper-case display name.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Item::Meat => "MEAT",
            Item::PortaPotty => "PORTA_POTTY",
            Item::Medicine => "MEDICINE",
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The customer currently being served.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Customer {
    species: Species,
    item: Item,
    fail_count: u32,
}

impl Customer {
    /// Creates a fresh customer with a failure count of zero.
    #[inline]
    pub const fn new(species: Species, item: Item) -> Self {
        Self {
            species,
            item,
            fail_count: 0,
        }
    }

    #[inline(always)]
    pub const fn species(&self) -> Species {
        self.species
    }

    #[inline(always)]
    pub const fn item(&self) -> Item {
        self.item
    }

    /// Number of consecutive offers this customer did not accept.
    #[inline(always)]
    pub const fn fail_count(&self) -> u32 {
        self.fail_count
    }

    #[inline]
    pub(crate) fn record_failure(&mut self) {
        self.fail_count = self.fail_count.saturating_add(1);
    }
}

impl std::fmt::Display for Customer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Customer({} wants {}, fails: {})",
            self.species, self.item, self.fail_count
        )
    }
}

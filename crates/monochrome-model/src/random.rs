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

//! # Deterministic Generator
//!
//! The linear congruential generator that drives every probability decision of
//! the shop. The state is a single `u32`; each draw advances it with
//! `state = state * 0x41C64E6D + 0x3039 (mod 2^32)` and yields bits `16..=30`
//! of the new state, a 15-bit value in `0..32768`.
//!
//! ## Range reduction
//!
//! `scaled_draw(limit)` maps a draw onto `0..limit` by multiplying and shifting
//! (`draw * limit >> 15`). This is **not** equivalent to `draw % limit`; the
//! simulated system uses the multiply-and-shift form, and every table lookup
//! downstream depends on reproducing it bit for bit. `modulo_draw` exists for
//! completeness only.
//!
//! ## Usage
//!
//! ```rust
//! use monochrome_model::random::GameRng;
//!
//! let mut a = GameRng::new(3_580_817_068);
//! let mut b = a;
//!
//! a.advance(3);
//! for _ in 0..3 {
//!     b.draw();
//! }
//! assert_eq!(a.draw(), b.draw());
//! ```

/// The 15-bit deterministic pseudo-random generator of the shop.
///
/// The generator is `Copy`: each search branch owns an independent value and
/// cloning a branch is a plain bit copy of the state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct GameRng {
    state: u32,
}

impl GameRng {
    /// The multiplier of the linear congruential step.
    pub const MULTIPLIER: u32 = 0x41C6_4E6D;
    /// The increment of the linear congruential step.
    pub const INCREMENT: u32 = 0x3039;
    /// The exclusive upper limit of a raw draw.
    pub const DRAW_RANGE: u32 = 0x8000;

    /// Creates a generator positioned at `seed`.
    #[inline]
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Returns the raw 32-bit state.
    #[inline]
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Overwrites the raw 32-bit state.
    #[inline]
    pub fn set_state(&mut self, state: u32) {
        self.state = state;
    }

    /// Advances the state once and returns bits `16..=30` of the new state.
    #[inline]
    pub fn draw(&mut self) -> u16 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        ((self.state >> 16) & 0x7FFF) as u16
    }

    /// Draws a value in `0..limit` using multiply-and-shift range reduction.
    ///
    /// Returns `0` for a `limit` of `0`.
    #[inline]
    pub fn scaled_draw(&mut self, limit: u32) -> u32 {
        ((self.draw() as u64 * limit as u64) >> 15) as u32
    }

    /// Draws a value in `0..limit` using modulo range reduction.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is zero.
    #[inline]
    pub fn modulo_draw(&mut self, limit: u32) -> u32 {
        assert!(
            limit > 0,
            "called `GameRng::modulo_draw` with a limit of zero"
        );
        self.draw() as u32 % limit
    }

    /// Discards `count` draws.
    #[inline]
    pub fn advance(&mut self, count: u32) {
        for _ in 0..count {
            self.draw();
        }
    }
}

impl std::fmt::Display for GameRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GameRng(state: {:#010x})", self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::GameRng;
    use proptest::prelude::*;

    #[test]
    fn test_first_draws_match_reference_sequence() {
        let mut rng = GameRng::new(3_580_817_068);
        let draws: Vec<u16> = (0..5).map(|_| rng.draw()).collect();
        assert_eq!(draws, vec![29180, 31431, 4021, 2866, 6757]);
        assert_eq!(rng.state(), 442_881_521);
    }

    #[test]
    fn test_zero_seed_sequence() {
        let mut rng = GameRng::new(0);
        assert_eq!(rng.draw(), 0);
        assert_eq!(rng.state(), 12345);
        assert_eq!(rng.draw(), 21468);
        assert_eq!(rng.draw(), 9988);
        assert_eq!(rng.state(), 2_802_067_423);
    }

    #[test]
    fn test_independent_instances_are_identical() {
        let mut a = GameRng::new(1_508_351_762);
        let mut b = GameRng::new(1_508_351_762);
        for _ in 0..1000 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn test_scaled_draw_is_not_modulo() {
        // 29180 * 9 >> 15 == 8, while 29180 % 9 == 2.
        let mut scaled = GameRng::new(3_580_817_068);
        let mut modulo = scaled;
        assert_eq!(scaled.scaled_draw(9), 8);
        assert_eq!(modulo.modulo_draw(9), 2);
        assert_eq!(scaled, modulo);
    }

    #[test]
    fn test_scaled_draw_zero_limit() {
        let mut rng = GameRng::new(7);
        assert_eq!(rng.scaled_draw(0), 0);
    }

    #[test]
    #[should_panic(expected = "limit of zero")]
    fn test_modulo_draw_zero_limit_panics() {
        let mut rng = GameRng::new(7);
        rng.modulo_draw(0);
    }

    #[test]
    fn test_display_shows_state() {
        let rng = GameRng::new(0xDEAD_BEEF);
        assert_eq!(format!("{}", rng), "GameRng(state: 0xdeadbeef)");
    }

    proptest! {
        #[test]
        fn prop_advance_matches_repeated_draws(seed in any::<u32>(), n in 0u32..512) {
            let mut advanced = GameRng::new(seed);
            let mut stepped = GameRng::new(seed);
            advanced.advance(n);
            for _ in 0..n {
                stepped.draw();
            }
            prop_assert_eq!(advanced.draw(), stepped.draw());
            prop_assert_eq!(advanced.state(), stepped.state());
        }

        #[test]
        fn prop_draws_are_fifteen_bits(seed in any::<u32>()) {
            let mut rng = GameRng::new(seed);
            for _ in 0..64 {
                prop_assert!((rng.draw() as u32) < GameRng::DRAW_RANGE);
            }
        }

        #[test]
        fn prop_scaled_draw_stays_below_limit(seed in any::<u32>(), limit in 1u32..=100) {
            let mut rng = GameRng::new(seed);
            for _ in 0..64 {
                prop_assert!(rng.scaled_draw(limit) < limit);
            }
        }
    }
}

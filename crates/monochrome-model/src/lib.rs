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

//! # Monochrome Model
//!
//! **The simulated shop that every search in this workspace explores.**
//!
//! The crate reproduces the Monochrome shop minigame bit for bit: a linear
//! congruential generator drives customer arrivals, offer selection and every
//! buy/leave decision, so a session is a pure function of its seed and of the
//! actions fed to it.
//!
//! ## Architecture
//!
//! * **`random`**: The deterministic generator and its range reductions.
//! * **`customer`**, **`offer`**, **`tables`**: The enumerations and the static
//!   probability and profit tables.
//! * **`action`**: Player inputs and their outcomes.
//! * **`shop`**: `ShopSession`, the 20-customer transaction state machine.
//! * **`cost`**, **`step`**, **`rules`**: Time cost of each step, the recorded
//!   step, and the acceptance threshold of a search.
//!
//! ## Design Philosophy
//!
//! 1.  **Value Semantics**: Sessions are small `Copy` values. Branching a search
//!     copies the session; nothing is shared.
//! 2.  **Exactness**: Every draw is consumed in the same order as in the game.
//!     Changing a range reduction or a table breaks every downstream decision.
//! 3.  **Fail-Fast**: Misuse, such as feeding an ended session, panics.

pub mod action;
pub mod cost;
pub mod customer;
pub mod offer;
pub mod random;
pub mod rules;
pub mod shop;
pub mod step;
pub mod tables;

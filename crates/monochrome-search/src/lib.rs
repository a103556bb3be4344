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

//! # Monochrome Search
//!
//! **Shared building blocks of every search strategy.**
//!
//! * **`node`**: `SearchNode`, a session snapshot plus its recorded history.
//! * **`solution`**: The extracted best sequence and its reproduction data.
//! * **`incumbent`**: `SharedIncumbent`, the best solution shared by all
//!   workers, with a lock-free score read and `abort()`.
//! * **`monitor`**: Lifecycle hooks and the cooperative stop signal.
//! * **`portfolio`**: The `PortfolioSolver` trait implemented by each strategy.
//! * **`result`**, **`stats`**: Outcome types reported by the orchestrator.

pub mod incumbent;
pub mod monitor;
pub mod node;
pub mod portfolio;
pub mod result;
pub mod solution;
pub mod stats;

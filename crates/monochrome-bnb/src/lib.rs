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

//! # Monochrome Branch-and-Bound
//!
//! Exact search over shop action sequences. The solver expands
//! [`SearchNode`](monochrome_search::node::SearchNode)s in waves, orders every
//! new frontier by an admissible lower bound and drops whatever cannot beat
//! the incumbent, finish within the length limit, or improve on a sibling.
//!
//! - `bound`: the admissible lower bound.
//! - `bnb`: the wave-expansion solver and the branching rule.
//! - `incumbent`: local and shared incumbent access.
//! - `monitor`: tree-search monitors (no-op, tracing log, composite, wrapper).
//! - `portfolio`: adapter that runs the solver as a portfolio worker.
//! - `result`, `stats`: run outcome and counters.

pub mod bnb;
pub mod bound;
pub mod incumbent;
pub mod monitor;
pub mod portfolio;
pub mod result;
pub mod stats;

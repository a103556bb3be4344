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

//! Cooperative cancellation from outside the solver.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// A cloneable handle on the stop flag of a [`Solver`](crate::solver::Solver).
///
/// Workers poll the flag at coarse points only: before each branch-and-bound
/// wave recursion and before each sampler attempt. After [`stop`](Self::stop)
/// a run therefore finishes within one wave or one rollout per worker.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests every worker of the current run to stop.
    #[inline]
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn flag(&self) -> &AtomicBool {
        &self.flag
    }
}

#[cfg(test)]
mod tests {
    use super::StopHandle;

    #[test]
    fn test_clones_share_the_flag() {
        let handle = StopHandle::new();
        let clone = handle.clone();
        assert!(!clone.is_stopped());

        std::thread::spawn(move || clone.stop())
            .join()
            .expect("stopping thread panicked");
        assert!(handle.is_stopped());

        handle.reset();
        assert!(!handle.is_stopped());
    }
}

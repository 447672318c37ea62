//! Benchmark Run State
//!
//! `BenchState` is the mutable context handed to a benchmark function for
//! one attempt: the target iteration count and a timestamp buffer with one
//! fencepost entry per iteration boundary. The benchmark loops on
//! [`BenchState::keep_running`], which records a timestamp on every call
//! (including one final call past the last logical iteration), so an attempt
//! at `iters` iterations always captures exactly `iters + 1` timestamps.

use crate::clock;

/// Per-benchmark mutable run context.
///
/// Invariant: the timestamp buffer length is always exactly `iters + 1`.
pub struct BenchState<'a> {
    name: &'a str,
    iters: u64,
    index: u64,
    ns: Vec<i64>,
}

impl<'a> BenchState<'a> {
    /// Create state for a fresh benchmark: one target iteration, two
    /// timestamp slots.
    pub(crate) fn new(name: &'a str) -> Self {
        Self {
            name,
            iters: 1,
            index: 0,
            ns: vec![0; 2],
        }
    }

    /// Record a timestamp and report whether the benchmark should keep
    /// iterating.
    ///
    /// Designed as the loop condition of the code under measurement:
    ///
    /// ```ignore
    /// fn my_bench(state: &mut BenchState) {
    ///     while state.keep_running() {
    ///         work();
    ///     }
    /// }
    /// ```
    ///
    /// Returns `false` exactly once per attempt, on the call that writes the
    /// closing fencepost timestamp at `index == iters`.
    #[inline]
    pub fn keep_running(&mut self) -> bool {
        self.ns[self.index as usize] = clock::now_ns();
        let keep = self.index < self.iters;
        self.index += 1;
        keep
    }

    /// Display name of the benchmark under measurement.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Target iteration count for the current attempt.
    pub fn iterations(&self) -> u64 {
        self.iters
    }

    /// Elapsed nanoseconds between the first and last recorded timestamps.
    ///
    /// Only meaningful after a completed attempt (all `iters + 1` slots
    /// written).
    pub(crate) fn total_ns(&self) -> i64 {
        self.ns[self.iters as usize] - self.ns[0]
    }

    /// Recorded timestamps, one per iteration boundary.
    pub(crate) fn timestamps(&self) -> &[i64] {
        &self.ns
    }

    /// Discard timing data and retarget the attempt at a larger iteration
    /// count. The old buffer is dropped and a fresh `new_iters + 1` buffer
    /// allocated.
    pub(crate) fn grow(&mut self, new_iters: u64) {
        self.iters = new_iters;
        self.index = 0;
        self.ns = vec![0; (new_iters + 1) as usize];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The probe must be callable exactly iters + 1 times before returning
    /// false, with the false return on the final (fencepost) call.
    #[test]
    fn probe_returns_false_exactly_on_fencepost() {
        let mut state = BenchState::new("probe");
        state.grow(4);

        let mut calls = 0u64;
        while state.keep_running() {
            calls += 1;
        }
        // Loop body ran `iters` times; the probe itself ran once more.
        assert_eq!(calls, 4);
        assert_eq!(state.index, 5);

        // Every slot was written, including the fencepost.
        assert_eq!(state.ns.len(), 5);
        assert!(state.ns.iter().all(|&t| t != 0));
    }

    #[test]
    fn fresh_state_targets_one_iteration() {
        let state = BenchState::new("fresh");
        assert_eq!(state.iterations(), 1);
        assert_eq!(state.ns.len(), 2);
    }

    #[test]
    fn grow_reallocates_to_fencepost_size() {
        let mut state = BenchState::new("grow");
        for target in [10, 100, 1000] {
            state.grow(target);
            assert_eq!(state.iterations(), target);
            assert_eq!(state.ns.len() as u64, target + 1);
            assert_eq!(state.index, 0);
        }
    }

    #[test]
    fn total_ns_spans_first_to_last() {
        let mut state = BenchState::new("span");
        state.grow(3);
        state.ns = vec![100, 150, 210, 280];
        assert_eq!(state.total_ns(), 180);
    }

    #[test]
    fn timestamps_are_non_decreasing_within_attempt() {
        let mut state = BenchState::new("mono");
        state.grow(32);
        while state.keep_running() {}

        for pair in state.ns.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }
}

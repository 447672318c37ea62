//! Benchmark Reporting
//!
//! Converts the raw timestamp buffer of a stable attempt into a report:
//! per-iteration deltas, aggregate total, and the one-line console summary.

use crate::state::BenchState;

/// Per-iteration latencies derived from a fencepost timestamp sequence.
///
/// Pure transformation: for `n + 1` absolute timestamps, returns the `n`
/// consecutive differences. The input is left untouched.
pub fn iteration_deltas(ns: &[i64]) -> Vec<i64> {
    ns.windows(2).map(|pair| pair[1] - pair[0]).collect()
}

/// Final measurement for one benchmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchReport {
    /// Display name.
    pub name: String,
    /// Iteration count of the accepted attempt.
    pub iterations: u64,
    /// Wall time of the accepted attempt in nanoseconds.
    pub total_ns: i64,
    /// Per-iteration latencies, one entry per iteration.
    pub deltas: Vec<i64>,
}

impl BenchReport {
    /// Build a report from a completed, stable attempt.
    pub(crate) fn from_state(state: &BenchState<'_>) -> Self {
        Self {
            name: state.name().to_string(),
            iterations: state.iterations(),
            total_ns: state.total_ns(),
            deltas: iteration_deltas(state.timestamps()),
        }
    }

    /// Average per-iteration latency in nanoseconds.
    pub fn avg_ns(&self) -> f64 {
        self.total_ns as f64 / self.iterations as f64
    }

    /// Total wall time in seconds.
    pub fn total_secs(&self) -> f64 {
        self.total_ns as f64 / 1e9
    }
}

impl std::fmt::Display for BenchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} iterations, avg {} ns, total {} s",
            self.name,
            self.iterations,
            self.avg_ns(),
            self.total_secs()
        )
    }
}

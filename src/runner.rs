//! Calibration & Run Loop
//!
//! The core of the harness. Each benchmark starts at a single iteration and
//! is re-run from scratch with a multiplicatively grown iteration count
//! until the attempt either spans the minimum time floor or hits the
//! iteration ceiling. Prior timing data is discarded on every calibration
//! step; only the final, stable attempt is reported.

use crate::report::BenchReport;
use crate::state::BenchState;

/// Signature of a registered benchmark function.
pub type BenchFn = fn(&mut BenchState);

/// Calibration thresholds.
///
/// Defaults match the classic harness constants: a 500ms time floor and a
/// ceiling of 1e9 iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Hard ceiling on the iteration count of a single attempt.
    pub max_iterations: u64,
    /// Minimum elapsed time for an attempt to be accepted, in nanoseconds.
    pub min_time_ns: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_iterations: 1_000_000_000,
            min_time_ns: 500_000_000,
        }
    }
}

/// Whether a completed attempt is stable enough to report: enough
/// iterations, or enough elapsed time.
fn is_stable(state: &BenchState<'_>, settings: &Settings) -> bool {
    state.iterations() >= settings.max_iterations || state.total_ns() >= settings.min_time_ns
}

/// Estimate the iteration count for the next attempt.
///
/// When the attempt already covered at least 10% of the time floor, the
/// elapsed time is trusted enough to extrapolate linearly. Below that, a
/// fixed 10x ramp is used instead: dividing by a near-zero or
/// resolution-dominated `total_ns` would produce a wildly oversized
/// multiplier.
fn next_iteration_count(iters: u64, total_ns: i64, settings: &Settings) -> u64 {
    let multiplier = if total_ns * 10 > settings.min_time_ns {
        settings.min_time_ns as f64 / total_ns as f64
    } else {
        10.0
    };

    let next = (iters as f64 * multiplier) as u64;
    next.min(settings.max_iterations)
}

/// Run one benchmark to a stable measurement and produce its report.
///
/// The benchmark function is invoked once per attempt and is expected to
/// loop on [`BenchState::keep_running`]. The first attempt always runs
/// exactly one iteration; calibration only ramps up, never down.
pub fn run_benchmark<'a, F>(name: &'a str, mut func: F, settings: &Settings) -> BenchReport
where
    F: FnMut(&mut BenchState<'a>),
{
    let mut state = BenchState::new(name);

    loop {
        func(&mut state);

        if is_stable(&state, settings) {
            break;
        }

        let next = next_iteration_count(state.iterations(), state.total_ns(), settings);
        tracing::debug!(
            benchmark = name,
            iters = state.iterations(),
            total_ns = state.total_ns(),
            next_iters = next,
            "attempt below time floor, recalibrating"
        );
        state.grow(next);
    }

    tracing::debug!(
        benchmark = name,
        iters = state.iterations(),
        total_ns = state.total_ns(),
        "attempt accepted"
    );
    BenchReport::from_state(&state)
}

/// Run a sequence of (name, function) pairs in registration order.
pub fn run_suite<'a, I>(pairs: I, settings: &Settings) -> Vec<BenchReport>
where
    I: IntoIterator<Item = (&'a str, BenchFn)>,
{
    pairs
        .into_iter()
        .map(|(name, func)| run_benchmark(name, func, settings))
        .collect()
}

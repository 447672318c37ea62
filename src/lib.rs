#![warn(missing_docs)]
//! # tickbench
//!
//! Adaptive micro-benchmark harness with time-floor calibration.
//!
//! Each registered benchmark is re-run with a multiplicatively growing
//! iteration count until one attempt spans a minimum time floor (default
//! 500ms) or hits an iteration ceiling (default 1e9), then a one-line
//! summary with the average per-iteration latency and total wall time is
//! printed:
//!
//! ```text
//! fib: 8192 iterations, avg 61239.5 ns, total 0.501674 s
//! ```
//!
//! Benchmark functions receive a [`BenchState`] and loop on the
//! [`BenchState::keep_running`] probe, which timestamps every iteration
//! boundary:
//!
//! ```ignore
//! use tickbench::prelude::*;
//!
//! fn fib(state: &mut BenchState) {
//!     while state.keep_running() {
//!         std::hint::black_box(fibonacci(25));
//!     }
//! }
//!
//! tickbench::benchmark_main!(fib);
//! ```
//!
//! Thresholds can be overridden per run (`--min-time 10ms`,
//! `--max-iterations 1000000`) or in a `tickbench.toml` at the project root.
//!
//! The harness is single-threaded and sequential: one process, one
//! benchmark at a time, no warmup discarding and no statistics beyond the
//! mean.

mod clock;
mod state;

pub mod cli;
pub mod config;
pub mod report;
pub mod runner;

pub use clock::now_ns;
pub use report::{iteration_deltas, BenchReport};
pub use runner::{run_benchmark, run_suite, BenchFn, Settings};
pub use state::BenchState;

/// Run the harness CLI with the registered functions.
pub use cli::run;

/// Prelude for convenient imports in benchmark binaries.
pub mod prelude {
    pub use crate::{benchmark_main, BenchState, Settings};
}

/// Generate a `main` that runs the named benchmark functions through the
/// harness.
///
/// The macro stringifies its argument list into the comma-separated name
/// string and passes the functions alongside as a parallel slice, so the two
/// sequences are equal by construction:
///
/// ```ignore
/// fn parse(state: &mut BenchState) {
///     while state.keep_running() {
///         std::hint::black_box(document().parse());
///     }
/// }
///
/// tickbench::benchmark_main!(parse);
/// ```
#[macro_export]
macro_rules! benchmark_main {
    ($($func:ident),+ $(,)?) => {
        fn main() -> ::std::process::ExitCode {
            $crate::run(
                &[$($func as $crate::BenchFn),+],
                stringify!($($func),+),
            )
        }
    };
}

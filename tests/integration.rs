//! Integration tests for tickbench
//!
//! These tests drive full calibration runs end to end, with thresholds small
//! enough to finish in milliseconds.

use tickbench::{run_benchmark, run_suite, BenchFn, BenchState, Settings};

fn noop(state: &mut BenchState) {
    while state.keep_running() {}
}

fn busy(state: &mut BenchState) {
    while state.keep_running() {
        std::hint::black_box((0..500u64).fold(0, |acc, i| acc ^ i));
    }
}

fn slow(state: &mut BenchState) {
    while state.keep_running() {
        std::thread::sleep(std::time::Duration::from_millis(3));
    }
}

/// Constant-work benchmarks terminate with either enough time or the
/// iteration ceiling, never beyond it.
#[test]
fn calibration_reaches_a_stable_window() {
    let settings = Settings {
        max_iterations: 10_000_000,
        min_time_ns: 2_000_000, // 2ms
    };

    let report = run_benchmark("busy", busy, &settings);

    assert!(report.iterations >= 1);
    assert!(report.iterations <= settings.max_iterations);
    assert!(
        report.iterations == settings.max_iterations || report.total_ns >= settings.min_time_ns,
        "unstable report: {} iterations, {} ns",
        report.iterations,
        report.total_ns
    );
}

/// The delta sequence telescopes back to the aggregate: one entry per
/// iteration, summing exactly to the total.
#[test]
fn deltas_account_for_the_whole_window() {
    let settings = Settings {
        max_iterations: 100_000,
        min_time_ns: 500_000, // 0.5ms
    };

    let report = run_benchmark("busy", busy, &settings);

    assert_eq!(report.deltas.len() as u64, report.iterations);
    assert_eq!(report.deltas.iter().sum::<i64>(), report.total_ns);
    assert_eq!(
        report.avg_ns(),
        report.total_ns as f64 / report.iterations as f64
    );
    assert_eq!(report.total_secs(), report.total_ns as f64 / 1e9);
}

/// A single call slower than the floor is accepted on the very first
/// attempt: calibration never ramps past it.
#[test]
fn slow_call_is_accepted_at_one_iteration() {
    let settings = Settings {
        max_iterations: 1_000_000,
        min_time_ns: 1_000_000, // 1ms, while one call sleeps 3ms
    };

    let report = run_benchmark("slow", slow, &settings);

    assert_eq!(report.iterations, 1);
    assert!(report.total_ns >= settings.min_time_ns);
    // With one iteration the average is the whole window.
    assert_eq!(report.avg_ns(), report.total_ns as f64);
}

/// Work too fast to ever reach the floor is cut off at the ceiling.
#[test]
fn iteration_ceiling_bounds_negligible_work() {
    let settings = Settings {
        max_iterations: 1000,
        min_time_ns: i64::MAX,
    };

    let report = run_benchmark("noop", noop, &settings);

    assert_eq!(report.iterations, settings.max_iterations);
    assert_eq!(report.deltas.len(), 1000);
}

/// Two registered benchmarks produce two reports in registration order,
/// each calibrated independently.
#[test]
fn suite_runs_pairs_in_registration_order() {
    let settings = Settings {
        max_iterations: 10_000_000,
        min_time_ns: 1_000_000, // 1ms
    };

    let reports = run_suite(
        [("slow", slow as BenchFn), ("busy", busy as BenchFn)],
        &settings,
    );

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].name, "slow");
    assert_eq!(reports[1].name, "busy");

    // Independent calibration: the sleeping benchmark stays at one
    // iteration, the busy loop ramps well past it.
    assert_eq!(reports[0].iterations, 1);
    assert!(reports[1].iterations > 1);

    // Each report renders its own console line.
    let lines: Vec<String> = reports.iter().map(|r| r.to_string()).collect();
    assert!(lines[0].starts_with("slow: 1 iterations, avg "));
    assert!(lines[1].starts_with("busy: "));
    assert!(lines[1].contains(" iterations, avg "));
    assert!(lines[1].ends_with(" s"));
}

/// The 10x ramp from a single iteration visits only power-of-ten targets
/// until the elapsed time is large enough to extrapolate.
#[test]
fn early_ramp_is_powers_of_ten() {
    let settings = Settings {
        max_iterations: 10_000_000,
        min_time_ns: 2_000_000, // 2ms
    };

    let mut targets = Vec::new();
    run_benchmark(
        "ramp",
        |state| {
            targets.push(state.iterations());
            busy(state);
        },
        &settings,
    );

    assert_eq!(targets[0], 1);
    for pair in targets.windows(2) {
        let grew_10x = pair[1] == pair[0] * 10;
        // Once past 10% of the floor the multiplier is extrapolated instead.
        let extrapolated = pair[1] >= pair[0] && pair[1] < pair[0] * 10;
        assert!(
            grew_10x || extrapolated,
            "unexpected growth step: {targets:?}"
        );
    }
}

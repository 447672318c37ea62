//! Harness CLI
//!
//! Command-line surface for benchmark binaries. `benchmark_main!` expands to
//! a `main` that calls [`run`] with the registered functions and their
//! stringified name list; everything here is thin glue around the runner:
//! argument parsing, config layering, name registration, and report
//! printing.

use crate::config::{self, HarnessConfig};
use crate::runner::{run_benchmark, BenchFn, Settings};
use anyhow::Context;
use clap::{Parser, Subcommand};
use regex::Regex;
use std::process::ExitCode;

/// Harness CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "tickbench")]
#[command(author, version, about = "tickbench - adaptive micro-benchmark harness")]
pub struct Cli {
    /// Optional subcommand (List, Run); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter benchmarks by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Minimum measurement window per benchmark (e.g., "500ms", "2s")
    #[arg(long)]
    pub min_time: Option<String>,

    /// Maximum iteration count per attempt
    #[arg(long)]
    pub max_iterations: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Internal: Absorb cargo bench's --bench flag
    #[arg(long, hide = true)]
    pub bench: bool,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered benchmarks without running them
    List,
    /// Run benchmarks (default)
    Run,
}

/// Run the harness CLI. This is the entry point `benchmark_main!` expands to.
///
/// `funcs` and `names` are the parallel registration sequences: a slice of
/// benchmark functions and a comma/space-delimited name list. Equal length
/// is the caller's contract.
pub fn run(funcs: &[BenchFn], names: &str) -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "tickbench=debug"
    } else {
        "tickbench=info"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run_with_cli(cli, funcs, names) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tickbench: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Run the harness with pre-parsed arguments.
pub fn run_with_cli(cli: Cli, funcs: &[BenchFn], names: &str) -> anyhow::Result<()> {
    // Layering: built-in defaults <- tickbench.toml <- CLI flags. A missing
    // config file means defaults; a broken one is an error.
    let config = HarnessConfig::discover()?.unwrap_or_default();
    let mut settings: Settings = config.settings()?;
    if let Some(ref min_time) = cli.min_time {
        settings.min_time_ns = config::parse_duration(min_time)?;
    }
    if let Some(max_iterations) = cli.max_iterations {
        settings.max_iterations = max_iterations;
    }

    let filter = Regex::new(&cli.filter)
        .with_context(|| format!("invalid filter pattern: {}", cli.filter))?;
    let selected: Vec<(&str, BenchFn)> = register(funcs, names)
        .into_iter()
        .filter(|(name, _)| filter.is_match(name))
        .collect();

    match cli.command {
        Some(Commands::List) => {
            for (name, _) in &selected {
                println!("{name}");
            }
            println!("{} benchmarks found.", selected.len());
        }
        Some(Commands::Run) | None => {
            tracing::debug!(
                benchmarks = selected.len(),
                min_time_ns = settings.min_time_ns,
                max_iterations = settings.max_iterations,
                "starting suite"
            );
            // Report each benchmark as it completes, in registration order.
            for (name, func) in selected {
                let report = run_benchmark(name, func, &settings);
                println!("{report}");
            }
        }
    }

    Ok(())
}

/// Pair the comma/space-delimited name list with the function slice, in
/// order. Empty tokens (from ", " separators) are discarded; if the two
/// sequences differ in length the extra entries on either side are ignored.
fn register<'a>(funcs: &[BenchFn], names: &'a str) -> Vec<(&'a str, BenchFn)> {
    names
        .split([',', ' '])
        .filter(|name| !name.is_empty())
        .zip(funcs.iter().copied())
        .collect()
}

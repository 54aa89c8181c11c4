//! Cache simulator CLI.
//!
//! This binary drives the `cachesim-core` engine over a trace file. It performs:
//! 1. **Single run:** Simulate one configuration given by flags or a JSON file.
//! 2. **Sweep:** Simulate many configurations over the same trace (the legacy grid by default).
//! 3. **Interactive:** Prompt for a configuration on the console.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cachesim_core::common::SimError;
use cachesim_core::config::{CacheConfig, ReplacementPolicy, SweepConfig};
use cachesim_core::sim::trace::{TraceReader, load_addresses};
use cachesim_core::sim::{CacheSimulator, SweepResult, legacy_grid, run_sweep};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven cache simulator",
    long_about = "Replay a memory access trace through a simulated cache and report hits, misses, and the hit ratio.\n\nTrace lines have the form `<l|s> <hex-address> <bytes>`.\n\nExamples:\n  cachesim run -t traces/gcc.trace --size 4096 --line 64 --lines-per-set 4 --policy lru\n  cachesim run -t traces/gcc.trace --config cache.json --json\n  cachesim sweep -t traces/gcc.trace\n  cachesim interactive -t traces/gcc.trace\n\nSet RUST_LOG=debug (or trace) for engine diagnostics on stderr."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate a single cache configuration.
    Run {
        /// Trace file to replay.
        #[arg(short, long)]
        trace: PathBuf,

        /// JSON file holding a cache configuration (overrides the geometry flags).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Cache size in bytes (power of two).
        #[arg(long, default_value_t = 1024)]
        size: u32,

        /// Line size in bytes (power of two).
        #[arg(long, default_value_t = 32)]
        line: u32,

        /// Lines per set: 0 = fully associative, 1 = direct-mapped, N = N-way.
        #[arg(long, default_value_t = 1)]
        lines_per_set: u32,

        /// Replacement policy (fifo or lru); ignored when direct-mapped.
        #[arg(long, default_value = "lru")]
        policy: ReplacementPolicy,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Simulate many configurations over the same trace.
    Sweep {
        /// Trace file to replay.
        #[arg(short, long)]
        trace: PathBuf,

        /// JSON file with `{ "configs": [...] }`; defaults to the legacy grid.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for a configuration on the console, then simulate it.
    Interactive {
        /// Trace file to replay.
        #[arg(short, long)]
        trace: PathBuf,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run {
            trace,
            config,
            size,
            line,
            lines_per_set,
            policy,
            json,
        } => {
            let flags = CacheConfig::new(size, line, lines_per_set, policy);
            cmd_run(&trace, config.as_deref(), flags, json)
        }
        Commands::Sweep {
            trace,
            config,
            json,
        } => cmd_sweep(&trace, config.as_deref(), json),
        Commands::Interactive { trace } => cmd_interactive(&trace),
    };

    if let Err(e) = result {
        eprintln!("[!] {e}");
        process::exit(1);
    }
}

/// Streams the trace through one simulator and prints its counters.
fn cmd_run(
    trace: &Path,
    config_path: Option<&Path>,
    flags: CacheConfig,
    json: bool,
) -> Result<(), SimError> {
    let config = match config_path {
        Some(path) => CacheConfig::from_json(&fs::read_to_string(path)?)?,
        None => flags,
    };
    let result = simulate(trace, &config)?;
    report(&[result], json)
}

/// Loads the trace once and replays it through every configuration.
fn cmd_sweep(trace: &Path, config_path: Option<&Path>, json: bool) -> Result<(), SimError> {
    let configs = match config_path {
        Some(path) => SweepConfig::from_json(&fs::read_to_string(path)?)?.configs,
        None => legacy_grid(),
    };
    let addresses = load_addresses(trace)?;
    tracing::info!(
        configs = configs.len(),
        accesses = addresses.len(),
        "trace loaded"
    );
    let results = run_sweep(&configs, &addresses)?;
    report(&results, json)
}

/// Asks for the four configuration values, re-asking until the geometry is valid.
fn cmd_interactive(trace: &Path) -> Result<(), SimError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    let config = loop {
        let size = prompt(&mut input, &mut out, "Enter the cache size in bytes: ")?;
        let line = prompt(&mut input, &mut out, "Enter the line size in bytes: ")?;
        let lines_per_set = prompt(
            &mut input,
            &mut out,
            "Enter the size of each set\n(1 for direct map, 0 for fully associative, N for N-way set associative): ",
        )?;
        let policy = if lines_per_set == 1 {
            ReplacementPolicy::Fifo
        } else {
            prompt(&mut input, &mut out, "Enter 0 (or fifo) for FIFO, 1 (or lru) for LRU: ")?
        };

        let config = CacheConfig::new(size, line, lines_per_set, policy);
        match config.geometry() {
            Ok(_) => break config,
            Err(e) => writeln!(out, "  {e}; try again")?,
        }
    };
    drop(out);

    let result = simulate(trace, &config)?;
    report(&[result], false)
}

/// Builds a simulator for `config` and streams `trace` through it.
fn simulate(trace: &Path, config: &CacheConfig) -> Result<SweepResult, SimError> {
    let mut sim = CacheSimulator::new(config)?;
    sim.process_records(TraceReader::open(trace)?)?;
    Ok(SweepResult {
        config: *sim.config(),
        stats: *sim.stats(),
    })
}

/// Writes one line per result, or a JSON array with `json`.
fn report(results: &[SweepResult], json: bool) -> Result<(), SimError> {
    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, results)?;
        writeln!(out)?;
        return Ok(());
    }

    for result in results {
        let ratio = result
            .hit_ratio()
            .map_or_else(|_| "n/a".to_owned(), |r| format!("{r:.6}"));
        writeln!(
            out,
            "{:<44} hits {:>10}  misses {:>10}  hit_ratio {}",
            result.config.to_string(),
            result.stats.hits,
            result.stats.misses,
            ratio
        )?;
    }
    Ok(())
}

/// Prints `question` and parses the next input line, repeating on bad input.
fn prompt<T: FromStr>(
    input: &mut impl BufRead,
    out: &mut impl Write,
    question: &str,
) -> Result<T, SimError> {
    loop {
        write!(out, "{question}")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "console input closed").into());
        }
        match line.trim().parse() {
            Ok(value) => return Ok(value),
            Err(_) => writeln!(out, "  `{}` is not a valid value", line.trim())?,
        }
    }
}

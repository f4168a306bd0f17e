//! fly-in: route a drone fleet across a zone map.
//!
//! Reads a map file, simulates the fleet turn by turn, and prints one line of
//! move tokens per turn on stdout.  Diagnostics and logs go to stderr; any
//! failure exits with status 1 and prints nothing on stdout.
//!
//! ```text
//! fly-in maps/fork.txt
//! fly-in maps/fork.txt --config maps/wide.json --csv-dir out -v
//! ```

use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fly_core::SimConfig;
use fly_graph::{load_map_file, DijkstraRouter, ZoneMap};
use fly_output::{write_turn, CsvWriter, OutputWriter, SimOutputObserver, TextWriter};
use fly_sim::{NoopObserver, SimBuilder, SimReport};

#[derive(Parser, Debug)]
#[command(name = "fly-in", version, about = "Route a drone fleet across a zone map")]
struct Args {
    /// Map file to simulate
    map: PathBuf,

    /// JSON file overriding routing settings (diverse_threshold, max_routes, edge_penalty)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also write moves.csv and turn_summaries.csv into DIR
    #[arg(long, value_name = "DIR")]
    csv_dir: Option<PathBuf>,

    /// Log turn and route counts once every drone is delivered
    #[arg(long)]
    summary: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace; default: RUST_LOG or warn)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose, args.summary);

    let map = match load_map_file(&args.map) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Parse error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&args, map) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Simulation error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

/// Logs go to stderr so stdout carries nothing but turn lines.
fn init_tracing(verbose: u8, summary: bool) {
    let filter = match verbose {
        0 if summary => EnvFilter::new("info"),
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: SimConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

// ── Run ───────────────────────────────────────────────────────────────────────

fn run(args: &Args, map: ZoneMap) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut sim = SimBuilder::new(map, DijkstraRouter).config(config).build()?;

    let report = match &args.csv_dir {
        Some(dir) => run_with_csv(&mut sim, dir)?,
        None => sim.run(&mut NoopObserver)?,
    };

    if args.summary {
        tracing::info!(
            turns = report.turn_count(),
            routes = report.routes.len(),
            drones = sim.map().nb_drones(),
            "all drones delivered"
        );
    }

    // Nothing reaches stdout until the whole run has succeeded.
    let mut out = TextWriter::new(BufWriter::new(io::stdout().lock()));
    for record in &report.turns {
        write_turn(&mut out, record, sim.map())?;
    }
    out.finish()?;
    Ok(())
}

fn run_with_csv(sim: &mut fly_sim::Sim, dir: &Path) -> Result<SimReport> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let writer = CsvWriter::new(dir).with_context(|| format!("opening CSV files in {}", dir.display()))?;

    let mut obs = SimOutputObserver::new(writer);
    let report = sim.run(&mut obs)?;
    if let Some(e) = obs.take_error() {
        return Err(e).context("writing CSV output");
    }
    Ok(report)
}

//! `duct-route`: route a ceiling duct through a building model.
//!
//! ```text
//! duct-route --model building.json --source 120,40 --target 880,610 \
//!     [--config routing.json] [--output route.json] [--verbose]
//! ```
//!
//! Logs go to stderr (filter with `RUST_LOG`); the JSON report goes to
//! `--output` or stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use nalgebra::Point2;
use route_building::BuildingModel;
use route_cli::{load_config, parse_xy, route};
use tracing_subscriber::EnvFilter;

/// Ceiling duct router
///
/// Finds a clearance-respecting duct route along a building's ceiling and
/// reports the path and the duct boxes that realize it.
#[derive(Parser)]
#[command(name = "duct-route")]
#[command(version)]
struct Cli {
    /// Building model JSON (list of objects with Coords, Indices, Category)
    #[arg(long)]
    model: PathBuf,

    /// Source position on the ceiling as x,y
    #[arg(long, value_parser = parse_xy, allow_hyphen_values = true)]
    source: Point2<f64>,

    /// Target position on the ceiling as x,y
    #[arg(long, value_parser = parse_xy, allow_hyphen_values = true)]
    target: Point2<f64>,

    /// Routing configuration JSON; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Log at debug level regardless of RUST_LOG
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let building = BuildingModel::load(&cli.model)
        .with_context(|| format!("failed to load building model {}", cli.model.display()))?;
    let report = route(&building, &config, cli.source, cli.target).context("routing failed")?;

    let json = serde_json::to_string_pretty(&report)?;
    match &cli.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write report {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

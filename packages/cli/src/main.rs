#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Refresh runner for the mobility dashboard tables.
//!
//! Runs one full refresh against a source set (the embedded Rennes
//! registry by default) and writes every table that was produced as a
//! pretty-printed JSON file, one per table, for the presentation layer to
//! pick up. Datasets are isolated: a failed feed is logged and skipped,
//! and the run only fails outright when no table at all could be built.

use std::path::{Path, PathBuf};

use clap::Parser;
use mobility_map_pipeline::PipelineError;
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "mobility-map",
    about = "Fetches, normalizes, and aggregates the urban mobility datasets"
)]
struct Args {
    /// TOML source set; defaults to the built-in registry.
    #[arg(long)]
    sources: Option<PathBuf>,

    /// Directory the table JSON files are written to.
    #[arg(long, default_value = "tables")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let args = Args::parse();

    let sources = match &args.sources {
        Some(path) => mobility_map_pipeline::load_sources(path)?,
        None => mobility_map_pipeline::default_sources()?,
    };

    let tables = mobility_map_pipeline::refresh(&sources).await?;
    std::fs::create_dir_all(&args.output)?;

    write_table(&args.output, "bike_stations", &tables.bike_stations)?;
    write_table(&args.output, "repair_stations", &tables.repair_stations)?;
    write_table(&args.output, "cycle_paths", &tables.cycle_paths)?;
    write_table(&args.output, "park_and_ride", &tables.park_and_ride)?;
    write_table(&args.output, "transit_stops", &tables.transit_stops)?;
    write_table(&args.output, "traffic", &tables.traffic)?;
    write_table(&args.output, "accident_years", &tables.accident_years)?;
    write_table(&args.output, "road_speeds", &tables.road_speeds)?;

    if tables.succeeded() == 0 {
        return Err("refresh produced no tables".into());
    }
    log::info!(
        "refresh complete: {} tables written, {} failed",
        tables.succeeded(),
        tables.failed()
    );
    Ok(())
}

/// Writes one table as `<name>.json`, or logs why it is missing.
fn write_table<T: Serialize>(
    dir: &Path,
    name: &str,
    table: &Result<Vec<T>, PipelineError>,
) -> std::io::Result<()> {
    match table {
        Ok(rows) => {
            let json = serde_json::to_string_pretty(rows).map_err(std::io::Error::other)?;
            let path = dir.join(format!("{name}.json"));
            std::fs::write(&path, json)?;
            log::info!("wrote {} rows to {}", rows.len(), path.display());
        }
        Err(err) => log::error!("{name}: {err}"),
    }
    Ok(())
}

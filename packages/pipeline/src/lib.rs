#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! One-shot refresh orchestration with per-dataset fault isolation.
//!
//! [`refresh`] runs fetch → normalize (→ aggregate) for every dataset in a
//! source set and returns all resulting tables at once. Datasets are
//! isolated: each slot of [`DashboardTables`] is its own `Result`, so one
//! unreachable feed or malformed record collection never poisons the
//! others. There is no cross-refresh state — every call re-fetches
//! everything and rebuilds every table wholesale.

pub mod config;

pub use config::{ConfigError, SourceEntry, SourceSet};

use std::path::Path;

use mobility_map_analytics::{accident_yearly_rollup, road_speed_rollup};
use mobility_map_models::{
    AccidentYearRow, BikeStationRow, CyclePathRow, DatasetId, ParkAndRideRow, RepairStationRow,
    RoadSpeedRow, TrafficRow, TransitStopRow,
};
use mobility_map_source::{FetchError, SchemaError, datasets, fetch};
use serde_json::Value;
use thiserror::Error;

/// Why one dataset's refresh failed.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The dataset's source entry was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Retrieval failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Normalization failed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// An aggregate could not be built because the dataset it derives from
    /// failed (that dataset's slot carries the underlying error).
    #[error("aggregation input `{dataset}` failed")]
    UpstreamFailed {
        /// Dataset the aggregate derives from.
        dataset: DatasetId,
    },
}

/// One result slot per table handed to the presentation layer: the six
/// normalized tables plus the two aggregates.
#[derive(Debug)]
pub struct DashboardTables {
    /// Bike share stations.
    pub bike_stations: Result<Vec<BikeStationRow>, PipelineError>,
    /// Bike repair stations.
    pub repair_stations: Result<Vec<RepairStationRow>, PipelineError>,
    /// Cycling infrastructure segments.
    pub cycle_paths: Result<Vec<CyclePathRow>, PipelineError>,
    /// Park-and-ride facilities.
    pub park_and_ride: Result<Vec<ParkAndRideRow>, PipelineError>,
    /// Bus/metro stops.
    pub transit_stops: Result<Vec<TransitStopRow>, PipelineError>,
    /// Traffic speed observations.
    pub traffic: Result<Vec<TrafficRow>, PipelineError>,
    /// Yearly accident aggregate.
    pub accident_years: Result<Vec<AccidentYearRow>, PipelineError>,
    /// Per-road speed aggregate.
    pub road_speeds: Result<Vec<RoadSpeedRow>, PipelineError>,
}

impl DashboardTables {
    /// Number of tables that were produced.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        usize::from(self.bike_stations.is_ok())
            + usize::from(self.repair_stations.is_ok())
            + usize::from(self.cycle_paths.is_ok())
            + usize::from(self.park_and_ride.is_ok())
            + usize::from(self.transit_stops.is_ok())
            + usize::from(self.traffic.is_ok())
            + usize::from(self.accident_years.is_ok())
            + usize::from(self.road_speeds.is_ok())
    }

    /// Number of tables whose dataset failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        8 - self.succeeded()
    }
}

/// Embedded default source registry (the Rennes Métropole endpoints).
const DEFAULT_SOURCES: &str = include_str!("../sources/rennes.toml");

/// Returns the built-in default source set.
///
/// # Errors
///
/// Returns [`ConfigError`] if the embedded registry fails to parse (a
/// build-time defect, covered by tests).
pub fn default_sources() -> Result<SourceSet, ConfigError> {
    Ok(toml::from_str(DEFAULT_SOURCES)?)
}

/// Loads a source set from a TOML file.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or parsed.
pub fn load_sources(path: &Path) -> Result<SourceSet, ConfigError> {
    let data = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&data)?)
}

/// Runs one full refresh: fetches, normalizes, and aggregates every
/// dataset of the source set.
///
/// # Errors
///
/// Returns an error only if the HTTP client itself cannot be built.
/// Per-dataset failures land in the corresponding [`DashboardTables`]
/// slot and are logged here.
pub async fn refresh(sources: &SourceSet) -> Result<DashboardTables, PipelineError> {
    let client = fetch::client()?;

    let bike_stations = run_dataset(
        &client,
        &sources.bike_stations,
        DatasetId::BikeStations,
        datasets::normalize_bike_stations,
    )
    .await;
    let repair_stations = run_dataset(
        &client,
        &sources.repair_stations,
        DatasetId::RepairStations,
        datasets::normalize_repair_stations,
    )
    .await;
    let cycle_paths = run_dataset(
        &client,
        &sources.cycle_paths,
        DatasetId::CyclePaths,
        datasets::normalize_cycle_paths,
    )
    .await;
    let park_and_ride = run_dataset(
        &client,
        &sources.park_and_ride,
        DatasetId::ParkAndRide,
        datasets::normalize_park_and_ride,
    )
    .await;
    let transit_stops = run_dataset(
        &client,
        &sources.transit_stops,
        DatasetId::TransitStops,
        datasets::normalize_transit_stops,
    )
    .await;
    let traffic = run_dataset(
        &client,
        &sources.traffic,
        DatasetId::Traffic,
        datasets::normalize_traffic,
    )
    .await;

    // The aggregates derive from their base datasets within the same
    // refresh; the accident table itself is only ever consumed aggregated.
    let road_speeds = match &traffic {
        Ok(rows) => Ok(road_speed_rollup(rows)),
        Err(_) => Err(PipelineError::UpstreamFailed {
            dataset: DatasetId::Traffic,
        }),
    };
    let accident_years = run_dataset(
        &client,
        &sources.accidents,
        DatasetId::Accidents,
        datasets::normalize_accidents,
    )
    .await
    .map(|rows| accident_yearly_rollup(&rows));

    Ok(DashboardTables {
        bike_stations,
        repair_stations,
        cycle_paths,
        park_and_ride,
        transit_stops,
        traffic,
        accident_years,
        road_speeds,
    })
}

/// Fetches and normalizes one dataset, logging the outcome.
async fn run_dataset<T>(
    client: &reqwest::Client,
    entry: &SourceEntry,
    dataset: DatasetId,
    normalize: fn(&[Value]) -> Result<Vec<T>, SchemaError>,
) -> Result<Vec<T>, PipelineError> {
    let result: Result<Vec<T>, PipelineError> = async {
        let source = entry.resolve(dataset)?;
        let records = fetch::fetch_records(client, &source).await?;
        Ok(normalize(&records)?)
    }
    .await;

    match &result {
        Ok(rows) => log::info!("{dataset}: {} rows", rows.len()),
        Err(err) => log::error!("{dataset} failed: {err}"),
    }
    result
}

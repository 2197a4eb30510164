//! Per-dataset normalizers.
//!
//! One module per upstream dataset, each exposing a pure
//! `normalize_*(&[serde_json::Value]) -> Result<Vec<Row>, SchemaError>`
//! function. Shared guarantees, checked by every module's tests:
//!
//! - output row count equals input record count, in input order;
//! - an empty input yields an empty table, not an error;
//! - unrecognized extra fields are ignored;
//! - a missing or mistyped required field fails the whole dataset with the
//!   record index and field name.

mod accidents;
mod bike_stations;
mod cycle_paths;
mod park_and_ride;
mod repair_stations;
mod traffic;
mod transit_stops;

pub use accidents::normalize_accidents;
pub use bike_stations::normalize_bike_stations;
pub use cycle_paths::normalize_cycle_paths;
pub use park_and_ride::normalize_park_and_ride;
pub use repair_stations::normalize_repair_stations;
pub use traffic::normalize_traffic;
pub use transit_stops::normalize_transit_stops;

use mobility_map_models::DatasetId;

use crate::SchemaError;

/// Projects one point, attaching the record index on failure.
fn project_point(
    dataset: DatasetId,
    index: usize,
    lon: f64,
    lat: f64,
) -> Result<(f64, f64), SchemaError> {
    mobility_map_geo::project(lon, lat)
        .map_err(|source| SchemaError::Projection {
            dataset,
            index,
            source,
        })
}

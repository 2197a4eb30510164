//! Self-service bike station normalizer.
//!
//! Real-time station state from the `etat-des-stations-le-velo-star-en-temps-reel`
//! open-data feed: one record per station, with slot counts and a flat
//! `coordonnees` location.

use mobility_map_models::{BikeStationRow, DatasetId};
use serde_json::Value;

use crate::datasets::project_point;
use crate::{SchemaError, fields};

const DATASET: DatasetId = DatasetId::BikeStations;

/// Normalizes bike station records into [`BikeStationRow`]s.
///
/// # Errors
///
/// Returns [`SchemaError`] on the first record missing a required field or
/// carrying an unprojectable coordinate.
pub fn normalize_bike_stations(records: &[Value]) -> Result<Vec<BikeStationRow>, SchemaError> {
    let mut rows = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let name = fields::required_str(record, DATASET, index, "nom")?.to_string();
        let total_slots =
            fields::required_count(record, DATASET, index, "nombreemplacementsactuels")?;
        let empty_slots =
            fields::required_count(record, DATASET, index, "nombreemplacementsdisponibles")?;
        let available_bikes =
            fields::required_count(record, DATASET, index, "nombrevelosdisponibles")?;

        let (lon, lat) = fields::latlon_point(record, DATASET, index)?;
        let (x, y) = project_point(DATASET, index, lon, lat)?;

        rows.push(BikeStationRow {
            name,
            total_slots,
            empty_slots,
            available_bikes,
            x,
            y,
        });
    }

    log::info!("normalized {} bike station rows", rows.len());
    Ok(rows)
}

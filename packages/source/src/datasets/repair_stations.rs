//! Bike repair station normalizer.
//!
//! Public repair/pump stations from the `stations-reparation-velo` export:
//! one record per station, located by its point-shaped `geo_shape`
//! geometry, whose `coordinates` value is the position list itself.

use mobility_map_models::{DatasetId, RepairStationRow};
use serde_json::Value;

use crate::datasets::project_point;
use crate::{SchemaError, fields};

const DATASET: DatasetId = DatasetId::RepairStations;

/// Normalizes repair station records into [`RepairStationRow`]s.
///
/// # Errors
///
/// Returns [`SchemaError`] on the first record missing a required field,
/// carrying an empty geometry, or an unprojectable coordinate.
pub fn normalize_repair_stations(records: &[Value]) -> Result<Vec<RepairStationRow>, SchemaError> {
    let mut rows = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let id = fields::required_str(record, DATASET, index, "gml_id")?.to_string();
        let state = fields::required_str(record, DATASET, index, "etat")?.to_string();
        let pump = fields::required_str(record, DATASET, index, "gonflage")?.to_string();
        let repair = fields::required_str(record, DATASET, index, "reparation")?.to_string();

        let (lon, lat) = fields::geometry_point(record, DATASET, index)?;
        let (x, y) = project_point(DATASET, index, lon, lat)?;

        rows.push(RepairStationRow {
            id,
            state,
            pump,
            repair,
            x,
            y,
        });
    }

    log::info!("normalized {} repair station rows", rows.len());
    Ok(rows)
}

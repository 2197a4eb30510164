//! Road traffic speed normalizer.
//!
//! Real-time segment observations from the `etat-du-trafic-en-temps-reel`
//! feed. Each record publishes one `averagevehiclespeed`; that single value
//! is carried into both `max_speed` and `min_speed` so the per-road rollup
//! can reduce across records sharing a road name. The upstream feed has no
//! separate range — this conflation of an instantaneous observation with a
//! reported range is deliberate, preserved behavior.

use mobility_map_models::{DatasetId, TrafficRow};
use serde_json::Value;

use crate::{SchemaError, fields};

const DATASET: DatasetId = DatasetId::Traffic;

/// Normalizes traffic records into [`TrafficRow`]s.
///
/// # Errors
///
/// Returns [`SchemaError`] on the first record missing a required field.
pub fn normalize_traffic(records: &[Value]) -> Result<Vec<TrafficRow>, SchemaError> {
    let mut rows = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let road_name = fields::required_str(record, DATASET, index, "denomination")?.to_string();
        let speed = fields::required_f64(record, DATASET, index, "averagevehiclespeed")?;

        rows.push(TrafficRow {
            road_name,
            max_speed: speed,
            min_speed: speed,
        });
    }

    log::info!("normalized {} traffic rows", rows.len());
    Ok(rows)
}

//! Bus and metro stop normalizer.
//!
//! Stop locations from the `topologie_arret_bus` export: just a name and a
//! flat `coordonnees` location per record.

use mobility_map_models::{DatasetId, TransitStopRow};
use serde_json::Value;

use crate::datasets::project_point;
use crate::{SchemaError, fields};

const DATASET: DatasetId = DatasetId::TransitStops;

/// Normalizes transit stop records into [`TransitStopRow`]s.
///
/// # Errors
///
/// Returns [`SchemaError`] on the first record missing a required field or
/// carrying an unprojectable coordinate.
pub fn normalize_transit_stops(records: &[Value]) -> Result<Vec<TransitStopRow>, SchemaError> {
    let mut rows = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let name = fields::required_str(record, DATASET, index, "nom")?.to_string();
        let (lon, lat) = fields::latlon_point(record, DATASET, index)?;
        let (x, y) = project_point(DATASET, index, lon, lat)?;

        rows.push(TransitStopRow { name, x, y });
    }

    log::info!("normalized {} transit stop rows", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn row_count_matches_record_count() {
        let records = [
            json!({"nom": "République", "coordonnees": {"lat": 48.11, "lon": -1.68}, "ligne": "a"}),
            json!({"nom": "Gares", "coordonnees": {"lat": 48.10, "lon": -1.67}}),
        ];
        let rows = normalize_transit_stops(&records).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "République");
        assert_eq!(rows[1].name, "Gares");
    }

    #[test]
    fn empty_input_yields_empty_table() {
        assert!(normalize_transit_stops(&[]).unwrap().is_empty());
    }

    #[test]
    fn missing_location_names_the_field() {
        let records = [json!({"nom": "Orphan"})];
        let err = normalize_transit_stops(&records).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MissingField {
                index: 0,
                field: "coordonnees",
                ..
            }
        ));
    }
}

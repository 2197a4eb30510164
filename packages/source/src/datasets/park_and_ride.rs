//! Park-and-ride facility normalizer.
//!
//! Real-time occupancy from the `tco-parcsrelais-star-etat-tr` feed: per
//! facility, an update timestamp, opening state, total capacity, and free
//! slot counts broken down by vehicle category.

use mobility_map_models::{DatasetId, ParkAndRideRow};
use serde_json::Value;

use crate::datasets::project_point;
use crate::{SchemaError, fields};

const DATASET: DatasetId = DatasetId::ParkAndRide;

/// Normalizes park-and-ride records into [`ParkAndRideRow`]s.
///
/// # Errors
///
/// Returns [`SchemaError`] on the first record missing a required field,
/// carrying an unparseable `lastupdate` timestamp, or an unprojectable
/// coordinate.
pub fn normalize_park_and_ride(records: &[Value]) -> Result<Vec<ParkAndRideRow>, SchemaError> {
    let mut rows = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let name = fields::required_str(record, DATASET, index, "nom")?.to_string();
        let date = fields::required_datetime(record, DATASET, index, "lastupdate")?;
        let capacity = fields::required_count(record, DATASET, index, "capaciteparking")?;
        let state = fields::required_str(record, DATASET, index, "etatouverture")?.to_string();
        let ordinary_slots = fields::required_count(record, DATASET, index, "jrdinfosoliste")?;
        let electric_slots = fields::required_count(record, DATASET, index, "jrdinfoelectrique")?;
        let carpool_slots = fields::required_count(record, DATASET, index, "jrdinfocovoiturage")?;
        let pmr_slots = fields::required_count(record, DATASET, index, "jrdinfopmr")?;

        let (lon, lat) = fields::latlon_point(record, DATASET, index)?;
        let (x, y) = project_point(DATASET, index, lon, lat)?;

        rows.push(ParkAndRideRow {
            date,
            state,
            name,
            ordinary_slots,
            electric_slots,
            pmr_slots,
            carpool_slots,
            capacity,
            x,
            y,
        });
    }

    log::info!("normalized {} park-and-ride rows", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn facility(name: &str) -> Value {
        json!({
            "nom": name,
            "lastupdate": "2024-01-15T10:30:00+01:00",
            "capaciteparking": 400,
            "etatouverture": "Ouvert",
            "jrdinfosoliste": 120,
            "jrdinfoelectrique": 8,
            "jrdinfocovoiturage": 5,
            "jrdinfopmr": 10,
            "coordonnees": {"lat": 48.08, "lon": -1.64},
            "idparc": "ignored",
        })
    }

    #[test]
    fn extracts_all_slot_categories() {
        let rows = normalize_park_and_ride(&[facility("La Poterie")]).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.name, "La Poterie");
        assert_eq!(row.state, "Ouvert");
        assert_eq!(row.capacity, 400);
        assert_eq!(row.ordinary_slots, 120);
        assert_eq!(row.electric_slots, 8);
        assert_eq!(row.carpool_slots, 5);
        assert_eq!(row.pmr_slots, 10);
        // `lastupdate` offset is normalized to UTC.
        assert_eq!(row.date.to_string(), "2024-01-15 09:30:00 UTC");
    }

    #[test]
    fn empty_input_yields_empty_table() {
        assert!(normalize_park_and_ride(&[]).unwrap().is_empty());
    }

    #[test]
    fn garbled_timestamp_is_an_invalid_field() {
        let mut bad = facility("x");
        bad["lastupdate"] = json!("soon");
        let err = normalize_park_and_ride(&[bad]).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::InvalidField {
                index: 0,
                field: "lastupdate",
                ..
            }
        ));
    }

    #[test]
    fn missing_pmr_count_names_the_field() {
        let mut bad = facility("x");
        bad.as_object_mut().unwrap().remove("jrdinfopmr");
        let err = normalize_park_and_ride(&[facility("ok"), bad]).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MissingField {
                index: 1,
                field: "jrdinfopmr",
                ..
            }
        ));
    }
}

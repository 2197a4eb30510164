//! Road accident casualty normalizer.
//!
//! Casualty records from the `accidents_corporels` export (a bare JSON
//! array, not a wrapped feed). Only the fields the yearly rollup needs are
//! kept: the `wms_time` timestamp — reduced to its UTC calendar year — and
//! the killed / hospitalized / non-hospitalized counts.

use chrono::Datelike as _;
use mobility_map_models::{AccidentRow, DatasetId};
use serde_json::Value;

use crate::{SchemaError, fields};

const DATASET: DatasetId = DatasetId::Accidents;

/// Normalizes accident records into [`AccidentRow`]s.
///
/// # Errors
///
/// Returns [`SchemaError`] on the first record missing a required field or
/// carrying an unparseable `wms_time` timestamp.
pub fn normalize_accidents(records: &[Value]) -> Result<Vec<AccidentRow>, SchemaError> {
    let mut rows = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let occurred_at = fields::required_datetime(record, DATASET, index, "wms_time")?;
        let killed = fields::required_count(record, DATASET, index, "ntu")?;
        let hospitalized = fields::required_count(record, DATASET, index, "nbh")?;
        let non_hospitalized = fields::required_count(record, DATASET, index, "nbnh")?;

        rows.push(AccidentRow {
            year: occurred_at.year(),
            killed,
            hospitalized,
            non_hospitalized,
        });
    }

    log::info!("normalized {} accident rows", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn derives_the_utc_calendar_year() {
        let records = [
            json!({"wms_time": "2019-07-02T16:20:00+02:00", "ntu": 1, "nbh": 2, "nbnh": 3}),
            // 00:30 on Jan 1st at +01:00 is still Dec 31st in UTC.
            json!({"wms_time": "2020-01-01T00:30:00+01:00", "ntu": 0, "nbh": 0, "nbnh": 1}),
        ];
        let rows = normalize_accidents(&records).unwrap();
        assert_eq!(rows[0].year, 2019);
        assert_eq!(rows[1].year, 2019);
        assert_eq!(rows[0].killed, 1);
        assert_eq!(rows[0].hospitalized, 2);
        assert_eq!(rows[0].non_hospitalized, 3);
    }

    #[test]
    fn empty_input_yields_empty_table() {
        assert!(normalize_accidents(&[]).unwrap().is_empty());
    }

    #[test]
    fn missing_casualty_count_names_the_field() {
        let records = [json!({"wms_time": "2019-07-02T16:20:00+02:00", "ntu": 1, "nbh": 2})];
        let err = normalize_accidents(&records).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MissingField {
                index: 0,
                field: "nbnh",
                ..
            }
        ));
    }

    #[test]
    fn garbled_timestamp_is_an_invalid_field() {
        let records = [json!({"wms_time": "yesterday", "ntu": 0, "nbh": 0, "nbnh": 0})];
        let err = normalize_accidents(&records).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::InvalidField {
                index: 0,
                field: "wms_time",
                ..
            }
        ));
    }
}

//! Cycling infrastructure normalizer.
//!
//! Lane/track segments from the `amenagement_cyclable` export. Unlike the
//! station datasets this one carries a full line geometry per record; every
//! vertex is projected, in order, into per-row parallel `xs`/`ys` lists.

use mobility_map_models::{CyclePathRow, DatasetId};
use serde_json::Value;

use crate::{SchemaError, fields};

const DATASET: DatasetId = DatasetId::CyclePaths;

/// Normalizes cycling infrastructure records into [`CyclePathRow`]s.
///
/// # Errors
///
/// Returns [`SchemaError`] on the first record missing a required field or
/// containing an unprojectable vertex.
pub fn normalize_cycle_paths(records: &[Value]) -> Result<Vec<CyclePathRow>, SchemaError> {
    let mut rows = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let facility_type =
            fields::required_str(record, DATASET, index, "type_amenagement")?.to_string();
        let side = fields::required_str(record, DATASET, index, "rive")?.to_string();

        let ring = fields::geometry_ring(record, DATASET, index)?;
        let (xs, ys) = mobility_map_geo::project_path(&ring).map_err(|source| {
            SchemaError::Projection {
                dataset: DATASET,
                index,
                source,
            }
        })?;

        rows.push(CyclePathRow {
            facility_type,
            side,
            xs,
            ys,
        });
    }

    log::info!("normalized {} cycle path rows", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn segment() -> Value {
        json!({
            "type_amenagement": "Piste cyclable",
            "rive": "Droite",
            "geo_shape": {"geometry": {"coordinates": [
                [[-1.68, 48.11], [-1.69, 48.12], [-1.70, 48.13]],
            ]}},
            "longueur": 420,
        })
    }

    #[test]
    fn three_vertices_produce_parallel_lists_of_three() {
        let rows = normalize_cycle_paths(&[segment()]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].facility_type, "Piste cyclable");
        assert_eq!(rows[0].side, "Droite");
        assert_eq!(rows[0].xs.len(), 3);
        assert_eq!(rows[0].ys.len(), 3);
        // Vertices head west: eastings strictly decrease, in input order.
        assert!(rows[0].xs[0] > rows[0].xs[1]);
        assert!(rows[0].xs[1] > rows[0].xs[2]);
    }

    #[test]
    fn geometry_stays_per_row() {
        let rows = normalize_cycle_paths(&[segment(), segment()]).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].xs.len(), 3);
        assert_eq!(rows[1].xs.len(), 3);
    }

    #[test]
    fn empty_input_yields_empty_table() {
        assert!(normalize_cycle_paths(&[]).unwrap().is_empty());
    }

    #[test]
    fn missing_side_names_the_field() {
        let mut bad = segment();
        bad.as_object_mut().unwrap().remove("rive");
        let err = normalize_cycle_paths(&[segment(), bad]).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MissingField {
                index: 1,
                field: "rive",
                ..
            }
        ));
    }

    #[test]
    fn bad_vertex_is_a_projection_error() {
        let record = json!({
            "type_amenagement": "Piste cyclable",
            "rive": "Gauche",
            "geo_shape": {"geometry": {"coordinates": [
                [[-1.68, 48.11], [-1.69, 90.0]],
            ]}},
        });
        let err = normalize_cycle_paths(&[record]).unwrap_err();
        assert!(matches!(err, SchemaError::Projection { index: 0, .. }));
    }
}

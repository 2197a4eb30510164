//! Required-field extraction from heterogeneous JSON records.
//!
//! Upstream records are duck-typed JSON objects; these helpers pull fields
//! out by fixed key names and turn every absence or type mismatch into a
//! [`SchemaError`] carrying the dataset, record index, and field name.
//! Nothing is defaulted — a record that lacks a required key fails the
//! whole dataset's normalization.

use chrono::{DateTime, NaiveDateTime, Utc};
use mobility_map_models::DatasetId;
use serde_json::Value;

use crate::SchemaError;

/// Looks up a required top-level field.
///
/// # Errors
///
/// Returns [`SchemaError::MissingField`] if the key is absent (or the
/// record is not an object at all).
pub fn required<'a>(
    record: &'a Value,
    dataset: DatasetId,
    index: usize,
    field: &'static str,
) -> Result<&'a Value, SchemaError> {
    record.get(field).ok_or(SchemaError::MissingField {
        dataset,
        index,
        field,
    })
}

/// Looks up a required string field.
///
/// # Errors
///
/// Returns [`SchemaError`] if the key is absent or not a string.
pub fn required_str<'a>(
    record: &'a Value,
    dataset: DatasetId,
    index: usize,
    field: &'static str,
) -> Result<&'a str, SchemaError> {
    required(record, dataset, index, field)?
        .as_str()
        .ok_or(SchemaError::InvalidField {
            dataset,
            index,
            field,
            expected: "a string",
        })
}

/// Looks up a required non-negative integer count field.
///
/// # Errors
///
/// Returns [`SchemaError`] if the key is absent, negative, fractional, or
/// too large for a `u32`.
pub fn required_count(
    record: &Value,
    dataset: DatasetId,
    index: usize,
    field: &'static str,
) -> Result<u32, SchemaError> {
    required(record, dataset, index, field)?
        .as_u64()
        .and_then(|count| u32::try_from(count).ok())
        .ok_or(SchemaError::InvalidField {
            dataset,
            index,
            field,
            expected: "a non-negative integer",
        })
}

/// Looks up a required numeric field.
///
/// # Errors
///
/// Returns [`SchemaError`] if the key is absent or not a number.
pub fn required_f64(
    record: &Value,
    dataset: DatasetId,
    index: usize,
    field: &'static str,
) -> Result<f64, SchemaError> {
    required(record, dataset, index, field)?
        .as_f64()
        .ok_or(SchemaError::InvalidField {
            dataset,
            index,
            field,
            expected: "a number",
        })
}

/// Looks up a required ISO-8601 timestamp field, normalized to UTC.
///
/// Accepts an explicit offset (`2024-01-15T10:30:00+01:00`) or a naive
/// timestamp, which is taken as already being UTC.
///
/// # Errors
///
/// Returns [`SchemaError`] if the key is absent, not a string, or not a
/// parseable timestamp.
pub fn required_datetime(
    record: &Value,
    dataset: DatasetId,
    index: usize,
    field: &'static str,
) -> Result<DateTime<Utc>, SchemaError> {
    let raw = required_str(record, dataset, index, field)?;
    parse_iso8601(raw).ok_or(SchemaError::InvalidField {
        dataset,
        index,
        field,
        expected: "an ISO-8601 timestamp",
    })
}

/// Parses an ISO-8601 timestamp, with or without an offset, `T` or space
/// separated, optional fractional seconds.
#[must_use]
pub fn parse_iso8601(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    None
}

/// Extracts a flat `{lat, lon}` location object, returning `(lon, lat)`.
///
/// This is the location shape of the real-time station feeds, published
/// under a `coordonnees` key.
///
/// # Errors
///
/// Returns [`SchemaError`] if the object or either coordinate is absent or
/// non-numeric.
pub fn latlon_point(
    record: &Value,
    dataset: DatasetId,
    index: usize,
) -> Result<(f64, f64), SchemaError> {
    let coords = required(record, dataset, index, "coordonnees")?;
    let lat = nested_f64(coords, dataset, index, "lat", "coordonnees.lat")?;
    let lon = nested_f64(coords, dataset, index, "lon", "coordonnees.lon")?;
    Ok((lon, lat))
}

/// Dotted path reported for every `geo_shape` geometry error.
const GEOMETRY_FIELD: &str = "geo_shape.geometry.coordinates";

/// Extracts a point-shaped `geo_shape` geometry as a `(lon, lat)` pair.
///
/// The repair-station export publishes its `coordinates` value as the
/// position list itself: the first element IS the `[lon, lat]` pair. This
/// is one nesting level flatter than the line geometries [`geometry_ring`]
/// handles.
///
/// # Errors
///
/// Returns [`SchemaError`] if any nesting level is absent or the first
/// position is not a `[lon, lat]` number pair.
pub fn geometry_point(
    record: &Value,
    dataset: DatasetId,
    index: usize,
) -> Result<(f64, f64), SchemaError> {
    let coordinates = geometry_coordinates(record, dataset, index)?;
    let pair = coordinates
        .as_array()
        .and_then(|positions| positions.first())
        .ok_or(SchemaError::InvalidField {
            dataset,
            index,
            field: GEOMETRY_FIELD,
            expected: "a non-empty array of positions",
        })?;
    position_pair(pair, dataset, index, GEOMETRY_FIELD)
}

/// Extracts the primary ring of a `geo_shape` line/polygon geometry as an
/// ordered list of `(lon, lat)` pairs.
///
/// Upstream publishes GeoJSON-style nesting for line geometries: the value
/// at `geo_shape.geometry.coordinates` is an array of rings, and only the
/// first ring is meaningful for these datasets.
///
/// # Errors
///
/// Returns [`SchemaError`] if any nesting level is absent or a position is
/// not a `[lon, lat]` number pair.
pub fn geometry_ring(
    record: &Value,
    dataset: DatasetId,
    index: usize,
) -> Result<Vec<(f64, f64)>, SchemaError> {
    let ring = geometry_coordinates(record, dataset, index)?
        .as_array()
        .and_then(|rings| rings.first())
        .and_then(Value::as_array)
        .ok_or(SchemaError::InvalidField {
            dataset,
            index,
            field: GEOMETRY_FIELD,
            expected: "a non-empty array of coordinate rings",
        })?;

    let mut points = Vec::with_capacity(ring.len());
    for position in ring {
        points.push(position_pair(position, dataset, index, GEOMETRY_FIELD)?);
    }
    Ok(points)
}

/// Navigates to the raw `geo_shape.geometry.coordinates` value.
fn geometry_coordinates<'a>(
    record: &'a Value,
    dataset: DatasetId,
    index: usize,
) -> Result<&'a Value, SchemaError> {
    let geo_shape = required(record, dataset, index, "geo_shape")?;
    let geometry = nested(geo_shape, dataset, index, "geometry", "geo_shape.geometry")?;
    nested(geometry, dataset, index, "coordinates", GEOMETRY_FIELD)
}

/// Reads one `[lon, lat]` position as a `(lon, lat)` pair.
fn position_pair(
    position: &Value,
    dataset: DatasetId,
    index: usize,
    field: &'static str,
) -> Result<(f64, f64), SchemaError> {
    let pair = position.as_array().ok_or(SchemaError::InvalidField {
        dataset,
        index,
        field,
        expected: "an array of [lon, lat] positions",
    })?;
    let (Some(lon), Some(lat)) = (
        pair.first().and_then(Value::as_f64),
        pair.get(1).and_then(Value::as_f64),
    ) else {
        return Err(SchemaError::InvalidField {
            dataset,
            index,
            field,
            expected: "an array of [lon, lat] positions",
        });
    };
    Ok((lon, lat))
}

fn nested<'a>(
    value: &'a Value,
    dataset: DatasetId,
    index: usize,
    key: &str,
    field: &'static str,
) -> Result<&'a Value, SchemaError> {
    value.get(key).ok_or(SchemaError::MissingField {
        dataset,
        index,
        field,
    })
}

fn nested_f64(
    value: &Value,
    dataset: DatasetId,
    index: usize,
    key: &str,
    field: &'static str,
) -> Result<f64, SchemaError> {
    nested(value, dataset, index, key, field)?
        .as_f64()
        .ok_or(SchemaError::InvalidField {
            dataset,
            index,
            field,
            expected: "a number",
        })
}

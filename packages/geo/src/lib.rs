#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! WGS84 to Web Mercator projection.
//!
//! Slippy-map tile renderers expect planar Web Mercator coordinates in
//! meters, so every geographic coordinate is projected exactly once, at the
//! normalization boundary. The projection is conformal and undefined at the
//! poles; inputs are validated rather than letting `ln(tan(π/2))` leak an
//! infinity into a table.

use std::f64::consts::PI;

use thiserror::Error;

/// WGS84 equatorial Earth radius in meters, the Web Mercator sphere radius.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Errors from projecting an out-of-domain coordinate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// Latitude outside the open interval (−90, 90). The Mercator northing
    /// is singular at the poles.
    #[error("latitude {0} is outside the Web Mercator domain (-90, 90)")]
    LatitudeOutOfDomain(f64),

    /// Longitude outside [−180, 180].
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Projects a WGS84 (longitude, latitude) pair to Web Mercator meters.
///
/// # Errors
///
/// Returns [`ProjectionError`] if `lon` is outside [−180, 180] or `lat` is
/// outside the open interval (−90, 90). NaN inputs fail the same checks.
pub fn project(lon: f64, lat: f64) -> Result<(f64, f64), ProjectionError> {
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ProjectionError::LongitudeOutOfRange(lon));
    }
    if !(lat > -90.0 && lat < 90.0) {
        return Err(ProjectionError::LatitudeOutOfDomain(lat));
    }

    let x = lon * (EARTH_RADIUS_M * PI / 180.0);
    let y = ((90.0 + lat) * PI / 360.0).tan().ln() * EARTH_RADIUS_M;
    Ok((x, y))
}

/// Projects an ordered sequence of WGS84 (longitude, latitude) pairs,
/// preserving order, into parallel x/y vectors.
///
/// # Errors
///
/// Returns the first [`ProjectionError`] encountered; the error carries the
/// offending coordinate value.
pub fn project_path(points: &[(f64, f64)]) -> Result<(Vec<f64>, Vec<f64>), ProjectionError> {
    let mut xs = Vec::with_capacity(points.len());
    let mut ys = Vec::with_capacity(points.len());
    for &(lon, lat) in points {
        let (x, y) = project(lon, lat)?;
        xs.push(x);
        ys.push(y);
    }
    Ok((xs, ys))
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset identifiers, normalized row types, and source configuration.
//!
//! Every dataset normalizer produces one of the typed row structs below.
//! Serialized field names are exactly the column names the presentation
//! layer binds to, so renaming a field here is a breaking change for any
//! downstream chart or tooltip.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Identifies one of the mobility datasets handled by the pipeline.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DatasetId {
    /// Self-service bike share stations (real-time state).
    BikeStations,
    /// Public bike repair / pump stations.
    RepairStations,
    /// Cycling infrastructure segments (lanes, tracks).
    CyclePaths,
    /// Park-and-ride facilities (real-time occupancy).
    ParkAndRide,
    /// Bus and metro stop locations.
    TransitStops,
    /// Real-time road traffic speed observations.
    Traffic,
    /// Road accident casualty records.
    Accidents,
}

/// How the top-level JSON payload of a source is shaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    /// An object whose `results` key holds the record array (the shape of
    /// the open-data "explore v2.1" API endpoints).
    #[default]
    WrappedResults,
    /// A bare top-level JSON array of records (the accident export shape).
    BareArray,
}

/// Where a dataset's raw records come from.
///
/// Both variants carry the expected [`PayloadShape`] explicitly — the
/// adapter never guesses whether a payload is wrapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    /// Fetch via HTTP GET.
    Remote {
        /// Endpoint URL.
        url: String,
        /// Expected top-level payload shape.
        shape: PayloadShape,
    },
    /// Read from a local JSON file.
    Local {
        /// Path to the JSON file.
        path: PathBuf,
        /// Expected top-level payload shape.
        shape: PayloadShape,
    },
}

/// One self-service bike station with its real-time slot counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BikeStationRow {
    /// Station name.
    pub name: String,
    /// Total number of slots currently installed.
    pub total_slots: u32,
    /// Slots currently free.
    pub empty_slots: u32,
    /// Bikes currently available for rent.
    pub available_bikes: u32,
    /// Web Mercator easting, meters.
    pub x: f64,
    /// Web Mercator northing, meters.
    pub y: f64,
}

/// One public bike repair station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairStationRow {
    /// Upstream feature id.
    pub id: String,
    /// Operational state, as published upstream (display string).
    pub state: String,
    /// Tire pump service indicator, as published upstream.
    pub pump: String,
    /// Repair tool service indicator, as published upstream.
    pub repair: String,
    /// Web Mercator easting, meters.
    pub x: f64,
    /// Web Mercator northing, meters.
    pub y: f64,
}

/// One cycling infrastructure segment with its projected line geometry.
///
/// `xs` and `ys` are parallel per-row lists, one entry per vertex of the
/// segment, in upstream order. They are kept per-row (not flattened) so a
/// multi-line renderer can draw one polyline per segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CyclePathRow {
    /// Kind of facility (separated lane, shared lane, ...).
    pub facility_type: String,
    /// Which side of the road the facility runs on.
    pub side: String,
    /// Web Mercator eastings of the segment vertices, meters.
    pub xs: Vec<f64>,
    /// Web Mercator northings of the segment vertices, meters.
    pub ys: Vec<f64>,
}

/// One park-and-ride facility with its real-time occupancy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkAndRideRow {
    /// When the upstream last refreshed this record.
    pub date: DateTime<Utc>,
    /// Opening state, as published upstream (display string).
    pub state: String,
    /// Facility name.
    pub name: String,
    /// Free slots for ordinary vehicles.
    pub ordinary_slots: u32,
    /// Free slots with an electric charging point.
    pub electric_slots: u32,
    /// Free slots reserved for reduced-mobility users.
    pub pmr_slots: u32,
    /// Free slots reserved for carpooling vehicles.
    pub carpool_slots: u32,
    /// Total capacity of the facility.
    pub capacity: u32,
    /// Web Mercator easting, meters.
    pub x: f64,
    /// Web Mercator northing, meters.
    pub y: f64,
}

/// One bus or metro stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitStopRow {
    /// Stop name.
    pub name: String,
    /// Web Mercator easting, meters.
    pub x: f64,
    /// Web Mercator northing, meters.
    pub y: f64,
}

/// One road traffic speed observation.
///
/// The upstream feed publishes a single average vehicle speed per segment
/// record. That one observation is carried in both `max_speed` and
/// `min_speed`; the per-road rollup in the analytics crate then reduces
/// them to a real max/min across all observations sharing a road name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficRow {
    /// Road name the observation belongs to.
    pub road_name: String,
    /// Observed average vehicle speed, km/h.
    pub max_speed: f64,
    /// Observed average vehicle speed, km/h (same value as `max_speed`).
    pub min_speed: f64,
}

/// One accident casualty record, reduced to the fields the yearly rollup
/// needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccidentRow {
    /// UTC calendar year the accident occurred in.
    pub year: i32,
    /// People killed.
    pub killed: u32,
    /// People injured and hospitalized.
    pub hospitalized: u32,
    /// People injured but not hospitalized.
    pub non_hospitalized: u32,
}

/// Yearly accident aggregate: per-year sums, per-record means, and
/// untouched copies of the sums.
///
/// The `*_orig` columns duplicate the sums so a consumer can swap the
/// primary columns between actual and mean display without recomputing
/// anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccidentYearRow {
    /// UTC calendar year.
    pub year: i32,
    /// Total people killed that year.
    pub killed: u32,
    /// Total people hospitalized that year.
    pub hospitalized: u32,
    /// Total people injured but not hospitalized that year.
    pub non_hospitalized: u32,
    /// Mean killed per record that year.
    pub killed_mean: f64,
    /// Mean hospitalized per record that year.
    pub hospitalized_mean: f64,
    /// Mean non-hospitalized per record that year.
    pub non_hospitalized_mean: f64,
    /// Copy of `killed` for the actual/mean display toggle.
    pub killed_orig: u32,
    /// Copy of `hospitalized` for the actual/mean display toggle.
    pub hospitalized_orig: u32,
    /// Copy of `non_hospitalized` for the actual/mean display toggle.
    pub non_hospitalized_orig: u32,
}

/// Per-road speed aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSpeedRow {
    /// Road name (rollup grouping key).
    pub road_name: String,
    /// Highest observed speed across the road's records, km/h.
    pub max_speed: f64,
    /// Lowest observed speed across the road's records, km/h.
    pub min_speed: f64,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn dataset_id_round_trips_through_strum() {
        assert_eq!(DatasetId::BikeStations.to_string(), "bike_stations");
        assert_eq!(
            DatasetId::from_str("park_and_ride").unwrap(),
            DatasetId::ParkAndRide
        );
    }

    #[test]
    fn payload_shape_defaults_to_wrapped() {
        assert_eq!(PayloadShape::default(), PayloadShape::WrappedResults);
    }

    #[test]
    fn row_columns_serialize_under_their_field_names() {
        let row = TransitStopRow {
            name: "République".to_string(),
            x: 1.0,
            y: 2.0,
        };
        let value = serde_json::to_value(&row).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "x", "y"]);
    }
}

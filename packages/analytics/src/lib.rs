#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived summary tables over normalized mobility data.
//!
//! Two rollups, both pure and both deterministic: grouping goes through a
//! `BTreeMap` so output rows always come back sorted by their grouping key.

use std::collections::BTreeMap;

use mobility_map_models::{AccidentRow, AccidentYearRow, RoadSpeedRow, TrafficRow};

/// Groups accident records by UTC calendar year.
///
/// Per year: sums of killed / hospitalized / non-hospitalized, the
/// per-record mean of each (sum divided by that year's record count), and
/// `*_orig` copies of the sums for a non-destructive actual/mean display
/// toggle. One row per distinct year, sorted ascending.
#[must_use]
pub fn accident_yearly_rollup(records: &[AccidentRow]) -> Vec<AccidentYearRow> {
    #[derive(Default)]
    struct Totals {
        killed: u32,
        hospitalized: u32,
        non_hospitalized: u32,
        count: u32,
    }

    let mut by_year: BTreeMap<i32, Totals> = BTreeMap::new();
    for record in records {
        let totals = by_year.entry(record.year).or_default();
        totals.killed += record.killed;
        totals.hospitalized += record.hospitalized;
        totals.non_hospitalized += record.non_hospitalized;
        totals.count += 1;
    }

    let rows: Vec<AccidentYearRow> = by_year
        .into_iter()
        .map(|(year, totals)| {
            let count = f64::from(totals.count);
            AccidentYearRow {
                year,
                killed: totals.killed,
                hospitalized: totals.hospitalized,
                non_hospitalized: totals.non_hospitalized,
                killed_mean: f64::from(totals.killed) / count,
                hospitalized_mean: f64::from(totals.hospitalized) / count,
                non_hospitalized_mean: f64::from(totals.non_hospitalized) / count,
                killed_orig: totals.killed,
                hospitalized_orig: totals.hospitalized,
                non_hospitalized_orig: totals.non_hospitalized,
            }
        })
        .collect();

    log::info!(
        "aggregated {} accident records into {} years",
        records.len(),
        rows.len()
    );
    rows
}

/// Groups traffic observations by road name.
///
/// Per road: max of the `max_speed` values and min of the `min_speed`
/// values across all records sharing that name. Since each input record
/// carries a single observed speed in both slots, this yields the highest
/// and lowest single observation per road. One row per distinct road name,
/// sorted by name.
#[must_use]
pub fn road_speed_rollup(records: &[TrafficRow]) -> Vec<RoadSpeedRow> {
    let mut by_road: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for record in records {
        by_road
            .entry(&record.road_name)
            .and_modify(|(max, min)| {
                *max = max.max(record.max_speed);
                *min = min.min(record.min_speed);
            })
            .or_insert((record.max_speed, record.min_speed));
    }

    let rows: Vec<RoadSpeedRow> = by_road
        .into_iter()
        .map(|(road_name, (max_speed, min_speed))| RoadSpeedRow {
            road_name: road_name.to_string(),
            max_speed,
            min_speed,
        })
        .collect();

    log::info!(
        "aggregated {} traffic records into {} roads",
        records.len(),
        rows.len()
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accident(year: i32, killed: u32, hospitalized: u32, non_hospitalized: u32) -> AccidentRow {
        AccidentRow {
            year,
            killed,
            hospitalized,
            non_hospitalized,
        }
    }

    fn observation(road: &str, speed: f64) -> TrafficRow {
        TrafficRow {
            road_name: road.to_string(),
            max_speed: speed,
            min_speed: speed,
        }
    }

    #[test]
    fn accident_rollup_sums_and_means_per_year() {
        let records = [
            accident(2019, 1, 2, 3),
            accident(2019, 3, 0, 1),
            accident(2020, 0, 1, 0),
        ];
        let rows = accident_yearly_rollup(&records);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].year, 2019);
        assert_eq!(rows[0].killed, 4);
        assert_eq!(rows[0].hospitalized, 2);
        assert_eq!(rows[0].non_hospitalized, 4);
        assert!((rows[0].killed_mean - 2.0).abs() < f64::EPSILON);
        assert!((rows[0].hospitalized_mean - 1.0).abs() < f64::EPSILON);
        assert!((rows[0].non_hospitalized_mean - 2.0).abs() < f64::EPSILON);
        assert_eq!(rows[1].year, 2020);
        assert_eq!(rows[1].killed, 0);
    }

    #[test]
    fn accident_rollup_keeps_original_copies_of_sums() {
        let rows = accident_yearly_rollup(&[accident(2019, 1, 2, 3), accident(2019, 3, 0, 1)]);
        assert_eq!(rows[0].killed_orig, rows[0].killed);
        assert_eq!(rows[0].hospitalized_orig, rows[0].hospitalized);
        assert_eq!(rows[0].non_hospitalized_orig, rows[0].non_hospitalized);
    }

    #[test]
    fn accident_rollup_sorts_years_ascending() {
        let rows = accident_yearly_rollup(&[
            accident(2021, 0, 0, 0),
            accident(2018, 0, 0, 0),
            accident(2020, 0, 0, 0),
        ]);
        let years: Vec<i32> = rows.iter().map(|row| row.year).collect();
        assert_eq!(years, [2018, 2020, 2021]);
    }

    #[test]
    fn accident_rollup_of_nothing_is_empty() {
        assert!(accident_yearly_rollup(&[]).is_empty());
    }

    #[test]
    fn road_rollup_takes_max_of_max_and_min_of_min() {
        let records = [
            observation("A", 50.0),
            observation("A", 70.0),
            observation("B", 30.0),
        ];
        let rows = road_speed_rollup(&records);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].road_name, "A");
        assert!((rows[0].max_speed - 70.0).abs() < f64::EPSILON);
        assert!((rows[0].min_speed - 50.0).abs() < f64::EPSILON);
        assert_eq!(rows[1].road_name, "B");
        assert!((rows[1].max_speed - 30.0).abs() < f64::EPSILON);
        assert!((rows[1].min_speed - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn road_rollup_sorts_by_name() {
        let records = [
            observation("Rue de Nantes", 40.0),
            observation("Avenue Aristide Briand", 55.0),
        ];
        let rows = road_speed_rollup(&records);
        assert_eq!(rows[0].road_name, "Avenue Aristide Briand");
        assert_eq!(rows[1].road_name, "Rue de Nantes");
    }

    #[test]
    fn road_rollup_of_nothing_is_empty() {
        assert!(road_speed_rollup(&[]).is_empty());
    }
}

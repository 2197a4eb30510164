//! TOML source-set configuration.
//!
//! A source set names, for each dataset, exactly one origin (remote URL or
//! local file) and the payload shape to expect there. The default set is
//! embedded at compile time from `sources/rennes.toml`.

use std::path::PathBuf;

use mobility_map_models::{DatasetId, PayloadShape, RecordSource};
use serde::Deserialize;
use thiserror::Error;

/// Errors loading or validating a source set.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file read failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML or misses a dataset section.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A dataset entry did not name exactly one origin.
    #[error("{dataset}: exactly one of `url` or `path` must be set")]
    AmbiguousOrigin {
        /// Dataset whose entry was invalid.
        dataset: DatasetId,
    },
}

/// One dataset's origin: a `url` or a `path`, never both, plus the payload
/// shape (defaults to the wrapped `results` shape).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceEntry {
    /// Remote endpoint to GET.
    #[serde(default)]
    pub url: Option<String>,
    /// Local JSON file to read.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Expected top-level payload shape.
    #[serde(default)]
    pub shape: PayloadShape,
}

impl SourceEntry {
    /// Resolves the entry into a concrete [`RecordSource`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AmbiguousOrigin`] unless exactly one of
    /// `url` and `path` is set.
    pub fn resolve(&self, dataset: DatasetId) -> Result<RecordSource, ConfigError> {
        match (&self.url, &self.path) {
            (Some(url), None) => Ok(RecordSource::Remote {
                url: url.clone(),
                shape: self.shape,
            }),
            (None, Some(path)) => Ok(RecordSource::Local {
                path: path.clone(),
                shape: self.shape,
            }),
            _ => Err(ConfigError::AmbiguousOrigin { dataset }),
        }
    }
}

/// A complete source set: one entry per dataset, all required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSet {
    /// Bike share station feed.
    pub bike_stations: SourceEntry,
    /// Bike repair station export.
    pub repair_stations: SourceEntry,
    /// Cycling infrastructure export.
    pub cycle_paths: SourceEntry,
    /// Park-and-ride occupancy feed.
    pub park_and_ride: SourceEntry,
    /// Bus/metro stop export.
    pub transit_stops: SourceEntry,
    /// Road traffic speed feed.
    pub traffic: SourceEntry,
    /// Accident casualty export.
    pub accidents: SourceEntry,
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Mobility data source adapter and per-dataset normalizers.
//!
//! The adapter ([`fetch::fetch_records`]) turns a [`RecordSource`] into a
//! collection of heterogeneous JSON records. Each dataset module under
//! [`datasets`] then maps those records into typed rows with projected
//! coordinates. A dataset's normalization either fully succeeds or fully
//! fails — there is no partial table with defaulted columns.

pub mod datasets;
pub mod fetch;
pub mod fields;

use mobility_map_geo::ProjectionError;
use mobility_map_models::DatasetId;

/// Errors retrieving a raw record collection.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// Response status code.
        status: reqwest::StatusCode,
    },

    /// Local file read failed (missing file, permissions).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload was not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload parsed as JSON but did not have the declared shape.
    #[error("unexpected payload shape from {origin}: {message}")]
    Shape {
        /// URL or file path the payload came from.
        origin: String,
        /// What was wrong with the shape.
        message: String,
    },
}

/// Errors normalizing a record collection into a typed table.
///
/// Every variant names the dataset and the zero-based record index so a
/// failure report can point straight at the offending upstream record.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A required field is absent.
    #[error("{dataset} record {index}: missing required field `{field}`")]
    MissingField {
        /// Dataset being normalized.
        dataset: DatasetId,
        /// Zero-based index of the record in the input collection.
        index: usize,
        /// Key that was absent.
        field: &'static str,
    },

    /// A required field is present but has the wrong type or shape.
    #[error("{dataset} record {index}: field `{field}` is not {expected}")]
    InvalidField {
        /// Dataset being normalized.
        dataset: DatasetId,
        /// Zero-based index of the record in the input collection.
        index: usize,
        /// Key with the unexpected value.
        field: &'static str,
        /// What the normalizer expected to find.
        expected: &'static str,
    },

    /// A coordinate was outside the projection domain.
    #[error("{dataset} record {index}: {source}")]
    Projection {
        /// Dataset being normalized.
        dataset: DatasetId,
        /// Zero-based index of the record in the input collection.
        index: usize,
        /// The underlying projection failure.
        #[source]
        source: ProjectionError,
    },
}

impl SchemaError {
    /// Record index the error occurred at.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::MissingField { index, .. }
            | Self::InvalidField { index, .. }
            | Self::Projection { index, .. } => *index,
        }
    }

    /// Dataset the error occurred in.
    #[must_use]
    pub const fn dataset(&self) -> DatasetId {
        match self {
            Self::MissingField { dataset, .. }
            | Self::InvalidField { dataset, .. }
            | Self::Projection { dataset, .. } => *dataset,
        }
    }
}

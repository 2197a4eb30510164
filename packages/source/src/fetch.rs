//! Unified record adapter for remote endpoints and local JSON files.
//!
//! Both origins produce the same thing: a `Vec<serde_json::Value>` of
//! heterogeneous records, extracted according to the source's declared
//! [`PayloadShape`]. Nothing is cached — every call re-fetches.

use std::path::Path;
use std::time::Duration;

use mobility_map_models::{PayloadShape, RecordSource};
use serde_json::Value;

use crate::FetchError;

/// Hard per-request timeout. Refresh runs are short and synchronous, so a
/// stuck endpoint must not hold the whole refresh hostage.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the HTTP client used by [`fetch_records`], with the hard
/// per-request timeout applied.
///
/// # Errors
///
/// Returns [`FetchError::Http`] if the TLS backend fails to initialize.
pub fn client() -> Result<reqwest::Client, FetchError> {
    Ok(reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?)
}

/// Fetches the raw record collection for a source.
///
/// # Errors
///
/// Returns [`FetchError`] on network failure, non-success HTTP status,
/// unreadable file, malformed JSON, or a payload that does not match the
/// source's declared shape.
pub async fn fetch_records(
    client: &reqwest::Client,
    source: &RecordSource,
) -> Result<Vec<Value>, FetchError> {
    match source {
        RecordSource::Remote { url, shape } => {
            log::info!("fetching {url}");
            let response = client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url: url.clone(),
                    status,
                });
            }
            let payload: Value = response.json().await?;
            records_from_payload(payload, *shape, url)
        }
        RecordSource::Local { path, shape } => read_local(path, *shape),
    }
}

/// Reads and parses a local JSON file into a record collection.
///
/// # Errors
///
/// Returns [`FetchError`] on a missing/unreadable file, malformed JSON, or
/// a shape mismatch.
pub fn read_local(path: &Path, shape: PayloadShape) -> Result<Vec<Value>, FetchError> {
    log::info!("reading {}", path.display());
    let data = std::fs::read_to_string(path)?;
    let payload: Value = serde_json::from_str(&data)?;
    records_from_payload(payload, shape, &path.display().to_string())
}

/// Extracts the record array from a parsed payload according to the
/// declared shape.
fn records_from_payload(
    payload: Value,
    shape: PayloadShape,
    origin: &str,
) -> Result<Vec<Value>, FetchError> {
    match shape {
        PayloadShape::WrappedResults => {
            let Value::Object(mut object) = payload else {
                return Err(FetchError::Shape {
                    origin: origin.to_string(),
                    message: "expected a top-level JSON object".to_string(),
                });
            };
            let Some(results) = object.remove("results") else {
                return Err(FetchError::Shape {
                    origin: origin.to_string(),
                    message: "top-level object has no `results` key".to_string(),
                });
            };
            let Value::Array(records) = results else {
                return Err(FetchError::Shape {
                    origin: origin.to_string(),
                    message: "`results` is not an array".to_string(),
                });
            };
            Ok(records)
        }
        PayloadShape::BareArray => {
            let Value::Array(records) = payload else {
                return Err(FetchError::Shape {
                    origin: origin.to_string(),
                    message: "expected a top-level JSON array".to_string(),
                });
            };
            Ok(records)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;

    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("mobility_map_{}_{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn unwraps_results_container() {
        let payload = json!({"total_count": 2, "results": [{"a": 1}, {"a": 2}]});
        let records =
            records_from_payload(payload, PayloadShape::WrappedResults, "test").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], json!({"a": 1}));
    }

    #[test]
    fn accepts_bare_array() {
        let payload = json!([{"a": 1}]);
        let records = records_from_payload(payload, PayloadShape::BareArray, "test").unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn wrapped_mode_rejects_missing_results() {
        let payload = json!({"rows": []});
        let err =
            records_from_payload(payload, PayloadShape::WrappedResults, "test").unwrap_err();
        assert!(matches!(err, FetchError::Shape { .. }), "got {err:?}");
    }

    #[test]
    fn wrapped_mode_rejects_non_object() {
        let err = records_from_payload(json!([1, 2]), PayloadShape::WrappedResults, "test")
            .unwrap_err();
        assert!(matches!(err, FetchError::Shape { .. }));
    }

    #[test]
    fn bare_mode_rejects_object() {
        let err =
            records_from_payload(json!({"results": []}), PayloadShape::BareArray, "test")
                .unwrap_err();
        assert!(matches!(err, FetchError::Shape { .. }));
    }

    #[test]
    fn reads_local_wrapped_file() {
        let path = temp_file("wrapped.json", r#"{"results": [{"nom": "a"}]}"#);
        let records = read_local(&path, PayloadShape::WrappedResults).unwrap();
        assert_eq!(records.len(), 1);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_local(Path::new("/nonexistent/mobility.json"), PayloadShape::BareArray)
            .unwrap_err();
        assert!(matches!(err, FetchError::Io(_)));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let path = temp_file("garbled.json", "{not json");
        let err = read_local(&path, PayloadShape::BareArray).unwrap_err();
        assert!(matches!(err, FetchError::Json(_)));
        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn fetch_records_reads_local_sources() {
        let path = temp_file("fetch_local.json", r"[1, 2, 3]");
        let source = RecordSource::Local {
            path: path.clone(),
            shape: PayloadShape::BareArray,
        };
        let records = fetch_records(&client().unwrap(), &source).await.unwrap();
        assert_eq!(records.len(), 3);
        std::fs::remove_file(&path).ok();
    }
}

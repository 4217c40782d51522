//! Pretty JSON with a fixed layout.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to deterministic JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
/// - Struct fields in declaration order, map keys sorted
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Same as `to_json_stable` but returns bytes for direct file writing.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    to_json_stable(value).map(String::into_bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tstai_domain::{LogSelection, RunLog, RunSummary};

    #[test]
    fn output_is_indented_and_newline_terminated() {
        let json = to_json_stable(&serde_json::json!({"apiKey": "k"})).unwrap();
        assert_eq!(json, "{\n  \"apiKey\": \"k\"\n}\n");
    }

    #[test]
    fn map_keys_are_sorted() {
        let json = to_json_stable(&serde_json::json!({"zebra": 1, "apple": 2})).unwrap();
        assert!(json.find("apple").unwrap() < json.find("zebra").unwrap());
    }

    #[test]
    fn run_log_fields_keep_document_order() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let log = RunLog::new(&RunSummary::from_results(Vec::new()), LogSelection::All, now);
        let json = to_json_stable(&log).unwrap();

        let keys = [
            "testRunId",
            "timestamp",
            "totalTests",
            "passed",
            "failed",
            "tests",
        ];
        let order: Vec<usize> = keys
            .iter()
            .map(|key| json.find(&format!("\"{key}\"")).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
        assert!(json.contains("\"timestamp\": \"2025-06-01T12:00:00.000Z\""));
    }
}

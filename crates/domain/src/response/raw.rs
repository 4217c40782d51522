//! What the target API answered.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::StatusCode;

/// A response as observed by the request executor.
///
/// Any status code is a valid observation; a 404 or 500 is data, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase (e.g. "Not Found").
    pub status_text: String,
    /// Response headers, names lowercased.
    pub headers: BTreeMap<String, String>,
    /// Body decoded as JSON when possible, otherwise as a string.
    #[serde(rename = "data")]
    pub body: serde_json::Value,
    /// Wall-clock time from send to fully received body.
    #[serde(rename = "responseTime")]
    pub response_time_ms: f64,
}

impl RawResponse {
    /// Builds a response from raw transport data.
    #[must_use]
    pub fn new(
        status: impl Into<StatusCode>,
        headers: BTreeMap<String, String>,
        body: &[u8],
        elapsed: Duration,
    ) -> Self {
        let status = status.into();
        Self {
            status: status.as_u16(),
            status_text: status.reason_phrase().to_string(),
            headers,
            body: decode_body(body),
            response_time_ms: elapsed.as_secs_f64() * 1000.0,
        }
    }
}

fn decode_body(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(body).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn json_body_is_decoded() {
        let response = RawResponse::new(
            200,
            BTreeMap::new(),
            br#"{"id": 1}"#,
            Duration::from_millis(12),
        );
        assert_eq!(response.body, json!({"id": 1}));
        assert_eq!(response.status_text, "OK");
        assert!((response.response_time_ms - 12.0).abs() < 1e-6);
    }

    #[test]
    fn non_json_body_is_kept_as_text() {
        let response = RawResponse::new(404, BTreeMap::new(), b"Not here", Duration::ZERO);
        assert_eq!(response.body, json!("Not here"));
    }

    #[test]
    fn serializes_with_log_field_names() {
        let response = RawResponse::new(201, BTreeMap::new(), b"{}", Duration::ZERO);
        let value = serde_json::to_value(&response).unwrap_or_default();
        assert_eq!(value["statusText"], json!("Created"));
        assert!(value.get("data").is_some());
        assert!(value.get("responseTime").is_some());
    }
}

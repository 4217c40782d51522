//! Runtime configuration for the interpretation service and target calls.

use std::time::Duration;

use thiserror::Error;
use tstai_domain::ApiKey;
use url::Url;

/// Environment variable holding an API key; it wins over the stored one.
pub const API_KEY_ENV: &str = "TSTAI_API_KEY";
/// Environment variable overriding the interpretation service URL.
pub const API_URL_ENV: &str = "TSTAI_API_URL";
/// Environment variable bounding target requests, in milliseconds.
pub const HTTP_TIMEOUT_ENV: &str = "TSTAI_HTTP_TIMEOUT_MS";
/// Production interpretation service.
pub const DEFAULT_API_URL: &str = "https://api.tstai.dev";

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The service URL is not an absolute http(s) URL.
    #[error("invalid API URL '{url}': {reason}")]
    InvalidApiUrl {
        /// Offending value.
        url: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Where the interpretation service lives and how target calls behave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    api_url: String,
    http_timeout: Option<Duration>,
}

impl ServiceConfig {
    /// Validates `api_url`; trailing slashes are dropped.
    ///
    /// # Errors
    ///
    /// Returns `InvalidApiUrl` unless the URL is absolute http or https.
    pub fn new(api_url: &str, http_timeout_ms: Option<u64>) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidApiUrl {
            url: api_url.to_string(),
            reason,
        };
        let parsed = Url::parse(api_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }
        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            http_timeout: http_timeout_ms.filter(|ms| *ms > 0).map(Duration::from_millis),
        })
    }

    /// Base URL of the interpretation service, without trailing slash.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Timeout for target API requests, if any.
    #[must_use]
    pub const fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout
    }

    /// Full URL of a service endpoint such as `/v1/parse`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            http_timeout: None,
        }
    }
}

/// Reads `TSTAI_API_KEY`; unset or blank means no key.
#[must_use]
pub fn environment_api_key() -> Option<ApiKey> {
    std::env::var(API_KEY_ENV).ok().and_then(ApiKey::new)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_points_at_production() {
        let config = ServiceConfig::default();
        assert_eq!(config.endpoint("/v1/parse"), "https://api.tstai.dev/v1/parse");
        assert_eq!(config.http_timeout(), None);
    }

    #[test]
    fn trailing_slashes_are_dropped() {
        let config = ServiceConfig::new("http://localhost:8080/", None).unwrap();
        assert_eq!(config.endpoint("/v1/whoami"), "http://localhost:8080/v1/whoami");
    }

    #[test]
    fn zero_timeout_means_none() {
        assert_eq!(ServiceConfig::new(DEFAULT_API_URL, Some(0)).unwrap().http_timeout(), None);
        assert_eq!(
            ServiceConfig::new(DEFAULT_API_URL, Some(1500)).unwrap().http_timeout(),
            Some(Duration::from_millis(1500))
        );
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(ServiceConfig::new("ftp://example.com", None).is_err());
        assert!(ServiceConfig::new("localhost:8080", None).is_err());
        assert!(ServiceConfig::new("not a url", None).is_err());
    }
}

//! HTTP client port

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use thiserror::Error;
use tstai_domain::{OutboundRequest, RawResponse};

/// Transport-level failures.
///
/// A response with any status code is not an error; these cover the cases
/// where no response was obtained at all.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request did not complete in time.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Configured timeout.
        timeout_ms: u64,
    },

    /// Host name resolution failed.
    #[error("could not resolve host {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying message.
        message: String,
    },

    /// Nothing listens on the target port.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// Any other connection-level failure.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Redirect limit exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// The request body could not be encoded.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

/// A completed request/response pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    /// Headers exactly as they were put on the outbound request.
    pub request_headers: BTreeMap<String, String>,
    /// What the server answered.
    pub response: RawResponse,
}

/// Port for executing HTTP requests against the system under test.
pub trait HttpClient: Send + Sync {
    /// Sends the request and captures the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error only for network-level failures.
    fn execute(
        &self,
        request: &OutboundRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Exchange, HttpClientError>> + Send + '_>>;
}

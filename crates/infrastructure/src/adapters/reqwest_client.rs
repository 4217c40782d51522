//! HTTP client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port. It sends the planned
//! request to the target API and reports back the response together with
//! the headers that actually went out on the wire.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use reqwest::header::HeaderMap;
use reqwest::{Client, Method, Url};
use tstai_application::ports::{Exchange, HttpClient, HttpClientError};
use tstai_domain::{HttpMethod, OutboundRequest, RawResponse};

/// User agent announced to target APIs.
pub const USER_AGENT: &str = concat!("tstai/", env!("CARGO_PKG_VERSION"));

const ACCEPT: &str = "application/json, text/plain, */*";
const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
///
/// Default configuration:
/// - No request timeout unless one is given
/// - Follow redirects: up to 10
/// - TLS verification: enabled
pub struct ReqwestHttpClient {
    client: Client,
    timeout: Option<Duration>,
}

impl ReqwestHttpClient {
    /// Creates a client, optionally bounding each request by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(timeout: Option<Duration>) -> Result<Self, HttpClientError> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout
            .map_or(0, |t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX))
    }

    /// Builds the reqwest request; the result carries every header that
    /// will be sent.
    fn build_request(
        &self,
        request: &OutboundRequest,
    ) -> Result<reqwest::Request, HttpClientError> {
        let url = Url::parse(&request.url)
            .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, ACCEPT);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        builder
            .build()
            .map_err(|e| HttpClientError::InvalidBody(e.to_string()))
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let host = || {
            error
                .url()
                .and_then(|u| u.host_str().map(ToString::to_string))
                .unwrap_or_else(|| "unknown".to_string())
        };

        if error.is_connect() {
            let message = full_message(error);
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        HttpClientError::Other(full_message(error))
    }
}

/// Error message including the source chain, which is where reqwest keeps
/// the io error kind.
fn full_message(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Lowercased header names; repeated headers are joined with `", "`.
fn header_map(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .keys()
        .map(|name| {
            let values: Vec<&str> = headers
                .get_all(name)
                .iter()
                .map(|v| v.to_str().unwrap_or("<binary>"))
                .collect();
            (name.to_string(), values.join(", "))
        })
        .collect()
}

impl HttpClient for ReqwestHttpClient {
    fn execute(
        &self,
        request: &OutboundRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Exchange, HttpClientError>> + Send + '_>> {
        let built = self.build_request(request);
        let timeout_ms = self.timeout_ms();

        Box::pin(async move {
            let built = built?;
            let request_headers = header_map(built.headers());
            tracing::trace!(headers = request_headers.len(), "built request");

            let start = Instant::now();
            let response = self
                .client
                .execute(built)
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            let status = response.status().as_u16();
            let response_headers = header_map(response.headers());

            let body = response
                .bytes()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;
            let elapsed = start.elapsed();
            tracing::trace!(bytes = body.len(), "read response body");

            Ok(Exchange {
                request_headers,
                response: RawResponse::new(status, response_headers, &body, elapsed),
            })
        })
    }
}

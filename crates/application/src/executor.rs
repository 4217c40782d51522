//! Request execution.

use std::sync::Arc;

use thiserror::Error;
use tstai_domain::{ExecutionPlan, OutboundRequest};

use crate::ports::{Exchange, HttpClient, HttpClientError};

/// Error type for request execution. Always scoped to one test.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecuteError {
    /// The joined URL is not an absolute http(s) URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The target could not be reached.
    #[error("network error: {0}")]
    Network(#[from] HttpClientError),
}

/// Issues the request described by a plan.
///
/// # Example
///
/// ```ignore
/// let executor = RequestExecutor::new(Arc::new(ReqwestHttpClient::new(None)?));
/// let exchange = executor.execute(&plan, "https://api.example.com").await?;
/// println!("{}", exchange.response.status);
/// ```
pub struct RequestExecutor<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> RequestExecutor<C> {
    /// Creates an executor on top of the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Sends `plan` against `baseurl`.
    ///
    /// Any response status is returned as `Ok`.
    ///
    /// # Errors
    ///
    /// Returns `ExecuteError` on an invalid URL or a network failure.
    pub async fn execute(
        &self,
        plan: &ExecutionPlan,
        baseurl: &str,
    ) -> Result<Exchange, ExecuteError> {
        let request = plan.to_request(baseurl);
        Self::validate(&request)?;

        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let exchange = self.client.execute(&request).await?;
        tracing::debug!(
            status = exchange.response.status,
            elapsed_ms = exchange.response.response_time_ms,
            "received response"
        );
        Ok(exchange)
    }

    fn validate(request: &OutboundRequest) -> Result<(), ExecuteError> {
        if !request.url.starts_with("http://") && !request.url.starts_with("https://") {
            return Err(ExecuteError::InvalidUrl(format!(
                "URL must start with http:// or https://: {}",
                request.url
            )));
        }
        Ok(())
    }
}

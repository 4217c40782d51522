//! Execution plans produced by the interpretation service.

use serde::Serialize;

use crate::declaration::TestDeclaration;
use crate::error::{DomainError, DomainResult};
use crate::request::{HttpMethod, OutboundRequest};

/// JSON object sent as a request body.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Structured form of one natural-language instruction.
///
/// Invariants, enforced by [`ExecutionPlan::new`]:
/// - `endpoint` starts with `/`
/// - `expected_status` lies in `100..=599`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionPlan {
    method: HttpMethod,
    endpoint: String,
    payload: Payload,
    expected_status: u16,
}

impl ExecutionPlan {
    /// Validates and builds a plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an absolute path or the
    /// expected status is not an HTTP status code.
    pub fn new(
        method: HttpMethod,
        endpoint: impl Into<String>,
        payload: Payload,
        expected_status: i64,
    ) -> DomainResult<Self> {
        let endpoint = endpoint.into();
        if !endpoint.starts_with('/') {
            return Err(DomainError::InvalidEndpoint(endpoint));
        }

        let expected_status = u16::try_from(expected_status)
            .ok()
            .filter(|code| (100..=599).contains(code))
            .ok_or(DomainError::InvalidStatus(expected_status))?;

        Ok(Self {
            method,
            endpoint,
            payload,
            expected_status,
        })
    }

    /// HTTP method to use.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Path relative to the declaration's base URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Body to send; empty when the instruction implies none.
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Status the response must carry for the test to pass.
    #[must_use]
    pub const fn expected_status(&self) -> u16 {
        self.expected_status
    }

    /// Applies the declaration's method and payload overrides.
    #[must_use]
    pub fn with_overrides(mut self, declaration: &TestDeclaration) -> Self {
        if let Some(method) = declaration.method() {
            self.method = method;
        }
        if let Some(payload) = declaration.payload() {
            self.payload = payload.clone();
        }
        self
    }

    /// Joins the base URL and the endpoint.
    ///
    /// A single trailing slash on `baseurl` is dropped so the path separator
    /// is not doubled.
    #[must_use]
    pub fn target_url(&self, baseurl: &str) -> String {
        let base = baseurl.strip_suffix('/').unwrap_or(baseurl);
        format!("{base}{}", self.endpoint)
    }

    /// Builds the request the executor sends for this plan.
    #[must_use]
    pub fn to_request(&self, baseurl: &str) -> OutboundRequest {
        let request = OutboundRequest::new(self.method, self.target_url(baseurl));
        if self.method.sends_payload(self.payload.is_empty()) {
            request.with_body(serde_json::Value::Object(self.payload.clone()))
        } else {
            request
        }
    }
}

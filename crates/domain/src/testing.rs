//! Per-test results and run summaries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::plan::Payload;
use crate::request::HttpMethod;
use crate::response::RawResponse;

/// Verdict for one test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestOutcome {
    /// Actual status equals the expected status.
    Passed,
    /// Status mismatch, or the test could not be carried out.
    Failed,
}

impl TestOutcome {
    /// Maps an evaluation verdict to an outcome.
    #[must_use]
    pub const fn from_passed(passed: bool) -> Self {
        if passed { Self::Passed } else { Self::Failed }
    }
}

/// The request side of an audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    /// Method actually used.
    pub method: HttpMethod,
    /// Full target URL.
    pub url: String,
    /// Headers actually sent on the wire.
    pub headers: BTreeMap<String, String>,
    /// Plan payload.
    pub payload: Payload,
    /// Declaration base URL.
    pub baseurl: String,
    /// Plan endpoint.
    pub endpoint: String,
}

/// Everything recorded about one executed declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// 1-based position in registration order.
    pub test_number: usize,
    /// The natural-language instruction.
    pub instruction: String,
    /// Present once a plan was resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestRecord>,
    /// Present once the target answered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<RawResponse>,
    /// Verdict.
    pub result: TestOutcome,
    /// Status the plan expected.
    pub expected_status: Option<u16>,
    /// Status the target returned.
    pub actual_status: Option<u16>,
    /// Why the test failed without a comparable response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    /// A test that ran to completion and was evaluated.
    #[must_use]
    pub fn evaluated(
        test_number: usize,
        instruction: impl Into<String>,
        request: RequestRecord,
        response: RawResponse,
        expected_status: u16,
        passed: bool,
    ) -> Self {
        let actual_status = response.status;
        Self {
            test_number,
            instruction: instruction.into(),
            request: Some(request),
            response: Some(response),
            result: TestOutcome::from_passed(passed),
            expected_status: Some(expected_status),
            actual_status: Some(actual_status),
            error: None,
        }
    }

    /// A test that failed before a response could be compared.
    #[must_use]
    pub fn errored(
        test_number: usize,
        instruction: impl Into<String>,
        request: Option<RequestRecord>,
        expected_status: Option<u16>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            test_number,
            instruction: instruction.into(),
            request,
            response: None,
            result: TestOutcome::Failed,
            expected_status,
            actual_status: None,
            error: Some(error.into()),
        }
    }

    /// Whether the test passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.result == TestOutcome::Passed
    }

    /// One-line explanation for the failed-tests listing.
    #[must_use]
    pub fn failure_detail(&self) -> String {
        if let Some(error) = &self.error {
            return format!("Error: {error}");
        }
        let expected = self
            .expected_status
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        let actual = self
            .actual_status
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        format!("Expected: {expected}, Got: {actual}")
    }
}

/// Aggregate view of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Number of declarations processed.
    pub total_tests: usize,
    /// Number of passed tests.
    pub passed: usize,
    /// Number of failed tests.
    pub failed: usize,
    /// Results in registration order.
    pub tests: Vec<ExecutionResult>,
}

impl RunSummary {
    /// Builds the summary from the ordered result list.
    #[must_use]
    pub fn from_results(tests: Vec<ExecutionResult>) -> Self {
        let total_tests = tests.len();
        let passed = tests.iter().filter(|r| r.passed()).count();
        Self {
            total_tests,
            passed,
            failed: total_tests - passed,
            tests,
        }
    }

    /// Success rate in percent, rounded half-up to one decimal place.
    ///
    /// An empty run has a rate of `0.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        if self.total_tests == 0 {
            return 0.0;
        }
        let rate = self.passed as f64 / self.total_tests as f64 * 100.0;
        (rate * 10.0).round() / 10.0
    }

    /// Success rate with exactly one fractional digit, e.g. `66.7`.
    #[must_use]
    pub fn success_rate_display(&self) -> String {
        format!("{:.1}", self.success_rate())
    }

    /// Failed results in registration order.
    pub fn failures(&self) -> impl Iterator<Item = &ExecutionResult> {
        self.tests.iter().filter(|r| !r.passed())
    }

    /// Check if all tests passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

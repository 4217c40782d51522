//! Outcome evaluation.

use tstai_domain::{ExecutionPlan, RawResponse};

/// Result of comparing a response with its plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the test passed.
    pub passed: bool,
}

/// Passes iff the actual status equals the expected one. No ranges.
#[must_use]
pub fn evaluate(plan: &ExecutionPlan, response: &RawResponse) -> Verdict {
    Verdict {
        passed: response.status == plan.expected_status(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::time::Duration;
    use tstai_domain::{HttpMethod, Payload};

    fn plan(expected: i64) -> ExecutionPlan {
        ExecutionPlan::new(HttpMethod::Get, "/posts", Payload::new(), expected).unwrap()
    }

    fn response(status: u16) -> RawResponse {
        RawResponse::new(status, BTreeMap::new(), b"", Duration::ZERO)
    }

    #[test]
    fn equal_status_passes() {
        assert!(evaluate(&plan(200), &response(200)).passed);
        assert!(evaluate(&plan(404), &response(404)).passed);
    }

    #[test]
    fn near_miss_fails() {
        assert!(!evaluate(&plan(200), &response(201)).passed);
        assert!(!evaluate(&plan(201), &response(200)).passed);
    }
}

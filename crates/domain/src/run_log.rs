//! Persisted audit log of a run.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::testing::{ExecutionResult, RunSummary};

/// Which results end up in the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSelection {
    /// Every result.
    All,
    /// Failed results only.
    FailedOnly,
}

impl LogSelection {
    /// Maps the `--logs` / `--logs-failed` flags to a selection.
    ///
    /// `--logs` wins when both are given; `None` means no log is written.
    #[must_use]
    pub const fn from_flags(logs: bool, logs_failed: bool) -> Option<Self> {
        match (logs, logs_failed) {
            (true, _) => Some(Self::All),
            (false, true) => Some(Self::FailedOnly),
            (false, false) => None,
        }
    }

    /// Applies the selection to an ordered result list.
    #[must_use]
    pub fn select(self, results: &[ExecutionResult]) -> Vec<ExecutionResult> {
        match self {
            Self::All => results.to_vec(),
            Self::FailedOnly => results.iter().filter(|r| !r.passed()).cloned().collect(),
        }
    }
}

/// JSON document written once per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunLog {
    /// Identifier derived from the start-of-write timestamp.
    pub test_run_id: String,
    /// ISO-8601 timestamp with millisecond precision.
    pub timestamp: String,
    /// Total number of tests in the run.
    pub total_tests: usize,
    /// Passed count.
    pub passed: usize,
    /// Failed count.
    pub failed: usize,
    /// Selected results.
    pub tests: Vec<ExecutionResult>,
}

impl RunLog {
    /// Builds the log document for a finished run.
    #[must_use]
    pub fn new(summary: &RunSummary, selection: LogSelection, now: DateTime<Utc>) -> Self {
        Self {
            test_run_id: Self::run_id(now),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            total_tests: summary.total_tests,
            passed: summary.passed,
            failed: summary.failed,
            tests: selection.select(&summary.tests),
        }
    }

    /// Filesystem-safe identifier with second resolution,
    /// e.g. `test-run-2025-01-31T09-05-07`.
    #[must_use]
    pub fn run_id(now: DateTime<Utc>) -> String {
        format!("test-run-{}", now.format("%Y-%m-%dT%H-%M-%S"))
    }
}

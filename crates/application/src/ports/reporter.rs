//! Progress reporting port

use std::path::Path;

use tstai_domain::{ExecutionPlan, RawResponse, RunSummary};

use super::RunLogError;

/// Receives run progress as it happens.
///
/// Calls arrive in order on the single run task, so implementations may
/// print immediately.
pub trait RunReporter {
    /// The run is about to start.
    fn run_started(&mut self, source: &str, total: usize);

    /// Test `number` (1-based) is about to be resolved.
    fn test_started(&mut self, number: usize, instruction: &str);

    /// A response was evaluated against its plan.
    fn test_evaluated(&mut self, plan: &ExecutionPlan, response: &RawResponse, passed: bool);

    /// Test `number` failed before a response could be evaluated.
    fn test_errored(&mut self, number: usize, reason: &str);

    /// All tests are done.
    fn summary(&mut self, summary: &RunSummary);

    /// The audit log was written.
    fn log_written(&mut self, path: &Path);

    /// The audit log could not be written.
    fn log_failed(&mut self, error: &RunLogError);
}

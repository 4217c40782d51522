//! Run aggregation.

use tstai_domain::{ExecutionResult, RunSummary};

/// Collects results in registration order and keeps running counts.
///
/// Only the run task appends to it, so no synchronization is involved.
#[derive(Debug, Default)]
pub struct RunAggregator {
    results: Vec<ExecutionResult>,
    passed: usize,
    failed: usize,
}

impl RunAggregator {
    /// Creates an empty aggregator sized for `expected` tests.
    #[must_use]
    pub fn with_capacity(expected: usize) -> Self {
        Self {
            results: Vec::with_capacity(expected),
            passed: 0,
            failed: 0,
        }
    }

    /// Appends one result.
    pub fn record(&mut self, result: ExecutionResult) {
        if result.passed() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result);
    }

    /// Closes the run and produces its summary.
    #[must_use]
    pub fn finish(self) -> RunSummary {
        let summary = RunSummary::from_results(self.results);
        debug_assert_eq!(summary.passed, self.passed);
        debug_assert_eq!(summary.failed, self.failed);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tstai_domain::TestOutcome;

    fn result(n: usize, outcome: TestOutcome) -> ExecutionResult {
        let mut r = ExecutionResult::errored(n, format!("test {n}"), None, Some(200), "n/a");
        r.result = outcome;
        r
    }

    #[test]
    fn counts_track_recorded_results() {
        let mut aggregator = RunAggregator::with_capacity(3);
        aggregator.record(result(1, TestOutcome::Passed));
        aggregator.record(result(2, TestOutcome::Failed));
        aggregator.record(result(3, TestOutcome::Passed));

        let summary = aggregator.finish();
        assert_eq!(summary.total_tests, 3);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.passed + summary.failed, summary.total_tests);
        let order: Vec<_> = summary.tests.iter().map(|r| r.test_number).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn empty_aggregator_yields_empty_summary() {
        let summary = RunAggregator::default().finish();
        assert_eq!(summary.total_tests, 0);
        assert_eq!(summary.success_rate_display(), "0.0");
    }
}

//! Terminal implementation of the run reporter.

use std::io::{self, Write};
use std::path::Path;

use tstai_application::ports::{RunLogError, RunReporter};
use tstai_domain::{ExecutionPlan, RawResponse, RunSummary};

use crate::format;

/// Prints run progress as it happens.
///
/// Write errors are ignored: a closed stdout must not change the outcome
/// of a run.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    /// Reporter writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// Reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }
}

impl<W: Write> RunReporter for ConsoleReporter<W> {
    fn run_started(&mut self, source: &str, _total: usize) {
        self.line(&format::run_banner(source));
        self.line("");
    }

    fn test_started(&mut self, number: usize, instruction: &str) {
        self.line(&format::test_header(number, instruction));
    }

    fn test_evaluated(&mut self, plan: &ExecutionPlan, response: &RawResponse, passed: bool) {
        self.line(&format::verdict_line(plan, response, passed));
        self.line("");
    }

    fn test_errored(&mut self, _number: usize, reason: &str) {
        self.line(&format::error_line(reason));
        self.line("");
    }

    fn summary(&mut self, summary: &RunSummary) {
        for line in format::summary_lines(summary) {
            self.line(&line);
        }
    }

    fn log_written(&mut self, path: &Path) {
        self.line(&format::log_written_line(path));
    }

    fn log_failed(&mut self, error: &RunLogError) {
        self.line(&format::log_failed_line(&error.to_string()));
    }
}

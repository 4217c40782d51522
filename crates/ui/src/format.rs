//! Line formatting for the console report.

use std::path::Path;

use colored::Colorize;
use tstai_domain::{ExecutionPlan, RawResponse, RunSummary};

/// Width of the summary separator.
pub const SEPARATOR_WIDTH: usize = 50;

/// `🚀 Running tests from: <source>`
#[must_use]
pub fn run_banner(source: &str) -> String {
    format!("🚀 Running tests from: {source}")
}

/// `🧠 [n] instruction`
#[must_use]
pub fn test_header(number: usize, instruction: &str) -> String {
    format!("🧠 [{number}] {instruction}")
}

/// Green pass line or red mismatch line for an evaluated test.
#[must_use]
pub fn verdict_line(plan: &ExecutionPlan, response: &RawResponse, passed: bool) -> String {
    if passed {
        format!(
            "✅ Passed — {} {} ({})",
            plan.method(),
            plan.endpoint(),
            response.status
        )
        .green()
        .to_string()
    } else {
        format!(
            "❌ Failed — Expected {}, got {}",
            plan.expected_status(),
            response.status
        )
        .red()
        .to_string()
    }
}

/// Red line for a test that never produced a response.
#[must_use]
pub fn error_line(reason: &str) -> String {
    format!("❌ Failed — {reason}").red().to_string()
}

/// `=` repeated across the summary width.
#[must_use]
pub fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

/// The end-of-run summary block, one entry per line.
#[must_use]
pub fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let mut lines = vec![
        "📊 Test Summary".bold().to_string(),
        separator(),
        format!("Total Tests: {}", summary.total_tests),
        format!("✅ Passed: {}", summary.passed).green().to_string(),
        format!("❌ Failed: {}", summary.failed).red().to_string(),
        format!("Success Rate: {}%", summary.success_rate_display()),
    ];

    if summary.failed > 0 {
        lines.push(String::new());
        lines.push("🔍 Failed Tests:".to_string());
        for (index, result) in summary.failures().enumerate() {
            lines.push(format!("{}. {}", index + 1, result.instruction));
            lines.push(format!("   {}", result.failure_detail()));
        }
    }

    lines.push(separator());
    lines
}

/// `📝 Test logs written to: <path>`
#[must_use]
pub fn log_written_line(path: &Path) -> String {
    format!("📝 Test logs written to: {}", path.display())
}

/// Warning printed when the log could not be written.
#[must_use]
pub fn log_failed_line(reason: &str) -> String {
    format!("❌ Failed to write test logs: {reason}")
        .yellow()
        .to_string()
}

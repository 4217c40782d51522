//! Run-level error types

use thiserror::Error;

use crate::ports::InterpreterError;

/// Errors that invalidate a whole run.
///
/// Anything scoped to a single test is recorded as a failed result instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RunError {
    /// No usable credential for the interpretation service.
    #[error("{0}")]
    Authentication(String),

    /// The interpretation service cannot serve requests.
    #[error("{0}")]
    Upstream(String),
}

impl RunError {
    /// Promotes a resolution error to a run error when it is fatal.
    #[must_use]
    pub fn from_fatal(error: &InterpreterError) -> Option<Self> {
        match error {
            InterpreterError::Authentication(msg) => Some(Self::Authentication(msg.clone())),
            InterpreterError::Upstream(msg) => Some(Self::Upstream(msg.clone())),
            InterpreterError::Malformed(_) | InterpreterError::Rejected { .. } => None,
        }
    }
}

/// Result type alias for run operations.
pub type RunResult<T> = Result<T, RunError>;

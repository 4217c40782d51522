//! Plan resolution port

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;
use tstai_domain::ExecutionPlan;

/// Errors returned by the interpretation service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InterpreterError {
    /// Missing or rejected credential.
    #[error("{0}")]
    Authentication(String),

    /// Service unreachable or failing with a 5xx.
    #[error("{0}")]
    Upstream(String),

    /// A successful answer with an unusable body.
    #[error("invalid response format from API: {0}")]
    Malformed(String),

    /// Any other non-success answer.
    #[error("{message}")]
    Rejected {
        /// HTTP status returned by the service.
        status: u16,
        /// Message extracted from the body, or a generic one.
        message: String,
    },
}

/// Port converting one instruction into an execution plan.
///
/// Implementations must not retry and must not keep state between calls:
/// the same service answer always yields the same plan.
pub trait PlanResolver: Send + Sync {
    /// Resolves an instruction.
    ///
    /// # Errors
    ///
    /// See [`InterpreterError`].
    fn resolve<'a>(
        &'a self,
        instruction: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionPlan, InterpreterError>> + Send + 'a>>;
}

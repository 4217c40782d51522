//! TSTAI Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interpretation service, HTTP client, reporting, persistence)
//! - The per-run instruction registry
//! - The test-execution engine and the credential use cases
//! - Application-level error handling

pub mod aggregator;
pub mod error;
pub mod evaluator;
pub mod executor;
pub mod ports;
pub mod registry;
pub mod use_cases;

pub use aggregator::RunAggregator;
pub use error::{RunError, RunResult};
pub use evaluator::{Verdict, evaluate};
pub use executor::{ExecuteError, RequestExecutor};
pub use ports::{
    AccountService, Clock, CredentialError, CredentialStore, Exchange, HttpClient,
    HttpClientError, InterpreterError, PlanResolver, RunLogError, RunLogSink, RunReporter,
};
pub use registry::InstructionRegistry;
pub use use_cases::{
    AuthService, LoginError, LogoutOutcome, RunOptions, RunOutcome, RunTests, StatusError,
};

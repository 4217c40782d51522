//! TSTAI Domain - Core test-run types
//!
//! This crate defines the domain model for the natural-language API test
//! runner: declarations, execution plans, observed responses and run results.
//! All types here are pure Rust with no I/O dependencies.

pub mod credential;
pub mod declaration;
pub mod error;
pub mod plan;
pub mod request;
pub mod response;
pub mod run_log;
pub mod testing;

pub use credential::{ApiKey, AuthStatus, CredentialSource, Principal};
pub use declaration::{DeclarationOptions, TestDeclaration};
pub use error::{DomainError, DomainResult};
pub use plan::{ExecutionPlan, Payload};
pub use request::{HttpMethod, OutboundRequest};
pub use response::{RawResponse, StatusCode};
pub use run_log::{LogSelection, RunLog};
pub use testing::{ExecutionResult, RequestRecord, RunSummary, TestOutcome};

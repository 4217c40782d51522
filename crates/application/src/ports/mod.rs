//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the test engine and external systems.
//! Each port is a trait implemented by adapters in the infrastructure or UI
//! layer.

mod account;
mod clock;
mod credential_store;
mod http_client;
mod plan_resolver;
mod reporter;
mod run_log_sink;

pub use account::AccountService;
pub use clock::Clock;
pub use credential_store::{CredentialError, CredentialStore};
pub use http_client::{Exchange, HttpClient, HttpClientError};
pub use plan_resolver::{InterpreterError, PlanResolver};
pub use reporter::RunReporter;
pub use run_log_sink::{RunLogError, RunLogSink};

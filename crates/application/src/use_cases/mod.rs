//! Application use cases (business logic orchestration).

mod auth;

pub use auth::{AuthService, LoginError, LogoutOutcome, StatusError};
pub use run_tests::{RunOptions, RunOutcome, RunTests};

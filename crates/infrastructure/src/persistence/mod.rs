//! File-backed persistence adapters.

mod credential_store;
mod run_log;

pub use credential_store::FileCredentialStore;
pub use run_log::FileRunLogWriter;

//! TSTAI Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus the test-file loader and
//! runtime configuration.

pub mod adapters;
pub mod config;
pub mod loader;
pub mod persistence;
pub mod serialization;

#[cfg(test)]
mod test_support;

pub use adapters::{InterpreterClient, ReqwestHttpClient, SystemClock};
pub use config::{
    API_KEY_ENV, API_URL_ENV, ConfigError, DEFAULT_API_URL, HTTP_TIMEOUT_ENV, ServiceConfig,
    environment_api_key,
};
pub use loader::{DEFAULT_TEST_FILE, LoadError, TestFileFormat, TestFileLoader};
pub use persistence::{FileCredentialStore, FileRunLogWriter};
pub use serialization::{SerializationError, to_json_stable, to_json_stable_bytes};

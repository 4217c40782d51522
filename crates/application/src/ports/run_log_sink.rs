//! Run log persistence port

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use thiserror::Error;
use tstai_domain::RunLog;

/// Errors while persisting a run log. Never fatal to a run.
#[derive(Debug, Error)]
pub enum RunLogError {
    /// IO error during file operations.
    #[error("IO error at {path}: {source}")]
    Io {
        /// Path involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The log document could not be encoded.
    #[error("could not encode run log: {0}")]
    Encode(String),
}

/// Port for writing the JSON audit log of a run.
pub trait RunLogSink: Send + Sync {
    /// Persists the log and returns where it was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be written.
    fn write<'a>(
        &'a self,
        log: &'a RunLog,
    ) -> Pin<Box<dyn Future<Output = Result<PathBuf, RunLogError>> + Send + 'a>>;
}

//! Stored credential port

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use thiserror::Error;
use tstai_domain::ApiKey;

/// Errors while reading or writing the stored credential.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// IO error during file operations.
    #[error("failed to access {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON.
    #[error("config file {path} is corrupt: {message}")]
    Corrupt {
        /// File involved.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Could not determine the home directory.
    #[error("could not determine home directory")]
    NoHomeDir,
}

/// Port for the locally stored API key.
pub trait CredentialStore: Send + Sync {
    /// Reads the stored key, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read.
    fn load(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Option<ApiKey>, CredentialError>> + Send + '_>>;

    /// Replaces the stored key.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn save<'a>(
        &'a self,
        key: &'a ApiKey,
    ) -> Pin<Box<dyn Future<Output = Result<(), CredentialError>> + Send + 'a>>;

    /// Removes the stored key, keeping any other settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn clear(&self) -> Pin<Box<dyn Future<Output = Result<(), CredentialError>> + Send + '_>>;
}

//! Everything a command needs from the environment.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tstai_domain::ApiKey;
use tstai_infrastructure::{FileCredentialStore, ServiceConfig, environment_api_key};

use crate::cli::Cli;

/// Resolved configuration for one CLI invocation.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Interpretation service and target-call settings.
    pub service: ServiceConfig,
    /// Value of `TSTAI_API_KEY`, if set.
    pub environment_key: Option<ApiKey>,
    /// Stored credential.
    pub store: Arc<FileCredentialStore>,
    /// Directory test paths and `tests/testlogs` are relative to.
    pub workspace: PathBuf,
}

impl AppContext {
    /// Builds the context from parsed arguments and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid service URL, a missing home directory
    /// or an unreadable working directory.
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let service = ServiceConfig::new(&cli.api_url, cli.timeout_ms)?;
        let store = FileCredentialStore::in_home()?;
        let workspace =
            std::env::current_dir().context("could not determine the current directory")?;
        Ok(Self {
            service,
            environment_key: environment_api_key(),
            store: Arc::new(store),
            workspace,
        })
    }
}

//! Stored API key.
//!
//! Lives in `~/.tstai/config.json` as `{"apiKey": "..."}`. Other keys in the
//! file belong to other tools or future versions and are kept on rewrite.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use serde_json::{Map, Value};
use tokio::fs;
use tstai_application::ports::{CredentialError, CredentialStore};
use tstai_domain::ApiKey;

use crate::serialization::to_json_stable_bytes;

const API_KEY_FIELD: &str = "apiKey";

/// JSON config file holding the API key.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store at an explicit path.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.tstai/config.json`.
    ///
    /// # Errors
    ///
    /// Returns `NoHomeDir` if the home directory cannot be determined.
    pub fn in_home() -> Result<Self, CredentialError> {
        Self::default_path()
            .map(Self::at)
            .ok_or(CredentialError::NoHomeDir)
    }

    /// Returns the default config path, if a home directory exists.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".tstai").join("config.json"))
    }

    /// Path of the config file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> CredentialError {
        CredentialError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Reads the whole config object; a missing file is an empty object.
    async fn read_config(&self) -> Result<Map<String, Value>, CredentialError> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }
        serde_json::from_slice(&content).map_err(|e| CredentialError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    async fn write_config(&self, config: &Map<String, Value>) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        let content = to_json_stable_bytes(config).map_err(|e| CredentialError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        fs::write(&self.path, content)
            .await
            .map_err(|e| self.io_error(e))
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Option<ApiKey>, CredentialError>> + Send + '_>> {
        Box::pin(async move {
            let config = self.read_config().await?;
            Ok(config
                .get(API_KEY_FIELD)
                .and_then(Value::as_str)
                .and_then(ApiKey::new))
        })
    }

    fn save<'a>(
        &'a self,
        key: &'a ApiKey,
    ) -> Pin<Box<dyn Future<Output = Result<(), CredentialError>> + Send + 'a>> {
        Box::pin(async move {
            let mut config = self.read_config().await?;
            config.insert(API_KEY_FIELD.to_string(), Value::String(key.expose().to_string()));
            self.write_config(&config).await?;
            tracing::debug!(path = %self.path.display(), "saved api key");
            Ok(())
        })
    }

    fn clear(&self) -> Pin<Box<dyn Future<Output = Result<(), CredentialError>> + Send + '_>> {
        Box::pin(async move {
            let mut config = self.read_config().await?;
            if config.remove(API_KEY_FIELD).is_some() {
                self.write_config(&config).await?;
            }
            Ok(())
        })
    }
}

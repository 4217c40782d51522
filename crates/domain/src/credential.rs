//! Credentials for the interpretation service.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bearer API key. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a raw key; blank input yields `None`.
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The raw key.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(4).collect();
        write!(f, "ApiKey({prefix}…)")
    }
}

/// Where the active credential came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialSource {
    /// The `TSTAI_API_KEY` environment variable.
    Environment,
    /// The stored CLI config file.
    Config,
    /// No credential.
    None,
}

impl CredentialSource {
    /// Label used by `tstai status`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Environment => "Environment Variable",
            Self::Config => "CLI Config",
            Self::None => "None",
        }
    }
}

/// Authentication state as seen by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    /// A credential is available.
    pub authenticated: bool,
    /// Which source wins.
    pub method: CredentialSource,
    /// The environment variable is set.
    pub has_environment_key: bool,
    /// The config file holds a key.
    pub has_config_key: bool,
}

impl AuthStatus {
    /// Picks the active key; the environment always takes priority.
    #[must_use]
    pub fn resolve(
        environment: Option<ApiKey>,
        stored: Option<ApiKey>,
    ) -> (Option<ApiKey>, Self) {
        let has_environment_key = environment.is_some();
        let has_config_key = stored.is_some();
        let (key, method) = match (environment, stored) {
            (Some(key), _) => (Some(key), CredentialSource::Environment),
            (None, Some(key)) => (Some(key), CredentialSource::Config),
            (None, None) => (None, CredentialSource::None),
        };
        let status = Self {
            authenticated: key.is_some(),
            method,
            has_environment_key,
            has_config_key,
        };
        (key, status)
    }
}

/// Identity the interpretation service associates with a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// User id; numeric or string depending on the backend.
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    /// Account email.
    #[serde(default)]
    pub email: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

impl Principal {
    /// Email or `Unknown`.
    #[must_use]
    pub fn email_or_unknown(&self) -> &str {
        self.email.as_deref().unwrap_or("Unknown")
    }

    /// Id rendered without JSON quoting, or `Unknown`.
    #[must_use]
    pub fn id_or_unknown(&self) -> String {
        match &self.id {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Null) | None => "Unknown".to_string(),
            Some(other) => other.to_string(),
        }
    }
}

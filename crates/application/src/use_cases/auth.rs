//! Credential use cases behind `login`, `logout` and `status`.

use std::sync::Arc;

use thiserror::Error;
use tstai_domain::{ApiKey, AuthStatus, CredentialSource, Principal};

use crate::ports::{AccountService, CredentialError, CredentialStore, InterpreterError};

/// Errors from `login`.
#[derive(Debug, Error)]
pub enum LoginError {
    /// `TSTAI_API_KEY` is set and would shadow the stored key.
    #[error("TSTAI_API_KEY environment variable is set")]
    EnvironmentOverride,

    /// The key could not be stored.
    #[error(transparent)]
    Store(#[from] CredentialError),

    /// The service rejected the key or could not be reached.
    #[error(transparent)]
    Service(#[from] InterpreterError),
}

/// Errors from `status`.
#[derive(Debug, Error)]
pub enum StatusError {
    /// No credential anywhere.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The stored credential could not be read.
    #[error(transparent)]
    Store(#[from] CredentialError),

    /// The identity lookup failed.
    #[error(transparent)]
    Service(#[from] InterpreterError),
}

/// What `logout` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// There was no credential to remove.
    NotAuthenticated,
    /// The active key comes from the environment and was left alone.
    EnvironmentManaged,
    /// The stored key was removed.
    Cleared,
}

/// Credential management against a store and the identity endpoint.
pub struct AuthService<S: CredentialStore, A: AccountService> {
    store: Arc<S>,
    account: Arc<A>,
    environment_key: Option<ApiKey>,
}

impl<S: CredentialStore, A: AccountService> AuthService<S, A> {
    /// Creates the service. `environment_key` is the value of
    /// `TSTAI_API_KEY`, already read by the caller.
    #[must_use]
    pub const fn new(store: Arc<S>, account: Arc<A>, environment_key: Option<ApiKey>) -> Self {
        Self {
            store,
            account,
            environment_key,
        }
    }

    /// Current authentication state and the key that would be used.
    ///
    /// An unreadable store is only a warning while `TSTAI_API_KEY` is set,
    /// since the environment key wins anyway.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored credential cannot be read and no
    /// environment key is available.
    pub async fn status(&self) -> Result<(Option<ApiKey>, AuthStatus), CredentialError> {
        let stored = match self.store.load().await {
            Ok(stored) => stored,
            Err(error) if self.environment_key.is_some() => {
                tracing::warn!(%error, "ignoring unreadable stored credential");
                None
            }
            Err(error) => return Err(error),
        };
        let (key, status) = AuthStatus::resolve(self.environment_key.clone(), stored);
        tracing::debug!(method = ?status.method, "credential resolved");
        Ok((key, status))
    }

    /// The key a run should use, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored credential cannot be read.
    pub async fn active_key(&self) -> Result<Option<ApiKey>, CredentialError> {
        Ok(self.status().await?.0)
    }

    /// Stores `key` and confirms it against the identity endpoint.
    ///
    /// The key stays stored even when the lookup fails, so a flaky
    /// network does not force the user to log in again.
    ///
    /// # Errors
    ///
    /// `EnvironmentOverride` when `TSTAI_API_KEY` is set; otherwise store
    /// or service failures.
    pub async fn login(&self, key: &ApiKey) -> Result<Principal, LoginError> {
        if self.environment_key.is_some() {
            return Err(LoginError::EnvironmentOverride);
        }
        self.store.save(key).await?;
        tracing::debug!("stored api key");
        Ok(self.account.whoami(key).await?)
    }

    /// Removes the stored key unless the environment provides one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub async fn logout(&self) -> Result<LogoutOutcome, CredentialError> {
        let (_, status) = self.status().await?;
        match status.method {
            CredentialSource::None => Ok(LogoutOutcome::NotAuthenticated),
            CredentialSource::Environment => Ok(LogoutOutcome::EnvironmentManaged),
            CredentialSource::Config => {
                self.store.clear().await?;
                Ok(LogoutOutcome::Cleared)
            }
        }
    }

    /// Looks up who the active key belongs to.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` without a key; otherwise store or service failures.
    pub async fn whoami(&self) -> Result<(AuthStatus, Principal), StatusError> {
        let (key, status) = self.status().await?;
        let key = key.ok_or(StatusError::NotAuthenticated)?;
        let principal = self.account.whoami(&key).await?;
        Ok((status, principal))
    }
}

//! Identity lookup port

use std::future::Future;
use std::pin::Pin;

use tstai_domain::{ApiKey, Principal};

use super::InterpreterError;

/// Port resolving an API key to the account owning it.
pub trait AccountService: Send + Sync {
    /// Looks up the principal for `key`.
    ///
    /// # Errors
    ///
    /// `Authentication` when the key is rejected, `Upstream` when the
    /// service cannot be reached.
    fn whoami<'a>(
        &'a self,
        key: &'a ApiKey,
    ) -> Pin<Box<dyn Future<Output = Result<Principal, InterpreterError>> + Send + 'a>>;
}

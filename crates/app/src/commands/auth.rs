//! `tstai login`, `tstai logout` and `tstai status`

use std::io::Write;
use std::sync::Arc;

use tstai_application::{AuthService, LoginError, StatusError};
use tstai_domain::ApiKey;
use tstai_infrastructure::{FileCredentialStore, InterpreterClient};
use tstai_ui::auth as messages;

use super::print_lines;
use crate::Exit;
use crate::cli::LoginArgs;
use crate::context::AppContext;

type Service = AuthService<FileCredentialStore, InterpreterClient>;

fn service(ctx: &AppContext) -> anyhow::Result<Service> {
    let account = InterpreterClient::new(ctx.service.clone(), None)?;
    Ok(AuthService::new(
        ctx.store.clone(),
        Arc::new(account),
        ctx.environment_key.clone(),
    ))
}

/// Stores the given key and shows who it belongs to.
///
/// # Errors
///
/// Returns an error only if the service client cannot be built; every
/// user-facing failure is printed and reported as `Exit::Failure`.
pub async fn login(
    args: &LoginArgs,
    ctx: &AppContext,
    out: &mut dyn Write,
) -> anyhow::Result<Exit> {
    let Some(key) = args.api_key.as_deref().and_then(ApiKey::new) else {
        print_lines(out, messages::login_usage());
        return Ok(Exit::Failure);
    };

    match service(ctx)?.login(&key).await {
        Ok(principal) => {
            print_lines(out, messages::login_saved());
            print_lines(out, [messages::logged_in_as(&principal)]);
            Ok(Exit::Success)
        }
        Err(LoginError::EnvironmentOverride) => {
            print_lines(out, messages::login_shadowed_by_environment());
            Ok(Exit::Failure)
        }
        Err(LoginError::Service(error)) => {
            print_lines(out, messages::login_saved());
            print_lines(out, [messages::login_failed(&error.to_string())]);
            Ok(Exit::Failure)
        }
        Err(error @ LoginError::Store(_)) => {
            print_lines(out, [messages::login_failed(&error.to_string())]);
            Ok(Exit::Failure)
        }
    }
}

/// Removes the stored key when there is one.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or rewritten.
pub async fn logout(ctx: &AppContext, out: &mut dyn Write) -> anyhow::Result<Exit> {
    let outcome = service(ctx)?.logout().await?;
    print_lines(out, messages::logout_lines(outcome));
    Ok(Exit::Success)
}

/// Shows which credential is active and who it belongs to.
///
/// # Errors
///
/// Returns an error only if the service client cannot be built.
pub async fn status(ctx: &AppContext, out: &mut dyn Write) -> anyhow::Result<Exit> {
    match service(ctx)?.whoami().await {
        Ok((status, principal)) => {
            print_lines(out, messages::status_lines(&status, &principal));
            Ok(Exit::Success)
        }
        Err(StatusError::NotAuthenticated) => {
            print_lines(out, messages::not_authenticated());
            Ok(Exit::Failure)
        }
        Err(error) => {
            print_lines(out, [messages::status_failed(&error.to_string())]);
            Ok(Exit::Failure)
        }
    }
}

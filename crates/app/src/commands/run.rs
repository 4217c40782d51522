//! `tstai run`

use std::sync::Arc;

use tstai_application::ports::RunReporter;
use tstai_application::{AuthService, InstructionRegistry, RunOptions, RunTests};
use tstai_infrastructure::{
    DEFAULT_TEST_FILE, FileRunLogWriter, InterpreterClient, ReqwestHttpClient, SystemClock,
    TestFileLoader,
};

use crate::Exit;
use crate::cli::RunArgs;
use crate::context::AppContext;

/// Loads the test file and runs every declaration in it.
///
/// Returns `Failure` when at least one test failed.
///
/// # Errors
///
/// Loader errors, credential problems and an unavailable interpretation
/// service abort the command.
pub async fn execute(
    args: &RunArgs,
    ctx: &AppContext,
    reporter: &mut dyn RunReporter,
) -> anyhow::Result<Exit> {
    let relative = args.file.clone().unwrap_or_else(|| DEFAULT_TEST_FILE.into());
    let path = ctx.workspace.join(relative);

    let mut registry = InstructionRegistry::new();
    TestFileLoader::new().load_into(&path, &mut registry).await?;

    let account = Arc::new(InterpreterClient::new(ctx.service.clone(), None)?);
    let key = AuthService::new(ctx.store.clone(), account, ctx.environment_key.clone())
        .active_key()
        .await?;

    let resolver = Arc::new(InterpreterClient::new(ctx.service.clone(), key)?);
    let client = Arc::new(ReqwestHttpClient::new(ctx.service.http_timeout())?);
    let engine = RunTests::new(
        resolver,
        client,
        Arc::new(SystemClock::new()),
        Arc::new(FileRunLogWriter::in_workspace(&ctx.workspace)),
    );

    let options = RunOptions::from_flags(args.logs, args.logs_failed);
    let source = path.display().to_string();
    let outcome = engine
        .execute(&mut registry, &source, options, reporter)
        .await?;

    Ok(if outcome.summary.all_passed() {
        Exit::Success
    } else {
        Exit::Failure
    })
}

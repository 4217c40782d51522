//! TSTAI CLI
//!
//! Wires the configuration, adapters and console presentation together
//! behind the `tstai` command.

pub mod cli;
pub mod commands;
pub mod context;

use std::io;
use std::process::ExitCode;

use cli::{Cli, Command};
use context::AppContext;
use tstai_ui::ConsoleReporter;

/// Process outcome of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Everything passed.
    Success,
    /// At least one test failed, or a credential command was refused.
    Failure,
    /// The command could not do its job at all.
    Fatal,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        match exit {
            Exit::Success => Self::SUCCESS,
            Exit::Failure => Self::from(1),
            Exit::Fatal => Self::from(2),
        }
    }
}

/// Runs the parsed command against the real environment.
///
/// # Errors
///
/// Returns an error for failures that abort the command; the caller
/// prints it and exits with [`Exit::Fatal`].
pub async fn dispatch(cli: &Cli) -> anyhow::Result<Exit> {
    let ctx = AppContext::from_cli(cli)?;
    let mut stdout = io::stdout();
    match &cli.command {
        Command::Run(args) => {
            let mut reporter = ConsoleReporter::stdout();
            commands::run::execute(args, &ctx, &mut reporter).await
        }
        Command::Login(args) => commands::auth::login(args, &ctx, &mut stdout).await,
        Command::Logout => commands::auth::logout(&ctx, &mut stdout).await,
        Command::Status => commands::auth::status(&ctx, &mut stdout).await,
    }
}

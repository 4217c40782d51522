//! TSTAI CLI - Main Entry Point

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tstai_cli::Exit;
use tstai_cli::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout carries the test report.
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match tstai_cli::dispatch(&cli).await {
        Ok(exit) => exit.into(),
        Err(error) => {
            eprintln!("{}", format!("❌ {error:#}").red());
            Exit::Fatal.into()
        }
    }
}

//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tstai_infrastructure::{API_URL_ENV, DEFAULT_API_URL, HTTP_TIMEOUT_ENV};

/// Run AI-powered API tests written in natural language
#[derive(Debug, Parser)]
#[command(name = "tstai")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Interpretation service URL
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Timeout for requests to the API under test, in milliseconds
    #[arg(long, env = HTTP_TIMEOUT_ENV, global = true)]
    pub timeout_ms: Option<u64>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run test file
    Run(RunArgs),

    /// Authenticate with TSTAI API
    Login(LoginArgs),

    /// Logout and clear stored credentials
    Logout,

    /// Check authentication status
    Status,
}

/// Arguments of `tstai run`.
#[derive(Debug, Default, Args)]
pub struct RunArgs {
    /// Test file (YAML or JSON), relative to the current directory
    pub file: Option<PathBuf>,

    /// Generate logs for all tests
    #[arg(long)]
    pub logs: bool,

    /// Generate logs for failed tests only
    #[arg(long)]
    pub logs_failed: bool,
}

/// Arguments of `tstai login`.
#[derive(Debug, Default, Args)]
pub struct LoginArgs {
    /// Set API key directly
    #[arg(long)]
    pub api_key: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_run_flags() {
        let cli = Cli::try_parse_from(["tstai", "run", "tests/api.yaml", "--logs-failed"]).unwrap();
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.file, Some(PathBuf::from("tests/api.yaml")));
                assert!(!args.logs);
                assert!(args.logs_failed);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn run_file_is_optional() {
        let cli = Cli::try_parse_from(["tstai", "run"]).unwrap();
        assert!(matches!(cli.command, Command::Run(RunArgs { file: None, .. })));
    }

    #[test]
    fn parses_login_key_and_global_flags() {
        let cli = Cli::try_parse_from([
            "tstai",
            "login",
            "--api-key",
            "abc",
            "--api-url",
            "http://localhost:3000",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.api_url, "http://localhost:3000");
        assert!(cli.verbose);
        match cli.command {
            Command::Login(args) => assert_eq!(args.api_key.as_deref(), Some("abc")),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

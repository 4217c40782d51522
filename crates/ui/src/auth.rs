//! Messages for `login`, `logout` and `status`.

use colored::Colorize;
use tstai_application::LogoutOutcome;
use tstai_domain::{AuthStatus, CredentialSource, Principal};

fn auth_methods() -> Vec<String> {
    vec![
        String::new(),
        "Authentication methods:".to_string(),
        "1. Environment variable: export TSTAI_API_KEY=your-key".to_string(),
        "2. CLI login: tstai login --api-key your-key".to_string(),
    ]
}

/// `tstai login` without `--api-key`.
#[must_use]
pub fn login_usage() -> Vec<String> {
    let mut lines = vec!["Please provide --api-key option.".to_string()];
    lines.extend(auth_methods());
    lines.push(String::new());
    lines.push("Example: tstai login --api-key your-api-key-here".to_string());
    lines
}

/// `tstai login` while `TSTAI_API_KEY` is set.
#[must_use]
pub fn login_shadowed_by_environment() -> Vec<String> {
    vec![
        "⚠️  Environment variable TSTAI_API_KEY is already set.".yellow().to_string(),
        "   Environment variables take priority over CLI config.".to_string(),
        "   To use CLI config, unset the environment variable first:".to_string(),
        "   unset TSTAI_API_KEY".to_string(),
        String::new(),
        "   Or use the environment variable directly:".to_string(),
        "   export TSTAI_API_KEY=your-key".to_string(),
    ]
}

/// Printed once the key is stored, before the identity lookup.
#[must_use]
pub fn login_saved() -> Vec<String> {
    vec![
        "✅ API key saved to config file!".green().to_string(),
        "💡 This method is ideal for local development.".to_string(),
    ]
}

/// Identity line after a successful login.
#[must_use]
pub fn logged_in_as(principal: &Principal) -> String {
    format!("👤 Logged in as: {}", principal.email_or_unknown())
}

/// `❌ Login failed: <reason>`
#[must_use]
pub fn login_failed(reason: &str) -> String {
    format!("❌ Login failed: {reason}").red().to_string()
}

/// What `tstai logout` reports.
#[must_use]
pub fn logout_lines(outcome: LogoutOutcome) -> Vec<String> {
    match outcome {
        LogoutOutcome::NotAuthenticated => {
            vec!["❌ Not authenticated. Nothing to logout.".to_string()]
        }
        LogoutOutcome::EnvironmentManaged => vec![
            "⚠️  Using environment variable (TSTAI_API_KEY)".yellow().to_string(),
            "   To logout, unset the environment variable:".to_string(),
            "   unset TSTAI_API_KEY".to_string(),
            String::new(),
            "   Or restart your terminal session.".to_string(),
        ],
        LogoutOutcome::Cleared => vec![
            "✅ Logged out successfully!".green().to_string(),
            "💡 Cleared stored config file.".to_string(),
        ],
    }
}

/// `tstai status` without any credential.
#[must_use]
pub fn not_authenticated() -> Vec<String> {
    let mut lines = vec!["❌ Not authenticated.".red().to_string()];
    lines.extend(auth_methods());
    lines
}

/// `tstai status` with a working credential.
#[must_use]
pub fn status_lines(status: &AuthStatus, principal: &Principal) -> Vec<String> {
    let mut lines = vec![
        "✅ Authenticated successfully!".green().to_string(),
        format!("🔑 Method: {}", status.method.label()),
        format!("👤 User: {}", principal.email_or_unknown()),
        format!("🆔 ID: {}", principal.id_or_unknown()),
        String::new(),
    ];
    if status.method == CredentialSource::Environment {
        lines.push("💡 Using environment variable (TSTAI_API_KEY)".to_string());
        lines.push("   This is ideal for CI/CD and automated environments.".to_string());
    } else {
        lines.push("💡 Using stored config file (~/.tstai/config.json)".to_string());
        lines.push("   This is ideal for local development.".to_string());
    }
    lines
}

/// `❌ Authentication check failed: <reason>`
#[must_use]
pub fn status_failed(reason: &str) -> String {
    format!("❌ Authentication check failed: {reason}").red().to_string()
}

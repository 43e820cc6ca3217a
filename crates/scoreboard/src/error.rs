//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use scoreboard_config::ConfigError;
use scoreboard_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to scoreboard server at {url}")]
    #[diagnostic(
        code(scoreboard::connection_failed),
        help(
            "Check that the server is running and the URL points at its API root.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(scoreboard::auth_failed),
        help(
            "Verify your username and password.\n\
             Run: scoreboard config set-password --profile <name>"
        )
    )]
    AuthFailed { message: String },

    #[error("No password configured for '{username}' in profile '{profile}'")]
    #[diagnostic(
        code(scoreboard::no_credentials),
        help(
            "Configure credentials with: scoreboard config init\n\
             Or set the SCOREBOARD_PASSWORD environment variable."
        )
    )]
    NoCredentials { profile: String, username: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Not found: {endpoint}")]
    #[diagnostic(code(scoreboard::not_found), help("{message}"))]
    NotFound { endpoint: String, message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(scoreboard::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(scoreboard::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(scoreboard::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: scoreboard config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No scoreboard server configured")]
    #[diagnostic(
        code(scoreboard::no_config),
        help(
            "Pass --server <URL>, or create a profile with: scoreboard config init\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(scoreboard::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(scoreboard::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out")]
    #[diagnostic(
        code(scoreboard::timeout),
        help("Increase the timeout with --timeout or check server responsiveness.")
    )]
    Timeout,

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile, username } => {
                CliError::NoCredentials { profile, username }
            }
            other => CliError::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::Timeout => CliError::Timeout,
            CoreError::NotFound { endpoint, message } => CliError::NotFound { endpoint, message },
            CoreError::Api { message, .. } | CoreError::Internal(message) => {
                CliError::ApiError { message }
            }
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

impl From<scoreboard_core::api::Error> for CliError {
    fn from(err: scoreboard_core::api::Error) -> Self {
        CoreError::from(err).into()
    }
}

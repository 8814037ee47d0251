//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use guestdesk_config::ConfigError;
use guestdesk_core::CoreError;

/// Exit codes for scripting.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the backend")]
    #[diagnostic(
        code(guestdesk::connection_failed),
        help(
            "Check that the backend is running and the server URL is right.\n\
             {message}"
        )
    )]
    ConnectionFailed { message: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed")]
    #[diagnostic(
        code(guestdesk::auth_failed),
        help("Verify the e-mail and password, then retry: guestdesk auth login")
    )]
    AuthFailed { message: String },

    #[error("Session expired")]
    #[diagnostic(
        code(guestdesk::session_expired),
        help("Sign in again with: guestdesk auth login")
    )]
    SessionExpired,

    #[error("No session token for profile '{profile}'")]
    #[diagnostic(
        code(guestdesk::no_token),
        help(
            "Sign in with: guestdesk auth login --profile {profile}\n\
             Or set GUESTDESK_TOKEN in the environment."
        )
    )]
    NoToken { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(guestdesk::not_found),
        help("Run: guestdesk {list_command} to see available entries")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("Backend rejected the request (HTTP {status}): {message}")]
    #[diagnostic(code(guestdesk::api_error))]
    ApiError { status: u16, message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid input")]
    #[diagnostic(code(guestdesk::validation), help("{details}"))]
    Validation { details: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(guestdesk::profile_not_found),
        help("Create one with: guestdesk config init")
    )]
    ProfileNotFound { name: String },

    #[error("No backend configured")]
    #[diagnostic(
        code(guestdesk::no_config),
        help(
            "Create a profile with: guestdesk config init\n\
             Or pass --server explicitly."
        )
    )]
    NoServer,

    #[error(transparent)]
    #[diagnostic(code(guestdesk::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(guestdesk::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    ConfirmationDeclined { action: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Unexpected response: {message}")]
    #[diagnostic(code(guestdesk::bad_response))]
    BadResponse { message: String },
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::SessionExpired | Self::NoToken { .. } => {
                exit_code::AUTH
            }
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ConfirmationDeclined { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { message } => Self::ConnectionFailed { message },
            CoreError::SessionExpired => Self::SessionExpired,
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::NotFound { entity, identifier } => Self::NotFound {
                list_command: format!("{entity}s list"),
                resource_type: entity.to_owned(),
                identifier,
            },
            CoreError::Rejected { status, message } => Self::ApiError { status, message },
            CoreError::BadResponse { message } => Self::BadResponse { message },
        }
    }
}

impl From<guestdesk_api::Error> for CliError {
    fn from(err: guestdesk_api::Error) -> Self {
        Self::from(CoreError::from(err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { profile } => Self::ProfileNotFound { name: profile },
            ConfigError::NoToken { profile } => Self::NoToken { profile },
            other => Self::Config(other),
        }
    }
}

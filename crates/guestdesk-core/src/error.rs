//! Core error type — user-facing diagnostics over `guestdesk-api` errors.

use thiserror::Error;

/// Errors surfaced by [`crate::AdminService`] and the stores.
///
/// The CLI maps these to miette diagnostics with exit codes; the TUI
/// renders them in the error panel / notification toast.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Could not reach the backend: {message}")]
    ConnectionFailed { message: String },

    #[error("Session expired -- sign in again with `guestdesk auth login`")]
    SessionExpired,

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("{entity} {identifier} not found")]
    NotFound {
        entity: &'static str,
        identifier: String,
    },

    #[error("Backend rejected the request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response from the backend: {message}")]
    BadResponse { message: String },
}

impl CoreError {
    /// Map an API error, attributing "not found" to a concrete entity.
    pub(crate) fn from_api(err: guestdesk_api::Error, entity: &'static str, id: i64) -> Self {
        if err.is_not_found() {
            return Self::NotFound {
                entity,
                identifier: id.to_string(),
            };
        }
        Self::from(err)
    }

    /// Whether a manual retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConnectionFailed { .. } | Self::Rejected { status: 500..=599, .. })
    }
}

impl From<guestdesk_api::Error> for CoreError {
    fn from(err: guestdesk_api::Error) -> Self {
        match err {
            guestdesk_api::Error::SessionExpired => Self::SessionExpired,
            guestdesk_api::Error::Authentication { message } => {
                Self::AuthenticationFailed { message }
            }
            guestdesk_api::Error::Transport(e) => Self::ConnectionFailed {
                message: e.to_string(),
            },
            guestdesk_api::Error::InvalidUrl(e) => Self::ConnectionFailed {
                message: e.to_string(),
            },
            guestdesk_api::Error::Tls(message) => Self::ConnectionFailed { message },
            guestdesk_api::Error::Api { status, message } => Self::Rejected { status, message },
            guestdesk_api::Error::Deserialization { message, .. } => {
                Self::BadResponse { message }
            }
        }
    }
}

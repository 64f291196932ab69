//! Unified error type for the Crease client.

use crease_protocol::ProtocolError;
use crease_session::SessionError;
use crease_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `Display` text is what the page shows: for HTTP failures it is the
/// server's own message, for validation it is the client's.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response was obtained (connection refused, DNS failure, bad URL).
    #[error("Cannot connect to server: {0}")]
    NetworkUnreachable(#[from] TransportError),

    /// The server answered with a non-2xx status other than 401/403.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The server rejected the credentials or the bearer token.
    #[error("{message}")]
    Auth { status: u16, message: String },

    /// Rejected client-side; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// A body could not be encoded, or a response had the wrong shape.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The session could not be read from or written to storage.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    /// Classifies a failed response: 401 and 403 are auth failures.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Auth { status, message },
            _ => Self::Http { status, message },
        }
    }

    /// Shorthand for a client-side validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Returns `true` if the server rejected the credentials or token.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// The HTTP status, for errors that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } | Self::Auth { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The text to put in front of the user.
    ///
    /// Response-shape problems collapse into one generic message; the
    /// details go to the log instead.
    pub fn user_message(&self) -> String {
        match self {
            Self::Protocol(e) => {
                tracing::debug!(error = %e, "unusable response body");
                "Invalid response from server".to_owned()
            }
            Self::Session(e) => format!("Could not save session: {e}"),
            other => other.to_string(),
        }
    }
}

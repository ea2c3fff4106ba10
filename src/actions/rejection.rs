use thiserror::Error;

use crate::transport::{ErrorKind, TransportError};

pub const REGISTER_FALLBACK_MESSAGE: &str = "Registration failed";
pub const LOGIN_FALLBACK_MESSAGE: &str = "Invalid email or password";
pub const UPDATE_FALLBACK_MESSAGE: &str = "Failed to update profile";
pub const SUPERSEDED_MESSAGE: &str = "Superseded by a newer session action";

/// Why an action was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionCause {
    /// Client-side check failed; no request was sent.
    Precondition,
    /// The transport call failed or returned an unusable payload.
    Transport(ErrorKind),
    /// A newer action or a logout invalidated this one before it finished.
    /// The outcome was not recorded in the store.
    Superseded,
}

/// Typed rejection value of a caller action.
///
/// `message` is exactly what the store records in `session.error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Rejection {
    message: String,
    cause: RejectionCause,
}

impl Rejection {
    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: RejectionCause::Precondition,
        }
    }

    pub(crate) fn superseded() -> Self {
        Self {
            message: SUPERSEDED_MESSAGE.to_string(),
            cause: RejectionCause::Superseded,
        }
    }

    pub(crate) fn invalid_payload(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: RejectionCause::Transport(ErrorKind::Server),
        }
    }

    /// Map a transport error to the message shown to the user.
    ///
    /// Network failures keep the transport's generic message; otherwise the
    /// server's own message wins, and `fallback` covers the rest.
    pub(crate) fn from_transport(err: &TransportError, fallback: &str) -> Self {
        let message = match err.kind() {
            ErrorKind::Network => err.message().to_string(),
            _ => err
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        };
        Self {
            message,
            cause: RejectionCause::Transport(err.kind()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> RejectionCause {
        self.cause
    }

    /// Transport error kind, when the rejection came from the wire.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self.cause {
            RejectionCause::Transport(kind) => Some(kind),
            _ => None,
        }
    }

    /// 401/403 from the backend. Hosts conventionally log out on this.
    pub fn is_auth(&self) -> bool {
        self.kind() == Some(ErrorKind::Auth)
    }
}

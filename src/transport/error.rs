//! Normalized transport error and its classification.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Message used when no response was received (connect failure, timeout).
pub const NETWORK_ERROR_MESSAGE: &str = "Network error occurred";
/// Message used when an error response carries no `message` field.
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed";
/// Message used when a success response cannot be decoded.
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from server";

const FALLBACK_STATUS: u16 = 500;

/// Error taxonomy for failed requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No response received, or the request exceeded its timeout.
    Network,
    /// 4xx response carrying field-level `errors` detail.
    Validation,
    /// 5xx response, or any failure not otherwise classified.
    Server,
    /// 401 or 403. Hosts conventionally log out on this kind.
    Auth,
}

impl ErrorKind {
    fn classify(status: u16, has_data: bool) -> Self {
        match status {
            401 | 403 => ErrorKind::Auth,
            400..=499 if has_data => ErrorKind::Validation,
            _ => ErrorKind::Server,
        }
    }
}

/// The single error shape surfaced by the transport client.
///
/// Serializes to `{ "message", "status", "data"? }`.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{message} (status {status})")]
pub struct TransportError {
    #[serde(skip)]
    kind: ErrorKind,
    message: String,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(skip)]
    from_server: bool,
}

impl TransportError {
    /// No response arrived: connect failure, broken body, or timeout.
    pub(crate) fn network() -> Self {
        Self {
            kind: ErrorKind::Network,
            message: NETWORK_ERROR_MESSAGE.to_string(),
            status: FALLBACK_STATUS,
            data: None,
            from_server: false,
        }
    }

    /// Build from a non-2xx response body.
    ///
    /// `message` is taken from the body when present, `data` from its
    /// `errors` field. Bodies that are not JSON objects are tolerated.
    pub(crate) fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed = serde_json::from_slice::<Value>(body).ok();
        let object = parsed.as_ref().and_then(Value::as_object);

        let server_message = object
            .and_then(|o| o.get("message"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);

        let data = object
            .and_then(|o| o.get("errors"))
            .filter(|v| !v.is_null())
            .cloned();

        Self {
            kind: ErrorKind::classify(status, data.is_some()),
            from_server: server_message.is_some(),
            message: server_message.unwrap_or_else(|| REQUEST_FAILED_MESSAGE.to_string()),
            status,
            data,
        }
    }

    /// A success status whose body did not match the expected shape.
    pub(crate) fn invalid_response(status: u16) -> Self {
        Self {
            kind: ErrorKind::Server,
            message: INVALID_RESPONSE_MESSAGE.to_string(),
            status,
            data: None,
            from_server: false,
        }
    }

    /// The request could not be built locally (body encoding, file parts).
    pub(crate) fn request_build(reason: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Server,
            message: reason.into(),
            status: FALLBACK_STATUS,
            data: None,
            from_server: false,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Field-level validation detail, when the server sent any.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// The message as written by the server, if it supplied one.
    pub fn server_message(&self) -> Option<&str> {
        self.from_server.then_some(self.message.as_str())
    }

    pub fn is_auth(&self) -> bool {
        self.kind == ErrorKind::Auth
    }
}

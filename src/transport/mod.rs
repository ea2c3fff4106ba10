//! Transport client: the only component that performs network I/O for the
//! session layer and the sibling endpoint groups.
//!
//! Every call goes through [`TransportClient::send`], which attaches the
//! bearer token current at call time, enforces the configured timeout, and
//! normalizes every failure into a single [`TransportError`].

mod client;
mod error;

pub use client::{ApiRequest, RequestBody, StaticToken, TokenSource, TransportClient};
pub use error::{
    ErrorKind, TransportError, INVALID_RESPONSE_MESSAGE, NETWORK_ERROR_MESSAGE,
    REQUEST_FAILED_MESSAGE,
};

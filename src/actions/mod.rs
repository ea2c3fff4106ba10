//! Caller actions: register, login and profile update.
//!
//! Each action follows one pattern: check client-side preconditions, call
//! the transport, and commit the outcome to the session store. Failures are
//! mapped to a single display message; structured detail stays in the
//! returned [`Rejection`].

mod controller;
mod rejection;
mod requests;

pub use controller::{verify_session, SessionController};
pub use rejection::{
    Rejection, RejectionCause, LOGIN_FALLBACK_MESSAGE, REGISTER_FALLBACK_MESSAGE,
    SUPERSEDED_MESSAGE, UPDATE_FALLBACK_MESSAGE,
};
pub use requests::{
    AuthPayload, Credentials, ProfileUpdate, RegisterRequest, SessionValidity, DEFAULT_GENDER,
    MIN_PASSWORD_LEN,
};

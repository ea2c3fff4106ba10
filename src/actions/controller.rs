//! The single owner of a session: store plus the transport bound to it.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::session::{
    SessionAction, SessionIntent, SessionStore, Ticket, UserId, UserProfile,
    MISSING_TOKEN_MESSAGE, NO_ACTIVE_SESSION_MESSAGE,
};
use crate::transport::{ApiRequest, TransportClient, TransportError};

use super::rejection::{
    Rejection, LOGIN_FALLBACK_MESSAGE, REGISTER_FALLBACK_MESSAGE, UPDATE_FALLBACK_MESSAGE,
};
use super::requests::{
    AuthPayload, Credentials, ProfileUpdate, RegisterRequest, SessionValidity, UpdatedUserPayload,
};

const REGISTER_ENDPOINT: &str = "/auth/register";
const LOGIN_ENDPOINT: &str = "/auth/login";
const VERIFY_ENDPOINT: &str = "/auth/verify";

fn user_endpoint(user_id: &UserId) -> String {
    format!("/users/{}", user_id)
}

/// Ask the backend whether the token `transport` sends is still valid.
///
/// An empty success body counts as valid. A 401/403 comes back as an `Auth`
/// error for the host to act on.
pub async fn verify_session(transport: &TransportClient) -> Result<SessionValidity, TransportError> {
    let validity = transport
        .send::<Option<SessionValidity>>(ApiRequest::get(VERIFY_ENDPOINT))
        .await?;
    Ok(validity.unwrap_or_default())
}

/// Runs caller actions against one session.
///
/// The transport reads its bearer token from the controller's own store, so
/// a successful login authorizes every later call made through
/// [`SessionController::transport`].
#[derive(Clone)]
pub struct SessionController {
    store: SessionStore,
    transport: TransportClient,
}

impl SessionController {
    /// Create a controller with a fresh `idle` session.
    pub fn new(config: &ApiConfig) -> reqwest::Result<Self> {
        let store = SessionStore::new();
        let transport = TransportClient::new(config, Arc::new(store.clone()))?;
        Ok(Self { store, transport })
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn transport(&self) -> &TransportClient {
        &self.transport
    }

    /// Create an account and sign in with it.
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthPayload, Rejection> {
        let ticket = self.store.begin(SessionAction::Register);

        if let Err(message) = request.validate() {
            return Err(self.reject(ticket, Rejection::precondition(message)));
        }

        let outcome = self
            .call::<AuthPayload>(ApiRequest::post(REGISTER_ENDPOINT).json(&request.body()))
            .await;

        match outcome {
            Ok(payload) => self.sign_in(ticket, SessionAction::Register, payload),
            Err(err) => Err(self.reject(ticket, Rejection::from_transport(&err, REGISTER_FALLBACK_MESSAGE))),
        }
    }

    /// Sign in with email and password.
    pub async fn login(&self, credentials: Credentials) -> Result<AuthPayload, Rejection> {
        let ticket = self.store.begin(SessionAction::Login);

        if let Err(message) = credentials.validate() {
            return Err(self.reject(ticket, Rejection::precondition(message)));
        }

        let outcome = self
            .call::<AuthPayload>(ApiRequest::post(LOGIN_ENDPOINT).json(&credentials.body()))
            .await;

        match outcome {
            Ok(payload) => self.sign_in(ticket, SessionAction::Login, payload),
            Err(err) => Err(self.reject(ticket, Rejection::from_transport(&err, LOGIN_FALLBACK_MESSAGE))),
        }
    }

    /// Apply a partial profile update to `user_id`.
    ///
    /// Requires a signed-in session; the token is what authorizes the call.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        updates: ProfileUpdate,
    ) -> Result<UserProfile, Rejection> {
        let ticket = self.store.begin(SessionAction::UpdateProfile);

        if matches!(&user_id, UserId::Text(id) if id.trim().is_empty()) {
            return Err(self.reject(ticket, Rejection::precondition("User id is required")));
        }
        if !self.store.is_logged_in() {
            return Err(self.reject(ticket, Rejection::precondition(NO_ACTIVE_SESSION_MESSAGE)));
        }
        if let Err(message) = updates.validate() {
            return Err(self.reject(ticket, Rejection::precondition(message)));
        }

        let outcome = self
            .call::<UpdatedUserPayload>(ApiRequest::patch(user_endpoint(&user_id)).json(&updates))
            .await;

        match outcome {
            Ok(payload) => {
                let user = payload.updated_user;
                self.settle(
                    ticket,
                    SessionIntent::UpdateFulfilled { user: user.clone() },
                )?;
                Ok(user)
            }
            Err(err) => Err(self.reject(ticket, Rejection::from_transport(&err, UPDATE_FALLBACK_MESSAGE))),
        }
    }

    /// Ask the backend whether the session token is still valid.
    ///
    /// Read-only: the store is not touched.
    pub async fn verify(&self) -> Result<SessionValidity, TransportError> {
        verify_session(&self.transport).await
    }

    /// Reset the session and invalidate any in-flight action.
    pub fn logout(&self) {
        self.store.logout();
    }

    pub fn clear_error(&self) {
        self.store.clear_error();
    }

    async fn call<T: DeserializeOwned>(
        &self,
        request: Result<ApiRequest, TransportError>,
    ) -> Result<T, TransportError> {
        self.transport.send(request?).await
    }

    fn sign_in(
        &self,
        ticket: Ticket,
        action: SessionAction,
        payload: AuthPayload,
    ) -> Result<AuthPayload, Rejection> {
        if payload.token.is_empty() {
            return Err(self.reject(ticket, Rejection::invalid_payload(MISSING_TOKEN_MESSAGE)));
        }

        let user = payload.user.clone();
        let token = payload.token.clone();
        let intent = match action {
            SessionAction::Register => SessionIntent::RegisterFulfilled { user, token },
            _ => SessionIntent::LoginFulfilled { user, token },
        };
        self.settle(ticket, intent)?;
        tracing::info!(action = action.name(), user_id = %payload.user.id, "Signed in");
        Ok(payload)
    }

    fn settle(&self, ticket: Ticket, intent: SessionIntent) -> Result<(), Rejection> {
        if self.store.commit(ticket, intent) {
            Ok(())
        } else {
            Err(Rejection::superseded())
        }
    }

    /// Record `rejection`, or report the action as superseded when its
    /// ticket is no longer current.
    fn reject(&self, ticket: Ticket, rejection: Rejection) -> Rejection {
        tracing::debug!(
            action = ticket.action().name(),
            message = rejection.message(),
            "Session action rejected"
        );
        let committed = self.store.commit(
            ticket,
            SessionIntent::Rejected {
                action: ticket.action(),
                message: rejection.message().to_string(),
            },
        );
        if committed {
            rejection
        } else {
            Rejection::superseded()
        }
    }
}

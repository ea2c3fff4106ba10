//! Shared session store handle.
//!
//! One store per logical session. Cloning the handle shares the same state.
//! All writes go through the reducer; readers get snapshots or subscribe to a
//! `watch` channel that sees every committed transition.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::config::SecretString;
use crate::mvi::Reducer;
use crate::transport::TokenSource;

use super::intent::{SessionAction, SessionIntent};
use super::reducer::SessionReducer;
use super::state::{SessionState, SessionStatus};
use super::user::UserProfile;

/// Proof that an action started and may commit its outcome.
///
/// A ticket is valid until another action begins or the session is logged
/// out; outcomes committed with an invalid ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    action: SessionAction,
    generation: u64,
}

impl Ticket {
    pub fn action(&self) -> SessionAction {
        self.action
    }
}

struct Core {
    state: SessionState,
    /// Bumped by every `begin` and by `logout`.
    generation: u64,
}

struct StoreInner {
    core: Mutex<Core>,
    publisher: watch::Sender<SessionState>,
}

/// Thread-safe session store with an in-flight guard.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

impl SessionStore {
    /// Create a store in the initial `idle` state.
    pub fn new() -> Self {
        let (publisher, _) = watch::channel(SessionState::default());
        Self {
            inner: Arc::new(StoreInner {
                core: Mutex::new(Core {
                    state: SessionState::default(),
                    generation: 0,
                }),
                publisher,
            }),
        }
    }

    /// Start an action: invalidate older tickets and dispatch `pending`.
    pub fn begin(&self, action: SessionAction) -> Ticket {
        let mut core = self.inner.core.lock();
        core.generation += 1;
        let ticket = Ticket {
            action,
            generation: core.generation,
        };
        self.apply(&mut core, SessionIntent::Pending { action });
        tracing::debug!(action = action.name(), generation = ticket.generation, "Session action started");
        ticket
    }

    /// Commit an action outcome.
    ///
    /// Returns `false` (and leaves the state untouched) when the ticket was
    /// superseded by a newer action or a logout, or when `intent` is not an
    /// outcome.
    pub fn commit(&self, ticket: Ticket, intent: SessionIntent) -> bool {
        if !matches!(
            intent,
            SessionIntent::RegisterFulfilled { .. }
                | SessionIntent::LoginFulfilled { .. }
                | SessionIntent::UpdateFulfilled { .. }
                | SessionIntent::Rejected { .. }
        ) {
            tracing::warn!(action = ticket.action.name(), "Ignoring non-outcome intent on commit");
            return false;
        }

        let mut core = self.inner.core.lock();
        if core.generation != ticket.generation {
            tracing::debug!(
                action = ticket.action.name(),
                ticket = ticket.generation,
                current = core.generation,
                "Discarding stale session outcome"
            );
            return false;
        }
        self.apply(&mut core, intent);
        true
    }

    /// Whether `ticket` may still commit.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.inner.core.lock().generation == ticket.generation
    }

    /// Reset to the initial state and invalidate every in-flight action.
    pub fn logout(&self) {
        let mut core = self.inner.core.lock();
        core.generation += 1;
        self.apply(&mut core, SessionIntent::Logout);
        tracing::info!("Session logged out");
    }

    /// Clear the recorded error. In-flight actions stay valid.
    pub fn clear_error(&self) {
        let mut core = self.inner.core.lock();
        self.apply(&mut core, SessionIntent::ClearError);
    }

    fn apply(&self, core: &mut Core, intent: SessionIntent) {
        let from = core.state.status;
        let state = std::mem::take(&mut core.state);
        core.state = SessionReducer::reduce(state, intent);
        tracing::debug!(from = ?from, to = ?core.state.status, "Session transition");
        self.inner.publisher.send_replace(core.state.clone());
    }

    /// Full copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.inner.core.lock().state.clone()
    }

    /// Receiver that observes every committed transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.publisher.subscribe()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.inner.core.lock().state.user.clone()
    }

    pub fn token(&self) -> Option<SecretString> {
        self.inner.core.lock().state.token.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.core.lock().state.is_logged_in
    }

    pub fn status(&self) -> SessionStatus {
        self.inner.core.lock().state.status
    }

    pub fn error(&self) -> Option<String> {
        self.inner.core.lock().state.error.clone()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSource for SessionStore {
    fn bearer_token(&self) -> Option<SecretString> {
        self.token()
    }
}

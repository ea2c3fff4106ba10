//! Reducer for the session state machine.
//!
//! ```text
//! idle ──pending──→ loading ──fulfilled──→ succeeded
//!                      │                       │
//!                      └──rejected──→ failed   │
//!                                       │      │
//!         loading ←──────pending────────┴──────┘
//!
//! any ──logout──→ idle (initial)
//! ```

use crate::mvi::Reducer;

use super::intent::SessionIntent;
use super::state::{SessionState, SessionStatus};

/// Error recorded when a profile update lands while nobody is signed in.
pub const NO_ACTIVE_SESSION_MESSAGE: &str = "No active session";

/// Error recorded when a sign-in payload carries no usable token.
pub const MISSING_TOKEN_MESSAGE: &str = "Server response missing token";

/// Pure transition function for [`SessionState`].
pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Intent = SessionIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SessionIntent::Pending { .. } => SessionState {
                status: SessionStatus::Loading,
                error: None,
                ..state
            },

            SessionIntent::RegisterFulfilled { user, token }
            | SessionIntent::LoginFulfilled { user, token } => {
                if token.is_empty() {
                    // An empty token cannot back a signed-in session
                    return SessionState {
                        status: SessionStatus::Failed,
                        error: Some(MISSING_TOKEN_MESSAGE.to_string()),
                        ..state
                    };
                }
                SessionState {
                    user: Some(user),
                    token: Some(token),
                    is_logged_in: true,
                    status: SessionStatus::Succeeded,
                    error: None,
                }
            }

            SessionIntent::UpdateFulfilled { user } => {
                if !state.has_token() || state.user.is_none() {
                    return SessionState {
                        status: SessionStatus::Failed,
                        error: Some(NO_ACTIVE_SESSION_MESSAGE.to_string()),
                        ..state
                    };
                }
                SessionState {
                    user: Some(user),
                    status: SessionStatus::Succeeded,
                    error: None,
                    ..state
                }
            }

            SessionIntent::Rejected { message, .. } => SessionState {
                status: SessionStatus::Failed,
                error: Some(message),
                ..state
            },

            SessionIntent::Logout => SessionState::default(),

            SessionIntent::ClearError => SessionState {
                error: None,
                ..state
            },
        }
    }
}

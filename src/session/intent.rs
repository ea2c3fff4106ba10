use crate::config::SecretString;
use crate::mvi::Intent;
use crate::session::user::UserProfile;

/// Session-mutating caller actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Register,
    Login,
    UpdateProfile,
}

impl SessionAction {
    pub fn name(&self) -> &'static str {
        match self {
            SessionAction::Register => "register",
            SessionAction::Login => "login",
            SessionAction::UpdateProfile => "update",
        }
    }
}

/// Intents dispatched to the session reducer.
#[derive(Debug, Clone)]
pub enum SessionIntent {
    /// An action has started.
    Pending { action: SessionAction },

    /// Registration succeeded; the new account is signed in.
    RegisterFulfilled { user: UserProfile, token: SecretString },

    /// Login succeeded.
    LoginFulfilled { user: UserProfile, token: SecretString },

    /// Profile update succeeded. Token and login flag are untouched.
    UpdateFulfilled { user: UserProfile },

    /// An action failed; `message` is what the host should show.
    Rejected { action: SessionAction, message: String },

    /// Unconditional reset to the initial state.
    Logout,

    /// Clear `error` only.
    ClearError,
}

impl Intent for SessionIntent {}

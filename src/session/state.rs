use serde::Serialize;

use crate::config::SecretString;
use crate::mvi::StoreState;
use crate::session::user::UserProfile;

/// Request status of the most recent session-mutating action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Authentication state of the current client.
///
/// `Succeeded` implies `user` and a non-empty `token` are present. `Failed`
/// implies `error` is set; user and token are whatever they were before the
/// failing call. The default value is the initial state and the logout target.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SessionState {
    pub user: Option<UserProfile>,
    pub token: Option<SecretString>,
    pub is_logged_in: bool,
    pub status: SessionStatus,
    pub error: Option<String>,
}

impl StoreState for SessionState {}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        self.status == SessionStatus::Loading
    }

    pub fn has_token(&self) -> bool {
        self.token.as_ref().is_some_and(|t| !t.is_empty())
    }
}

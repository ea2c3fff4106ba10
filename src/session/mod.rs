//! Session store: the client-held record of authentication state.
//!
//! State transitions are pure ([`SessionReducer`]); the [`SessionStore`]
//! handle serializes them, publishes snapshots to subscribers, and guards
//! against stale outcomes from superseded actions.

mod intent;
mod reducer;
mod state;
mod store;
mod user;

pub use intent::{SessionAction, SessionIntent};
pub use reducer::{SessionReducer, MISSING_TOKEN_MESSAGE, NO_ACTIVE_SESSION_MESSAGE};
pub use state::{SessionState, SessionStatus};
pub use store::{SessionStore, Ticket};
pub use user::{RecordId, UserId, UserProfile};

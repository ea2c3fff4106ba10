//! Reducer trait: the single place a store's state changes.

use super::intent::Intent;
use super::state::StoreState;

/// Pure transition function from one store state to the next.
///
/// A store holds the current state and feeds it, together with each
/// dispatched intent, through `reduce`. Network calls, ticket checks and
/// subscriber notification stay in the store and the actions that drive it,
/// so the same intent applied to the same state always gives the same result.
pub trait Reducer {
    type State: StoreState;
    type Intent: Intent;

    /// Apply `intent` to `state`. An intent that does not apply in `state`
    /// still returns a valid state (for the session: `failed` with an error).
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}

//! Model-View-Intent (MVI) primitives.
//!
//! The session layer uses these traits for unidirectional data flow: every
//! outcome of a caller action becomes an intent, and a reducer is the only
//! place that turns the old state into the new one.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Intent ──→ Reducer ──→ State ──→ Host (render, alert, navigate)
//!    ↑                                          │
//!    └──────────────────────────────────────────┘
//! ```
//!
//! - **State**: Immutable snapshot owned by a store
//! - **Intent**: Pending/fulfilled/rejected outcomes and explicit commands
//! - **Reducer**: Pure function that transforms state based on intents

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::StoreState;

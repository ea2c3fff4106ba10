//! Endpoint groups beyond authentication.
//!
//! They share the session's [`TransportClient`](crate::transport::TransportClient),
//! so the bearer token and the error contract are the same as for the
//! caller actions. None of them touch the session store.

pub mod community;
pub mod drugs;
pub mod evaluation;
pub mod learning;
pub mod users;

mod types;

pub use types::{
    Drug, DrugCategory, DrugSound, EvaluationResult, LeaderboardEntry, LearningEntry,
};

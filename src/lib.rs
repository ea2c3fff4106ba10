//! Client SDK for the DrugSpeak pronunciation-learning backend.
//!
//! The [`actions::SessionController`] owns one session: it runs register,
//! login and profile updates through the [`transport::TransportClient`] and
//! records every outcome in the [`session::SessionStore`]. Hosts read the
//! store (or subscribe to it) to decide what to show.

pub mod actions;
pub mod api;
pub mod config;
pub mod logging;
pub mod mvi;
pub mod session;
pub mod transport;

//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - Lifecycle outcomes of asynchronous actions (pending, fulfilled, rejected)
/// - Explicit commands from the host (logout, clear error)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}

//! Base trait for store state in MVI architecture.

/// Marker trait for state held by a store.
///
/// States should be:
/// - Immutable (Clone to publish snapshots to subscribers)
/// - Self-contained (everything a host needs to decide what to show)
/// - Comparable (PartialEq for detecting changes)
/// - Defaultable (Default is the initial state, and the reset target)
pub trait StoreState: Clone + PartialEq + Default + Send + Sync + 'static {}

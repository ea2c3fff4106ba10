//! Client configuration: API endpoint, timeouts and logging filter.
//!
//! Loaded from `<config_dir>/drugspeak/config.toml`; a missing file yields
//! defaults, and every field falls back to its default when omitted.

mod loader;
mod secret;
mod types;

pub use loader::ConfigError;
pub use secret::SecretString;
pub use types::{ApiConfig, Config, LoggingConfig};

//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;

use drugspeak::actions::SessionController;
use drugspeak::config::{ApiConfig, SecretString};
use drugspeak::transport::{StaticToken, TransportClient};
use tempfile::TempDir;

use mock_backend::MockBackend;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// API settings pointing at the mock backend's `/api` prefix.
pub fn api_config(mock: &MockBackend) -> ApiConfig {
    ApiConfig {
        base_url: format!("{}/api", mock.base_url()),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
    }
}

/// API settings pointing at a port nothing listens on.
pub fn unreachable_config() -> ApiConfig {
    ApiConfig {
        base_url: format!("http://127.0.0.1:{}/api", free_port()),
        timeout_seconds: 2,
        connect_timeout_seconds: 1,
    }
}

pub fn controller(mock: &MockBackend) -> SessionController {
    SessionController::new(&api_config(mock)).expect("Failed to build controller")
}

/// Transport that sends `token` (if any) without a session store.
pub fn transport_with_token(config: &ApiConfig, token: Option<&str>) -> TransportClient {
    let token = token.map(SecretString::new);
    TransportClient::new(config, Arc::new(StaticToken::new(token))).expect("Failed to build transport")
}

/// Write `content` to a `config.toml` in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

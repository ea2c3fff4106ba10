mod common;

use common::temp_config;
use drugspeak::config::{Config, ConfigError};
use std::path::Path;
use std::time::Duration;

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.api.base_url, "http://localhost:3000/api");
    assert_eq!(config.api.timeout_seconds, 10);
    assert_eq!(config.api.connect_timeout_seconds, 5);
    assert_eq!(config.api.timeout(), Duration::from_secs(10));
    assert_eq!(config.logging.filter, "info");
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("drugspeak/config.toml"));
}

#[test]
fn test_missing_file_uses_defaults() {
    let config = Config::load_from(Path::new("/nonexistent/drugspeak/config.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_from_file() {
    let (_dir, path) = temp_config(
        r#"[api]
base_url = "https://drugspeak.example.com/api"
timeout_seconds = 20
connect_timeout_seconds = 3

[logging]
filter = "drugspeak=debug"
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.api.base_url, "https://drugspeak.example.com/api");
    assert_eq!(config.api.timeout_seconds, 20);
    assert_eq!(config.api.connect_timeout(), Duration::from_secs(3));
    assert_eq!(config.logging.filter, "drugspeak=debug");
}

#[test]
fn test_parse_error_names_the_file() {
    let (_dir, path) = temp_config("[api\nbase_url = ");

    match Config::load_from(&path).unwrap_err() {
        err @ ConfigError::ParseError { .. } => {
            assert!(err.to_string().contains("config.toml"));
        }
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_invalid_values_fail_validation() {
    let (_dir, path) = temp_config("[api]\nbase_url = \"localhost:3000\"\n");

    match Config::load_from(&path).unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("http://"));
        }
        other => panic!("Expected ValidationError, got {:?}", other),
    }
}

#[test]
fn test_zero_timeout_fails_validation() {
    let (_dir, path) = temp_config("[api]\ntimeout_seconds = 0\n");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ValidationError { .. })
    ));
}

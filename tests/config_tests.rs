//! Configuration module unit tests

use callproxy::config::settings::{Settings, UpstreamConfig};
use std::collections::HashMap;
use std::time::Duration;

/// Build settings from the given variables only
fn settings_from(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_settings_creation_with_valid_env() {
    let settings = settings_from(&[
        ("SERVER_HOST", "127.0.0.1"),
        ("SERVER_PORT", "9090"),
        ("UPSTREAM_BASE_URL", "http://localhost:7000"),
        ("UPSTREAM_REGIONAL_BASE_URL", "http://localhost:7001/"),
        ("UPSTREAM_TIMEOUT", "45"),
        ("UPSTREAM_CONNECT_TIMEOUT", "3"),
        ("MAX_REQUEST_SIZE", "2048"),
        ("API_KEY_HEADER", "x-api-key"),
        ("CORS_ENABLED", "false"),
        ("RUST_LOG", "debug"),
        ("LOG_FORMAT", "json"),
    ])
    .unwrap();

    assert_eq!(settings.bind_address(), "127.0.0.1:9090");
    assert_eq!(settings.upstream.base_url, "http://localhost:7000");
    assert_eq!(settings.upstream.regional_base_url, "http://localhost:7001");
    assert_eq!(settings.upstream.timeout(), Duration::from_secs(45));
    assert_eq!(settings.upstream.connect_timeout(), Duration::from_secs(3));
    assert_eq!(settings.request.max_request_size, 2048);
    assert_eq!(settings.security.api_key_header, "x-api-key");
    assert!(!settings.security.cors_enabled);
    assert_eq!(settings.logging.level, "debug");
    assert_eq!(settings.logging.format, "json");
}

#[test]
fn test_default_values() {
    let settings = settings_from(&[]).unwrap();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.upstream.connect_timeout, 10);
    assert_eq!(settings.request.max_request_size, 1_048_576);
    assert!(settings.security.cors_enabled);
    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.logging.format, "text");
}

#[test]
fn test_invalid_port() {
    assert!(settings_from(&[("SERVER_PORT", "not-a-port")]).is_err());
    assert!(settings_from(&[("SERVER_PORT", "0")]).is_err());
}

#[test]
fn test_invalid_upstream_url() {
    let err = settings_from(&[("UPSTREAM_BASE_URL", "ftp://example.com")]).unwrap_err();
    assert!(err.to_string().contains("UPSTREAM_BASE_URL"));
}

#[test]
fn test_zero_timeout_rejected() {
    assert!(settings_from(&[("UPSTREAM_TIMEOUT", "0")]).is_err());
    assert!(settings_from(&[("UPSTREAM_CONNECT_TIMEOUT", "0")]).is_err());
}

#[test]
fn test_invalid_logging_config() {
    assert!(settings_from(&[("RUST_LOG", "callproxy=loud")]).is_err());
    assert!(settings_from(&[("LOG_FORMAT", "xml")]).is_err());
}

#[test]
fn test_log_filter_directives() {
    let settings = settings_from(&[("RUST_LOG", "callproxy=debug,tower_http=info")]).unwrap();
    assert_eq!(settings.logging.level, "callproxy=debug,tower_http=info");
}

#[test]
fn test_invalid_cors_flag() {
    assert!(settings_from(&[("CORS_ENABLED", "maybe")]).is_err());
}

#[test]
fn test_upstream_config_durations() {
    let config = UpstreamConfig {
        base_url: "https://api.example.com".to_string(),
        regional_base_url: "https://us.api.example.com".to_string(),
        timeout: 12,
        connect_timeout: 2,
    };

    assert_eq!(config.timeout(), Duration::from_secs(12));
    assert_eq!(config.connect_timeout(), Duration::from_secs(2));
}

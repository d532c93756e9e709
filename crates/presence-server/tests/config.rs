// crates/presence-server/tests/config.rs
use std::collections::HashMap;
use std::time::Duration;

use axum::http::HeaderValue;
use presence_server::config::{Config, CorsOrigin};

fn config_from(pairs: &[(&str, &str)]) -> Result<Config, presence_server::config::ConfigError> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_without_environment() {
    let config = config_from(&[]).unwrap();

    assert_eq!(config.bind_addr, "0.0.0.0");
    assert_eq!(config.port, 8686);
    assert_eq!(config.max_clients, 1024);
    assert_eq!(config.cors_origin, CorsOrigin::Any);
    assert!(!config.debug);
    assert_eq!(config.socket_addr_string(), "0.0.0.0:8686");
    assert_eq!(config.ping_interval, Duration::from_secs(25));
    assert_eq!(config.ping_timeout, Duration::from_secs(20));
    assert_eq!(config.idle_limit(), Duration::from_secs(45));
    assert_eq!(config.outbound_buffer, 32);
}

#[test]
fn overrides_are_applied() {
    let config = config_from(&[
        ("PRESENCE_BIND_ADDR", "127.0.0.1"),
        ("PRESENCE_PORT", "9100"),
        ("PRESENCE_MAX_CLIENTS", "8"),
        ("PRESENCE_CORS_ORIGIN", "https://canvas.example.com"),
        ("PRESENCE_DEBUG", "true"),
    ])
    .unwrap();

    assert_eq!(config.socket_addr_string(), "127.0.0.1:9100");
    assert_eq!(config.max_clients, 8);
    assert_eq!(
        config.cors_origin,
        CorsOrigin::Exact(HeaderValue::from_static("https://canvas.example.com"))
    );
    assert!(config.debug);
}

#[test]
fn invalid_values_name_the_variable() {
    let err = config_from(&[("PRESENCE_PORT", "eighty")]).unwrap_err();
    assert_eq!(err.key, "PRESENCE_PORT");
    assert_eq!(err.value, "eighty");

    let err = config_from(&[("PRESENCE_DEBUG", "maybe")]).unwrap_err();
    assert_eq!(err.key, "PRESENCE_DEBUG");

    let err = config_from(&[("PRESENCE_CORS_ORIGIN", "bad\norigin")]).unwrap_err();
    assert_eq!(err.key, "PRESENCE_CORS_ORIGIN");
}

#[test]
fn heartbeat_and_buffer_overrides() {
    let config = config_from(&[
        ("PRESENCE_PING_INTERVAL_MS", "1500"),
        ("PRESENCE_PING_TIMEOUT_MS", "500"),
        ("PRESENCE_OUTBOUND_BUFFER", "8"),
    ])
    .unwrap();

    assert_eq!(config.ping_interval, Duration::from_millis(1500));
    assert_eq!(config.ping_timeout, Duration::from_millis(500));
    assert_eq!(config.idle_limit(), Duration::from_secs(2));
    assert_eq!(config.outbound_buffer, 8);
}

#[test]
fn zero_heartbeat_or_buffer_is_rejected() {
    for key in [
        "PRESENCE_PING_INTERVAL_MS",
        "PRESENCE_PING_TIMEOUT_MS",
        "PRESENCE_OUTBOUND_BUFFER",
    ] {
        let err = config_from(&[(key, "0")]).unwrap_err();
        assert_eq!(err.key, key);
        assert_eq!(err.reason, "must be greater than zero");
    }
}

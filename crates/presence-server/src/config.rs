//! Configuration for the presence server.
//!
//! Defaults can be overridden via environment variables:
//!
//! - `PRESENCE_BIND_ADDR`   (default: "0.0.0.0")
//! - `PRESENCE_PORT`        (default: "8686")
//! - `PRESENCE_MAX_CLIENTS` (default: "1024")
//! - `PRESENCE_CORS_ORIGIN` (default: "*", any origin)
//! - `PRESENCE_DEBUG`       (default: "false", troubleshooting logs)
//! - `PRESENCE_PING_INTERVAL_MS` (default: "25000")
//! - `PRESENCE_PING_TIMEOUT_MS`  (default: "20000")
//! - `PRESENCE_OUTBOUND_BUFFER`  (default: "32" frames per connection)

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use thiserror::Error;

/// A configuration value that could not be parsed.
#[derive(Debug, Error)]
#[error("invalid value {value:?} for {key}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

/// Which browser origins may open a connection.
#[derive(Debug, Clone, PartialEq)]
pub enum CorsOrigin {
    Any,
    Exact(HeaderValue),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// IP address / interface to bind to (e.g. "0.0.0.0" or "127.0.0.1").
    pub bind_addr: String,

    /// TCP port to listen on.
    pub port: u16,

    /// Maximum number of simultaneously connected clients.
    pub max_clients: usize,

    pub cors_origin: CorsOrigin,

    /// Raise the default log level to debug.
    pub debug: bool,

    /// How often the server pings each connection.
    pub ping_interval: Duration,

    /// Extra silence tolerated after a ping before the peer counts as gone.
    pub ping_timeout: Duration,

    /// Frames queued per connection; newer frames are dropped when full.
    pub outbound_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "0.0.0.0".to_string(),
            port: 8686,
            max_clients: 1024,
            cors_origin: CorsOrigin::Any,
            debug: false,
            ping_interval: Duration::from_millis(25_000),
            ping_timeout: Duration::from_millis(20_000),
            outbound_buffer: 32,
        }
    }
}

impl Config {
    /// Construct a `Config` from environment variables, falling back
    /// to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`Config::from_env`] but reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let bind_addr = lookup("PRESENCE_BIND_ADDR").unwrap_or(defaults.bind_addr);
        let port = parse_or_default(&lookup, "PRESENCE_PORT", defaults.port)?;
        let max_clients = parse_or_default(&lookup, "PRESENCE_MAX_CLIENTS", defaults.max_clients)?;

        let cors_origin = match lookup("PRESENCE_CORS_ORIGIN") {
            None => defaults.cors_origin,
            Some(v) => parse_cors_origin(&v)?,
        };

        let debug = match lookup("PRESENCE_DEBUG") {
            None => defaults.debug,
            Some(v) => parse_flag("PRESENCE_DEBUG", &v)?,
        };

        let ping_interval = parse_millis(&lookup, "PRESENCE_PING_INTERVAL_MS", defaults.ping_interval)?;
        let ping_timeout = parse_millis(&lookup, "PRESENCE_PING_TIMEOUT_MS", defaults.ping_timeout)?;

        let outbound_buffer =
            parse_or_default(&lookup, "PRESENCE_OUTBOUND_BUFFER", defaults.outbound_buffer)?;
        if outbound_buffer == 0 {
            return Err(ConfigError {
                key: "PRESENCE_OUTBOUND_BUFFER",
                value: "0".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Config {
            bind_addr,
            port,
            max_clients,
            cors_origin,
            debug,
            ping_interval,
            ping_timeout,
            outbound_buffer,
        })
    }

    /// Longest a connection may stay silent before it is dropped.
    pub fn idle_limit(&self) -> Duration {
        self.ping_interval + self.ping_timeout
    }

    /// Convenience: `addr:port` socket string.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(val) => match val.trim().parse::<T>() {
            Ok(parsed) => Ok(parsed),
            Err(e) => Err(ConfigError {
                key,
                reason: e.to_string(),
                value: val,
            }),
        },
        None => Ok(default),
    }
}

fn parse_millis<F>(lookup: &F, key: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let default_ms = default.as_millis() as u64;
    match parse_or_default(lookup, key, default_ms)? {
        0 => Err(ConfigError {
            key,
            value: "0".to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        ms => Ok(Duration::from_millis(ms)),
    }
}

fn parse_cors_origin(value: &str) -> Result<CorsOrigin, ConfigError> {
    let value = value.trim();
    if value == "*" {
        return Ok(CorsOrigin::Any);
    }

    HeaderValue::from_str(value)
        .map(CorsOrigin::Exact)
        .map_err(|e| ConfigError {
            key: "PRESENCE_CORS_ORIGIN",
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError {
            key,
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}

//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Upstream API configuration
    pub upstream: UpstreamConfig,
    /// Request configuration
    pub request: RequestConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Upstream API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Primary API host (calls, pathway CRUD, chat messages)
    pub base_url: String,
    /// Regional API host (folders, pathway moves, chat creation)
    pub regional_base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Connect timeout in seconds
    pub connect_timeout: u64,
}

/// Request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Maximum request size in bytes
    pub max_request_size: usize,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Header carrying the caller's bearer token
    pub api_key_header: String,
    /// Whether CORS is enabled
    pub cors_enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter directives, e.g. `info` or `callproxy=debug,tower_http=info`
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new configuration instance from the process environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let settings = Self {
            server: ServerConfig {
                host: get("SERVER_HOST", "0.0.0.0"),
                port: get("SERVER_PORT", "8080")
                    .parse()
                    .context("Invalid port number")?,
            },
            upstream: UpstreamConfig {
                base_url: trim_base_url(get("UPSTREAM_BASE_URL", "https://api.bland.ai")),
                regional_base_url: trim_base_url(get(
                    "UPSTREAM_REGIONAL_BASE_URL",
                    "https://us.api.bland.ai",
                )),
                timeout: get("UPSTREAM_TIMEOUT", "30")
                    .parse()
                    .context("Invalid upstream timeout")?,
                connect_timeout: get("UPSTREAM_CONNECT_TIMEOUT", "10")
                    .parse()
                    .context("Invalid upstream connect timeout")?,
            },
            request: RequestConfig {
                max_request_size: get("MAX_REQUEST_SIZE", "1048576")
                    .parse()
                    .context("Invalid maximum request size")?,
            },
            security: SecurityConfig {
                api_key_header: get("API_KEY_HEADER", "Authorization"),
                cors_enabled: get("CORS_ENABLED", "true")
                    .parse()
                    .context("Invalid CORS enabled flag")?,
            },
            logging: LoggingConfig {
                level: get("RUST_LOG", "info"),
                format: get("LOG_FORMAT", "text"),
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        for (name, url) in [
            ("UPSTREAM_BASE_URL", &self.upstream.base_url),
            ("UPSTREAM_REGIONAL_BASE_URL", &self.upstream.regional_base_url),
        ] {
            if !url.starts_with("http") {
                anyhow::bail!("Invalid {} format, should start with 'http': {}", name, url);
            }
        }

        if self.upstream.timeout == 0 || self.upstream.connect_timeout == 0 {
            anyhow::bail!("Timeout values cannot be 0");
        }

        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        if self.security.api_key_header.trim().is_empty() {
            anyhow::bail!("API key header name cannot be empty");
        }

        EnvFilter::try_new(&self.logging.level)
            .with_context(|| format!("Invalid log filter: {}", self.logging.level))?;

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Listen address in `host:port` form
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }
}

fn trim_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();

        assert_eq!(settings.bind_address(), "0.0.0.0:8080");
        assert_eq!(settings.upstream.base_url, "https://api.bland.ai");
        assert_eq!(settings.upstream.regional_base_url, "https://us.api.bland.ai");
        assert_eq!(settings.upstream.timeout(), Duration::from_secs(30));
        assert_eq!(settings.security.api_key_header, "Authorization");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let settings = Settings::from_lookup(lookup(&[
            ("UPSTREAM_BASE_URL", "http://localhost:9000/"),
        ]))
        .unwrap();

        assert_eq!(settings.upstream.base_url, "http://localhost:9000");
    }
}

//! Health check handlers
//!
//! Provides application health status check endpoints

use crate::handlers::AppState;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Service name reported by the health endpoints
pub const SERVICE_NAME: &str = "callproxy";

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version information
    pub version: String,
    /// Timestamp
    pub timestamp: String,
    /// Details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

/// Check result
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthDetails {
    /// Primary upstream host
    pub upstream: String,
    /// Regional upstream host
    pub regional_upstream: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// Basic health check
///
/// GET /health
/// Reports the configured upstream hosts without contacting them
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing health check");

    let upstream = &state.settings.upstream;
    Json(build_response(
        "healthy",
        HealthDetails {
            upstream: upstream.base_url.clone(),
            regional_upstream: upstream.regional_base_url.clone(),
            uptime_seconds: get_uptime_seconds(),
        },
    ))
}

/// Liveness check
///
/// GET /health/live
pub async fn liveness_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing liveness check");

    let upstream = &state.settings.upstream;
    Json(build_response(
        "alive",
        HealthDetails {
            upstream: upstream.base_url.clone(),
            regional_upstream: upstream.regional_base_url.clone(),
            uptime_seconds: get_uptime_seconds(),
        },
    ))
}

fn build_response(status: &str, details: HealthDetails) -> HealthResponse {
    HealthResponse {
        status: status.to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: Some(details),
    }
}

/// Get service uptime in seconds
pub fn get_uptime_seconds() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START_TIME: OnceLock<Instant> = OnceLock::new();

    START_TIME.get_or_init(Instant::now).elapsed().as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::services::{Gateway, UpstreamClient};

    fn create_test_state() -> Arc<AppState> {
        let settings = Settings::from_lookup(|_| None).unwrap();
        let client = UpstreamClient::new(settings.upstream.clone()).unwrap();

        Arc::new(AppState {
            settings,
            gateway: Gateway::new(client),
        })
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = health_check(State(create_test_state())).await.0;

        assert_eq!(response.status, "healthy");
        assert_eq!(response.service, "callproxy");
        let details = response.details.unwrap();
        assert_eq!(details.upstream, "https://api.bland.ai");
        assert_eq!(details.regional_upstream, "https://us.api.bland.ai");
    }

    #[tokio::test]
    async fn test_liveness_check() {
        let response = liveness_check(State(create_test_state())).await.0;

        assert_eq!(response.status, "alive");
        assert!(response.details.is_some());
    }

    #[test]
    fn test_uptime_calculation() {
        let uptime1 = get_uptime_seconds();
        std::thread::sleep(std::time::Duration::from_millis(100));
        let uptime2 = get_uptime_seconds();

        assert!(uptime2 >= uptime1);
    }
}

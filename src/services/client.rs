//! HTTP client service
//!
//! Encapsulates HTTP communication with the upstream calling API

use crate::config::settings::UpstreamConfig;
use crate::middleware::BearerToken;
use crate::utils::error::{AppError, AppResult, ErrorContext};
use crate::utils::logging::body_preview;
use anyhow::{Context, Result};
use axum::body::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde::Serialize;
use tracing::debug;

/// Which upstream host an endpoint lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamHost {
    /// Calls, pathway CRUD, chat messages
    Primary,
    /// Folders, pathway moves, chat creation
    Regional,
}

/// Raw upstream answer, body fully read
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Upstream API client
///
/// Wraps one pooled `reqwest::Client`; clones share the pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    config: UpstreamConfig,
}

impl UpstreamClient {
    /// Create a new client instance
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(concat!("callproxy/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Build an endpoint URL from a host and raw path segments
    ///
    /// Segments are percent-encoded, so an id containing `/` stays one segment.
    pub fn url(&self, host: UpstreamHost, segments: &[&str]) -> AppResult<Url> {
        let base = match host {
            UpstreamHost::Primary => &self.config.base_url,
            UpstreamHost::Regional => &self.config.regional_base_url,
        };

        let mut url = Url::parse(base)
            .map_err(|e| AppError::Internal(format!("Invalid upstream base URL {}: {}", base, e)))?;

        url.path_segments_mut()
            .map_err(|_| AppError::Internal(format!("Upstream base URL cannot take a path: {}", base)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    pub async fn get(&self, url: Url, token: &BearerToken) -> AppResult<UpstreamResponse> {
        self.send::<()>(Method::GET, url, token, None).await
    }

    pub async fn post<B>(&self, url: Url, token: &BearerToken, body: &B) -> AppResult<UpstreamResponse>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, url, token, Some(body)).await
    }

    pub async fn delete(&self, url: Url, token: &BearerToken) -> AppResult<UpstreamResponse> {
        self.send::<()>(Method::DELETE, url, token, None).await
    }

    /// Execute exactly one upstream call and read the whole body
    pub async fn send<B>(
        &self,
        method: Method,
        url: Url,
        token: &BearerToken,
        body: Option<&B>,
    ) -> AppResult<UpstreamResponse>
    where
        B: Serialize + ?Sized,
    {
        debug!("Forwarding {} {} (token {})", method, url, token.redacted());

        let mut request = self
            .client
            .request(method, url)
            .header(AUTHORIZATION, token.as_str());

        if let Some(body) = body {
            let payload = serde_json::to_vec(body)
                .map_err(|e| AppError::Internal(format!("Failed to serialize upstream request: {}", e)))?;
            request = request.header(CONTENT_TYPE, "application/json").body(payload);
        }

        let response = request
            .send()
            .await
            .transport_context("Failed to send upstream request")?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .transport_context("Failed to read upstream response")?;

        debug!("Upstream responded {}: {}", status, body_preview(&body));

        Ok(UpstreamResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn create_test_config(base_url: &str) -> UpstreamConfig {
        UpstreamConfig {
            base_url: base_url.to_string(),
            regional_base_url: "https://regional.example.com".to_string(),
            timeout: 5,
            connect_timeout: 5,
        }
    }

    #[test]
    fn test_client_creation() {
        assert!(UpstreamClient::new(create_test_config("https://api.example.com")).is_ok());
    }

    #[test]
    fn test_url_building() {
        let client = UpstreamClient::new(create_test_config("https://api.example.com")).unwrap();

        let url = client.url(UpstreamHost::Primary, &["v1", "calls", "c1", "analyze"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/calls/c1/analyze");

        let url = client.url(UpstreamHost::Regional, &["v1", "pathway", "folders"]).unwrap();
        assert_eq!(url.as_str(), "https://regional.example.com/v1/pathway/folders");
    }

    #[test]
    fn test_url_segments_are_escaped() {
        let client = UpstreamClient::new(create_test_config("https://api.example.com")).unwrap();

        let url = client.url(UpstreamHost::Primary, &["v1", "calls", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/calls/a%2Fb%20c");
    }

    #[tokio::test]
    async fn test_send_relays_token_and_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/calls")
                    .header("Authorization", "Bearer tok-123")
                    .header("Content-Type", "application/json")
                    .json_body(json!({"pathway_id": "p1"}));
                then.status(201).body("created");
            })
            .await;

        let client = UpstreamClient::new(create_test_config(&server.base_url())).unwrap();
        let url = client.url(UpstreamHost::Primary, &["v1", "calls"]).unwrap();
        let token = BearerToken::new("Bearer tok-123");

        let response = client
            .post(url, &token, &json!({"pathway_id": "p1"}))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 201);
        assert!(response.is_success());
        assert_eq!(response.body_text(), "created");
    }

    #[tokio::test]
    async fn test_transport_failure() {
        // Nothing listens on port 9 (discard) in the test environment
        let client = UpstreamClient::new(create_test_config("http://127.0.0.1:9")).unwrap();
        let url = client.url(UpstreamHost::Primary, &["v1", "calls"]).unwrap();

        let result = client.get(url, &BearerToken::new("tok")).await;
        assert!(matches!(result, Err(AppError::UpstreamTransport(_))));
    }
}

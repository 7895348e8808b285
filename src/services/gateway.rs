//! Gateway operations
//!
//! One method per local endpoint: build the upstream request, forward it and
//! translate the answer.

use crate::middleware::BearerToken;
use crate::models::*;
use crate::services::client::{UpstreamClient, UpstreamHost};
use crate::services::translator;
use crate::utils::error::{AppError, AppResult};
use tracing::{debug, info, warn};

/// Stateless translator between the local API and the upstream API
#[derive(Debug, Clone)]
pub struct Gateway {
    client: UpstreamClient,
}

impl Gateway {
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }

    /// POST /v1/calls
    pub async fn send_call(&self, token: &BearerToken, request: &CallRequest) -> AppResult<CallResponse> {
        let url = self.client.url(UpstreamHost::Primary, &["v1", "calls"])?;
        let response = self.client.post(url, token, request).await?;
        translator::decode(&response)
    }

    /// POST /v1/calls/{call_id}/analyze
    pub async fn analyze_call(
        &self,
        token: &BearerToken,
        call_id: &str,
        request: &AnalyzeRequest,
    ) -> AppResult<AnalyzeResponse> {
        let url = self
            .client
            .url(UpstreamHost::Primary, &["v1", "calls", call_id, "analyze"])?;
        let response = self.client.post(url, token, request).await?;
        translator::decode(&response)
    }

    /// GET /v1/calls/{call_id}
    pub async fn call_details(&self, token: &BearerToken, call_id: &str) -> AppResult<CallDetail> {
        let url = self.client.url(UpstreamHost::Primary, &["v1", "calls", call_id])?;
        let response = self.client.get(url, token).await?;
        translator::decode(&response)
    }

    /// POST /v1/pathway/folders on the regional host
    pub async fn create_folder(&self, token: &BearerToken, request: &FolderRequest) -> AppResult<FolderData> {
        let url = self
            .client
            .url(UpstreamHost::Regional, &["v1", "pathway", "folders"])?;
        let response = self.client.post(url, token, request).await?;
        translator::decode_envelope(&response)
    }

    /// POST /v1/convo_pathway/create
    ///
    /// Any answer other than a 2xx carrying `status: "success"` is reported
    /// with the raw upstream body.
    pub async fn create_pathway(
        &self,
        token: &BearerToken,
        request: &PathwayCreateRequest,
    ) -> AppResult<PathwayCreateResponse> {
        let url = self
            .client
            .url(UpstreamHost::Primary, &["v1", "convo_pathway", "create"])?;
        let response = self.client.post(url, token, request).await?;

        if !response.is_success() {
            warn!("Pathway creation returned status {}", response.status);
            return Err(AppError::PathwayCreateFailed { body: response.body_text() });
        }

        let created: PathwayCreateResponse = translator::parse(&response)?;
        if !created.is_success() {
            warn!("Pathway creation reported status {:?}", created.status);
            return Err(AppError::PathwayCreateFailed { body: response.body_text() });
        }

        Ok(created)
    }

    /// POST /v1/pathway/folders/move on the regional host
    pub async fn move_pathway(
        &self,
        token: &BearerToken,
        request: &PathwayMoveRequest,
    ) -> AppResult<PathwayMoveData> {
        let url = self
            .client
            .url(UpstreamHost::Regional, &["v1", "pathway", "folders", "move"])?;
        let response = self.client.post(url, token, request).await?;
        translator::decode_envelope(&response)
    }

    /// Create a pathway, then move it into `folder_id`
    ///
    /// The move is skipped when creation fails. A failed move leaves the new
    /// pathway in place; nothing is rolled back.
    pub async fn create_and_move_pathway(
        &self,
        token: &BearerToken,
        request: &PathwayCreateRequest,
        folder_id: Option<String>,
    ) -> AppResult<CombinedResponse> {
        let created = self.create_pathway(token, request).await?;
        info!("Pathway {} created", created.pathway_id);

        let move_request = PathwayMoveRequest {
            pathway_id: created.pathway_id.clone(),
            folder_id: folder_id.filter(|id| !id.trim().is_empty()),
        };
        debug!(
            "Moving pathway {} to folder {:?}",
            move_request.pathway_id, move_request.folder_id
        );

        let moved = self
            .move_pathway(token, &move_request)
            .await
            .map_err(|e| {
                warn!("Pathway {} was created but not moved: {}", created.pathway_id, e);
                e
            })?;

        Ok(CombinedResponse { created, moved })
    }

    /// POST /v1/pathway/chat/create on the regional host
    pub async fn create_chat(
        &self,
        token: &BearerToken,
        request: &ChatCreateRequest,
    ) -> AppResult<ChatCreateData> {
        let url = self
            .client
            .url(UpstreamHost::Regional, &["v1", "pathway", "chat", "create"])?;
        let response = self.client.post(url, token, request).await?;
        translator::decode_envelope(&response)
    }

    /// GET /v1/convo_pathway/{pathway_id}
    pub async fn get_pathway(&self, token: &BearerToken, pathway_id: &str) -> AppResult<PathwayGetResponse> {
        let url = self
            .client
            .url(UpstreamHost::Primary, &["v1", "convo_pathway", pathway_id])?;
        let response = self.client.get(url, token).await?;
        translator::decode(&response)
    }

    /// POST /v1/convo_pathway/{pathway_id}
    pub async fn update_pathway(
        &self,
        token: &BearerToken,
        pathway_id: &str,
        request: &UpdatePathwayRequest,
    ) -> AppResult<PathwayData> {
        let url = self
            .client
            .url(UpstreamHost::Primary, &["v1", "convo_pathway", pathway_id])?;
        let response = self.client.post(url, token, request).await?;
        translator::decode_pathway_update(&response)
    }

    /// DELETE /v1/convo_pathway/{pathway_id}
    pub async fn delete_pathway(
        &self,
        token: &BearerToken,
        pathway_id: &str,
    ) -> AppResult<DeletePathwayResponse> {
        let url = self
            .client
            .url(UpstreamHost::Primary, &["v1", "convo_pathway", pathway_id])?;
        let response = self.client.delete(url, token).await?;
        translator::decode(&response)
    }

    /// POST /v1/pathway/chat/{chat_id}
    pub async fn send_chat_message(
        &self,
        token: &BearerToken,
        chat_id: &str,
        request: &SendMessageRequest,
    ) -> AppResult<SendMessageData> {
        let url = self
            .client
            .url(UpstreamHost::Primary, &["v1", "pathway", "chat", chat_id])?;
        let response = self.client.post(url, token, request).await?;
        translator::decode_envelope(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::UpstreamConfig;
    use httpmock::prelude::*;
    use serde_json::json;

    fn create_test_gateway(server: &MockServer) -> Gateway {
        let client = UpstreamClient::new(UpstreamConfig {
            base_url: server.base_url(),
            regional_base_url: server.base_url(),
            timeout: 5,
            connect_timeout: 5,
        })
        .unwrap();
        Gateway::new(client)
    }

    fn create_request() -> PathwayCreateRequest {
        PathwayCreateRequest {
            name: "Support".to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_failed_create_skips_move() {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/convo_pathway/create");
                then.status(200).json_body(json!({"status": "error", "pathway_id": ""}));
            })
            .await;
        let mv = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/pathway/folders/move");
                then.status(200).json_body(json!({"data": {"pathway_id": ""}}));
            })
            .await;

        let gateway = create_test_gateway(&server);
        let token = BearerToken::new("tok");
        let err = gateway
            .create_and_move_pathway(&token, &create_request(), Some("f9".to_string()))
            .await
            .unwrap_err();

        create.assert_async().await;
        assert_eq!(mv.hits_async().await, 0);
        match err {
            AppError::PathwayCreateFailed { body } => assert!(body.contains("\"error\"")),
            other => panic!("Expected create failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_move_failure_propagates() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/convo_pathway/create");
                then.status(200).json_body(json!({"status": "success", "pathway_id": "p1"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/pathway/folders/move")
                    .json_body(json!({"pathway_id": "p1"}));
                then.status(404).body("folder missing");
            })
            .await;

        let gateway = create_test_gateway(&server);
        let err = gateway
            .create_and_move_pathway(&BearerToken::new("tok"), &create_request(), Some(" ".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UpstreamStatus { status: 404, .. }));
    }
}

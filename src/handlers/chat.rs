//! Pathway chat handlers

use crate::handlers::{require_path_param, AppState};
use crate::middleware::{AuthToken, ValidatedJson, ValidatedPath};
use crate::models::*;
use crate::utils::error::AppResult;
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::debug;

/// POST /api/v1/pathways/chat/create
pub async fn create_chat(
    State(state): State<Arc<AppState>>,
    auth: AuthToken,
    ValidatedJson(request): ValidatedJson<ChatCreateRequest>,
) -> AppResult<Json<ChatCreateData>> {
    let token = auth.require()?;
    debug!(
        "Starting chat on pathway {} at node {}",
        request.pathway_id, request.start_node_id
    );

    let chat = state.gateway.create_chat(&token, &request).await?;
    Ok(Json(chat))
}

/// POST /api/v1/pathways/chat/:chat_id/send
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    auth: AuthToken,
    ValidatedPath(chat_id): ValidatedPath<String>,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> AppResult<Json<SendMessageData>> {
    require_path_param("chat_id", &chat_id)?;
    let token = auth.require()?;

    let reply = state.gateway.send_chat_message(&token, &chat_id, &request).await?;
    debug!("Chat {} now at node {:?}", chat_id, reply.current_node_name);

    Ok(Json(reply))
}

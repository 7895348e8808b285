//! Call handlers
//!
//! Place calls, run post-call analysis and fetch call details

use crate::handlers::{require_path_param, AppState};
use crate::middleware::{AuthToken, ValidatedJson, ValidatedPath};
use crate::models::*;
use crate::utils::error::AppResult;
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{debug, info};

/// POST /api/v1/call
pub async fn send_call(
    State(state): State<Arc<AppState>>,
    auth: AuthToken,
    ValidatedJson(request): ValidatedJson<CallRequest>,
) -> AppResult<Json<CallResponse>> {
    let token = auth.require()?;
    debug!("Placing call via pathway {}", request.pathway_id);

    let response = state.gateway.send_call(&token, &request).await?;
    info!("Call {} queued with status {:?}", response.call_id, response.status);

    Ok(Json(response))
}

/// POST /api/v1/call/:call_id/analyze
pub async fn analyze_call(
    State(state): State<Arc<AppState>>,
    auth: AuthToken,
    ValidatedPath(call_id): ValidatedPath<String>,
    ValidatedJson(request): ValidatedJson<AnalyzeRequest>,
) -> AppResult<Json<AnalyzeResponse>> {
    require_path_param("call_id", &call_id)?;
    let token = auth.require()?;
    debug!("Analyzing call {} with {} questions", call_id, request.questions.len());

    let response = state.gateway.analyze_call(&token, &call_id, &request).await?;
    Ok(Json(response))
}

/// GET /api/v1/calls/:call_id
pub async fn call_details(
    State(state): State<Arc<AppState>>,
    auth: AuthToken,
    ValidatedPath(call_id): ValidatedPath<String>,
) -> AppResult<Json<CallDetail>> {
    require_path_param("call_id", &call_id)?;
    let token = auth.require()?;

    let detail = state.gateway.call_details(&token, &call_id).await?;
    Ok(Json(detail))
}

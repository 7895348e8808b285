//! Folder and pathway handlers

use crate::handlers::{require_path_param, AppState};
use crate::middleware::{AuthToken, ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::models::*;
use crate::utils::error::AppResult;
use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Query string of create-and-move
#[derive(Debug, Default, Deserialize)]
pub struct CreateAndMoveParams {
    pub folder_id: Option<String>,
}

/// POST /api/v1/folders
pub async fn create_folder(
    State(state): State<Arc<AppState>>,
    auth: AuthToken,
    ValidatedJson(request): ValidatedJson<FolderRequest>,
) -> AppResult<Json<FolderData>> {
    let token = auth.require()?;
    debug!("Creating folder {:?}", request.name);

    let folder = state.gateway.create_folder(&token, &request).await?;
    info!("Folder {} created", folder.folder_id);

    Ok(Json(folder))
}

/// POST /api/v1/pathways/create-and-move?folder_id=
pub async fn create_and_move(
    State(state): State<Arc<AppState>>,
    auth: AuthToken,
    ValidatedQuery(params): ValidatedQuery<CreateAndMoveParams>,
    ValidatedJson(request): ValidatedJson<PathwayCreateRequest>,
) -> AppResult<Json<CombinedResponse>> {
    let token = auth.require()?;

    let combined = state
        .gateway
        .create_and_move_pathway(&token, &request, params.folder_id)
        .await?;

    Ok(Json(combined))
}

/// GET /api/v1/convo_pathway/:pathway_id
pub async fn get_pathway(
    State(state): State<Arc<AppState>>,
    auth: AuthToken,
    ValidatedPath(pathway_id): ValidatedPath<String>,
) -> AppResult<Json<PathwayGetResponse>> {
    require_path_param("pathway_id", &pathway_id)?;
    let token = auth.require()?;

    let pathway = state.gateway.get_pathway(&token, &pathway_id).await?;
    debug!(
        "Pathway {} has {} nodes and {} edges",
        pathway_id,
        pathway.nodes.len(),
        pathway.edges.len()
    );

    Ok(Json(pathway))
}

/// POST /api/v1/pathway/update/:pathway_id
pub async fn update_pathway(
    State(state): State<Arc<AppState>>,
    auth: AuthToken,
    ValidatedPath(pathway_id): ValidatedPath<String>,
    ValidatedJson(request): ValidatedJson<UpdatePathwayRequest>,
) -> AppResult<Json<PathwayData>> {
    require_path_param("pathway_id", &pathway_id)?;
    let token = auth.require()?;

    let updated = state.gateway.update_pathway(&token, &pathway_id, &request).await?;
    info!("Pathway {} updated", pathway_id);

    Ok(Json(updated))
}

/// DELETE /api/v1/delete/convo_pathway/:pathway_id
pub async fn delete_pathway(
    State(state): State<Arc<AppState>>,
    auth: AuthToken,
    ValidatedPath(pathway_id): ValidatedPath<String>,
) -> AppResult<Json<DeletePathwayResponse>> {
    require_path_param("pathway_id", &pathway_id)?;
    let token = auth.require()?;

    let deleted = state.gateway.delete_pathway(&token, &pathway_id).await?;
    info!("Pathway {} deleted with status {:?}", pathway_id, deleted.status);

    Ok(Json(deleted))
}

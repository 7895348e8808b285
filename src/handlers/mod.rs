//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod calls;
pub mod chat;
pub mod health;
pub mod pathways;

use crate::config::Settings;
use crate::middleware::logging::request_logging_middleware;
use crate::models::require_text;
use crate::services::{Gateway, UpstreamClient};
use crate::utils::error::{AppError, AppResult};
use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Base path of the gateway API
pub const API_BASE_PATH: &str = "/api/v1";

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub gateway: Gateway,
}

/// Create application router
pub fn create_router(settings: Settings) -> Result<Router> {
    let client = UpstreamClient::new(settings.upstream.clone())?;

    let app_state = Arc::new(AppState {
        settings: settings.clone(),
        gateway: Gateway::new(client),
    });

    let api = Router::new()
        .route("/call", post(calls::send_call))
        .route("/call/:call_id/analyze", post(calls::analyze_call))
        .route("/calls/:call_id", get(calls::call_details))
        .route("/folders", post(pathways::create_folder))
        .route("/pathways/create-and-move", post(pathways::create_and_move))
        .route("/pathways/chat/create", post(chat::create_chat))
        .route("/pathways/chat/:chat_id/send", post(chat::send_message))
        .route("/convo_pathway/:pathway_id", get(pathways::get_pathway))
        .route("/pathway/update/:pathway_id", post(pathways::update_pathway))
        .route("/delete/convo_pathway/:pathway_id", delete(pathways::delete_pathway));

    let mut router = Router::new()
        .nest(API_BASE_PATH, api)
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(settings.request.max_request_size))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logging_middleware)),
        );

    if settings.security.cors_enabled {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    Ok(router)
}

/// Reject a blank path parameter
pub(crate) fn require_path_param(name: &str, value: &str) -> AppResult<()> {
    require_text(name, value).map_err(AppError::Validation)
}

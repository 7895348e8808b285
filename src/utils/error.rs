//! Error handling module
//!
//! Defines error types and handling logic used in the project

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Inbound body or path failed validation
    #[error("Request validation failed: {0}")]
    Validation(String),

    /// Inbound body exceeded the configured limit
    #[error("Payload too large")]
    PayloadTooLarge,

    /// No bearer token on the inbound request
    #[error("Authorization token is required")]
    MissingAuth,

    /// Request construction, network or body read failure
    #[error("Upstream request failed: {0}")]
    UpstreamTransport(String),

    /// Upstream body did not match the expected shape
    #[error("Failed to parse upstream response: {0}")]
    UpstreamDecode(String),

    /// Upstream answered with a non-success status
    #[error("Upstream returned status {status}")]
    UpstreamStatus { status: u16, body: String },

    /// Upstream answered 2xx but reported a failure in the body
    #[error("{0}")]
    UpstreamLogic(String),

    /// Pathway creation step of create-and-move did not succeed
    #[error("Pathway creation failed")]
    PathwayCreateFailed { body: String },

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error envelope returned for every failure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error type
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message
    pub message: String,
    /// Status reported by the upstream API (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
    /// Raw upstream response body (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_body: Option<String>,
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::MissingAuth => StatusCode::UNAUTHORIZED,
            AppError::UpstreamStatus { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            AppError::UpstreamTransport(_)
            | AppError::UpstreamDecode(_)
            | AppError::UpstreamLogic(_)
            | AppError::PathwayCreateFailed { .. }
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::PayloadTooLarge => "invalid_request_error",
            AppError::MissingAuth => "authentication_error",
            AppError::UpstreamTransport(_) => "upstream_transport_error",
            AppError::UpstreamDecode(_) => "upstream_decode_error",
            AppError::UpstreamStatus { .. } => "upstream_status_error",
            AppError::UpstreamLogic(_) | AppError::PathwayCreateFailed { .. } => {
                "upstream_logic_error"
            }
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Whether detailed error information should be logged
    pub fn should_log_details(&self) -> bool {
        !matches!(
            self,
            AppError::MissingAuth | AppError::Validation(_) | AppError::PayloadTooLarge
        )
    }

    /// Convert to the error envelope
    pub fn to_error_response(&self) -> ErrorResponse {
        let (upstream_status, upstream_body) = match self {
            AppError::UpstreamStatus { status, body } => (Some(*status), Some(body.clone())),
            AppError::PathwayCreateFailed { body } => (None, Some(body.clone())),
            _ => (None, None),
        };

        ErrorResponse {
            error_type: self.error_type().to_string(),
            message: self.to_string(),
            upstream_status,
            upstream_body,
        }
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.should_log_details() {
            tracing::error!("Application error: {} - Status code: {}", self, status);
        } else {
            tracing::warn!("Client error: {} - Status code: {}", self, status);
        }

        (status, Json(self.to_error_response())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Error context extension trait
pub trait ErrorContext<T> {
    /// Add validation error context
    fn validation_context(self, message: &str) -> AppResult<T>;

    /// Add upstream transport error context
    fn transport_context(self, message: &str) -> AppResult<T>;

    /// Add upstream decode error context
    fn decode_context(self, message: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn validation_context(self, message: &str) -> AppResult<T> {
        self.map_err(|e| AppError::Validation(format!("{}: {}", message, e)))
    }

    fn transport_context(self, message: &str) -> AppResult<T> {
        self.map_err(|e| AppError::UpstreamTransport(format!("{}: {}", message, e)))
    }

    fn decode_context(self, message: &str) -> AppResult<T> {
        self.map_err(|e| AppError::UpstreamDecode(format!("{}: {}", message, e)))
    }
}

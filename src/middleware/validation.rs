//! Request validation
//!
//! Decodes the inbound JSON body regardless of its content type and runs the
//! target shape's required-field checks. Path and query extraction failures
//! are reported through the same error envelope.

use crate::models::Validate;
use crate::utils::error::{AppError, ErrorContext};
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{request::Parts, StatusCode},
};
use serde::de::DeserializeOwned;
use tracing::debug;

/// JSON body that decoded and passed validation
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge
            } else {
                AppError::Validation(rejection.body_text())
            }
        })?;

        let value = decode_body::<T>(&body)?;
        Ok(ValidatedJson(value))
    }
}

/// Decode and validate a raw body
pub fn decode_body<T>(body: &[u8]) -> Result<T, AppError>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_slice(body).validation_context("Invalid request body")?;

    if let Err(message) = value.validate() {
        debug!("Request body failed validation: {}", message);
        return Err(AppError::Validation(message));
    }

    Ok(value)
}

/// Path parameters; extraction failures become [`AppError`]
#[derive(Debug, Clone)]
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| rejection_error(rejection.status(), rejection.body_text()))?;
        Ok(ValidatedPath(value))
    }
}

/// Query string parameters; extraction failures become [`AppError`]
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| rejection_error(rejection.status(), rejection.body_text()))?;
        Ok(ValidatedQuery(value))
    }
}

fn rejection_error(status: StatusCode, message: String) -> AppError {
    if status.is_server_error() {
        AppError::Internal(message)
    } else {
        AppError::Validation(message)
    }
}

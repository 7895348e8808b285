//! Response translation
//!
//! Turns raw upstream answers into typed results or gateway errors

use crate::models::{DataEnvelope, PathwayData, UpdatePathwayResponse};
use crate::services::client::UpstreamResponse;
use crate::utils::error::{AppError, AppResult, ErrorContext};
use serde::de::DeserializeOwned;
use tracing::warn;

/// Pass a non-2xx upstream answer through as an error
pub fn ensure_success(response: &UpstreamResponse) -> AppResult<()> {
    if response.is_success() {
        return Ok(());
    }

    warn!("Upstream returned non-success status {}", response.status);
    Err(AppError::UpstreamStatus {
        status: response.status,
        body: response.body_text(),
    })
}

/// Decode the body without looking at the status
pub fn parse<T: DeserializeOwned>(response: &UpstreamResponse) -> AppResult<T> {
    serde_json::from_slice(&response.body).decode_context("Unexpected upstream response shape")
}

/// Check the status, then decode the body
pub fn decode<T: DeserializeOwned>(response: &UpstreamResponse) -> AppResult<T> {
    ensure_success(response)?;
    parse(response)
}

/// Decode a `{data, errors}` answer and return `data`
pub fn decode_envelope<T: DeserializeOwned>(response: &UpstreamResponse) -> AppResult<T> {
    let envelope: DataEnvelope<T> = decode(response)?;
    unwrap_envelope(envelope)
}

pub fn unwrap_envelope<T>(envelope: DataEnvelope<T>) -> AppResult<T> {
    if let Some(message) = envelope.error_message() {
        warn!("Upstream reported errors: {}", message);
        return Err(AppError::UpstreamLogic(message));
    }

    envelope
        .data
        .ok_or_else(|| AppError::UpstreamDecode("Upstream response has no data field".to_string()))
}

/// Decode a pathway update answer; a 2xx with a non-success status is a failure
pub fn decode_pathway_update(response: &UpstreamResponse) -> AppResult<PathwayData> {
    let update: UpdatePathwayResponse = decode(response)?;

    if !update.is_success() {
        warn!("Pathway update returned status {:?}: {}", update.status, update.message);
        let message = if update.message.is_empty() {
            format!("Pathway update failed with status {:?}", update.status)
        } else {
            update.message
        };
        return Err(AppError::UpstreamLogic(message));
    }

    Ok(update.pathway_data)
}

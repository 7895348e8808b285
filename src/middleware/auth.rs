//! Authentication extraction
//!
//! Reads the caller's bearer token so it can be relayed upstream. The token is
//! never validated locally; only its presence is checked.

use crate::handlers::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::logging::redact_token;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Caller credential, relayed verbatim
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Log-safe form of the token
    pub fn redacted(&self) -> String {
        redact_token(&self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken").field(&self.redacted()).finish()
    }
}

/// Token extractor that never rejects
///
/// Handlers call [`AuthToken::require`] after the body has been validated so
/// that a malformed body is reported before a missing token.
#[derive(Debug, Clone)]
pub struct AuthToken(pub Option<BearerToken>);

impl AuthToken {
    pub fn require(self) -> AppResult<BearerToken> {
        self.0.ok_or(AppError::MissingAuth)
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthToken {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers, &state.settings.security.api_key_header);
        match &token {
            Some(t) => debug!("Authorization token received: {}", t.redacted()),
            None => debug!("No authorization token on request"),
        }
        Ok(AuthToken(token))
    }
}

/// Extract a non-blank token from the named header
pub fn extract_token(headers: &HeaderMap, header_name: &str) -> Option<BearerToken> {
    headers
        .get(header_name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .map(BearerToken::new)
}

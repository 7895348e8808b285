//! Middleware and extractors
//!
//! Token extraction, body validation and request logging

pub mod auth;
pub mod logging;
pub mod validation;

pub use auth::{AuthToken, BearerToken};
pub use validation::{ValidatedJson, ValidatedPath, ValidatedQuery};

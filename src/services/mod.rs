//! Service layer module
//!
//! Contains the upstream HTTP client, the response translator and the
//! gateway operations built on them

pub mod client;
pub mod gateway;
pub mod translator;

pub use client::{UpstreamClient, UpstreamHost, UpstreamResponse};
pub use gateway::Gateway;

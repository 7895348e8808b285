//! Data models module
//!
//! Defines the local request shapes and the upstream response shapes for
//! calls, folders, pathways and chats

use serde::{Deserialize, Deserializer, Serialize};

pub mod call;
pub mod chat;
pub mod pathway;

pub use call::*;
pub use chat::*;
pub use pathway::*;

/// Required-field check run on every inbound body after decoding
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Upstream `{data, errors}` wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    /// Payload, absent when the upstream reports errors
    pub data: Option<T>,
    /// Error indicator, `null` on success
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

impl<T> DataEnvelope<T> {
    /// Text of the embedded error indicator, if it signals a failure
    pub fn error_message(&self) -> Option<String> {
        match self.errors.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.trim().is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) if items.is_empty() => None,
            serde_json::Value::Object(map) if map.is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}

/// Deserialize `null` as the type's default value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Fail when a required text field is blank
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    Ok(())
}

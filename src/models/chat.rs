//! Chat data models
//!
//! Shapes for opening a test chat on a pathway and exchanging messages with it

use super::{null_as_default, require_text, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCreateRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub pathway_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_node_id: String,
}

impl Validate for ChatCreateRequest {
    fn validate(&self) -> Result<(), String> {
        require_text("pathway_id", &self.pathway_id)?;
        require_text("start_node_id", &self.start_node_id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatCreateData {
    #[serde(deserialize_with = "null_as_default")]
    pub chat_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

impl Validate for SendMessageRequest {
    fn validate(&self) -> Result<(), String> {
        require_text("message", &self.message)
    }
}

/// One turn of the conversation, `user` or `assistant`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatHistoryEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SendMessageData {
    #[serde(deserialize_with = "null_as_default")]
    pub chat_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub assistant_response: String,
    #[serde(deserialize_with = "null_as_default")]
    pub current_node_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub current_node_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub chat_history: Vec<ChatHistoryEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub pathway_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub variables: HashMap<String, serde_json::Value>,
}


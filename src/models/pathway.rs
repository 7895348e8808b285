//! Pathway and folder data models
//!
//! Graph elements keep unrecognized keys in `extra` so a fetched pathway
//! can be sent back through an update without losing data.

use super::{null_as_default, require_text, Validate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request to create a pathway folder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_folder_id: Option<String>,
}

impl Validate for FolderRequest {
    fn validate(&self) -> Result<(), String> {
        require_text("name", &self.name)
    }
}

/// Folder record returned inside the upstream envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderData {
    #[serde(deserialize_with = "null_as_default")]
    pub folder_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_folder_id: Option<String>,
}

/// Request to create a pathway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathwayCreateRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Validate for PathwayCreateRequest {
    fn validate(&self) -> Result<(), String> {
        require_text("name", &self.name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathwayCreateResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pathway_id: String,
}

impl PathwayCreateResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Request to move a pathway into a folder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathwayMoveRequest {
    pub pathway_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathwayMoveData {
    #[serde(deserialize_with = "null_as_default")]
    pub pathway_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_folder_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_folder_id: Option<String>,
}

/// Result of create-and-move, composed locally from both upstream answers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedResponse {
    pub created: PathwayCreateResponse,
    pub moved: PathwayMoveData,
}

/// Pathway as returned by the upstream API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathwayGetResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub nodes: Vec<Node>,
    #[serde(deserialize_with = "null_as_default")]
    pub edges: Vec<Edge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_version_number: Option<Value>,
}

/// Pathway graph node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data: NodeData,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub node_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeData {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_options: Option<ModelOptions>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_start: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "std::ops::Not::not")]
    pub is_global: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelOptions {
    #[serde(deserialize_with = "null_as_default")]
    pub model_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub temperature: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub skip_user_response: bool,
    #[serde(rename = "block_interruptions", deserialize_with = "null_as_default")]
    pub block_interruptions: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Pathway graph edge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Edge {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(deserialize_with = "null_as_default")]
    pub target: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partial pathway update; omitted fields are left untouched upstream
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePathwayRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<Edge>>,
}

impl Validate for UpdatePathwayRequest {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdatePathwayResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pathway_data: PathwayData,
}

impl UpdatePathwayResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathwayData {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub nodes: Vec<Node>,
    #[serde(deserialize_with = "null_as_default")]
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeletePathwayResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pathway_id: String,
}

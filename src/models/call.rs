//! Call data models
//!
//! Request and response shapes for placing, analyzing and inspecting calls

use super::{null_as_default, require_text, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request to place a call through a pathway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pathway_id: String,
}

impl Validate for CallRequest {
    fn validate(&self) -> Result<(), String> {
        require_text("phone_number", &self.phone_number)?;
        require_text("pathway_id", &self.pathway_id)
    }
}

/// Upstream answer to a placed call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CallResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub call_id: String,
}

/// Request to analyze a finished call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub goal: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions: Vec<Vec<String>>,
}

impl Validate for AnalyzeRequest {
    fn validate(&self) -> Result<(), String> {
        require_text("goal", &self.goal)?;
        if self.questions.is_empty() {
            return Err("questions is required".to_string());
        }
        Ok(())
    }
}

/// Upstream analysis result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub answers: Vec<serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub credits_used: f64,
}

/// Full record of a call, relayed as-is
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CallDetail {
    #[serde(deserialize_with = "null_as_default")]
    pub call_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub call_length: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub from: String,
    #[serde(deserialize_with = "null_as_default")]
    pub request_data: RequestData,
    #[serde(deserialize_with = "null_as_default")]
    pub completed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub inbound: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub queue_status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub endpoint_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub max_duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub variables: HashMap<String, serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub answered_by: String,
    #[serde(deserialize_with = "null_as_default")]
    pub record: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub started_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub local_dialing: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub call_ended_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pathway_logs: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub concatenated_transcript: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transcripts: Vec<Transcript>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub corrected_duration: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_at: String,
}

/// Original parameters of the call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestData {
    #[serde(deserialize_with = "null_as_default")]
    pub phone_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wait: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub language: String,
}

/// One utterance of the call transcript
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Transcript {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_request_validation() {
        let req: CallRequest =
            serde_json::from_str(r#"{"phone_number":"+14155552671","pathway_id":""}"#).unwrap();
        assert_eq!(req.validate().unwrap_err(), "pathway_id is required");
    }

    #[test]
    fn test_call_detail_tolerates_nulls() {
        let detail: CallDetail = serde_json::from_str(
            r#"{"call_id":"c1","summary":null,"variables":null,"transcripts":null,"price":null}"#,
        )
        .unwrap();

        assert_eq!(detail.call_id, "c1");
        assert_eq!(detail.summary, "");
        assert!(detail.variables.is_empty());
        assert!(detail.transcripts.is_empty());
    }
}

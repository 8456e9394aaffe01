//! Backend wire schema
//!
//! Field names follow the backend's snake_case OpenAPI schema. Collections
//! default to empty because older backend revisions omit them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `ProjectResponse`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiProposal {
    pub id: i64,
    #[serde(default)]
    pub application_number: Option<String>,
    pub name: String,
    pub created_at: String,
    #[serde(default)]
    pub documents: Vec<ApiDocument>,
    #[serde(default)]
    pub signature_analysis_status: Option<String>,
    #[serde(default)]
    pub signature_analysis_report_html: Option<String>,
    #[serde(default)]
    pub chat_session_id: Option<String>,
}

/// `DocumentResponse`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDocument {
    pub id: i64,
    pub file_name: String,
    pub project_id: i64,
    pub created_at: String,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub pages: Vec<ApiPage>,
    #[serde(default)]
    pub chat_session_id: Option<String>,
}

/// `PageResponse`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPage {
    pub id: i64,
    pub page_number: u32,
    pub document_id: i64,
    #[serde(default)]
    pub generated_form_html: Option<String>,
    #[serde(default)]
    pub text_content: Option<String>,
    #[serde(default)]
    pub signatures: Vec<ApiSignature>,
}

/// `SignatureInstanceResponse`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSignature {
    pub id: i64,
    pub page_id: i64,
    #[serde(default)]
    pub document_id: Option<i64>,
    #[serde(default)]
    pub stakeholder_id: Option<i64>,
    #[serde(default)]
    pub ai_signature_id: Option<String>,
    /// Sent as a string, e.g. `"0.93"`
    #[serde(default)]
    pub ai_confidence: Option<String>,
    /// Usually `{x, y, width, height}`, but not guaranteed
    #[serde(default)]
    pub bounding_box_json: Option<Value>,
    #[serde(default)]
    pub textract_response_json: Option<Value>,
    #[serde(default)]
    pub is_consistent_with_stakeholder_group: Option<bool>,
    #[serde(default)]
    pub is_unique_among_stakeholders: Option<bool>,
    #[serde(default)]
    pub analysis_notes: Option<String>,
}

/// `ProjectCreate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalCreatePayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_session_id: Option<String>,
}

/// `GeneratedHtmlResponse`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratedHtmlResponse {
    #[serde(default)]
    pub html_content: Option<String>,
}

/// Body of the `extract-html` trigger
#[derive(Debug, Clone, Serialize)]
pub struct ExtractHtmlRequest {
    pub page_number: u32,
}

/// Body of a chat message post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageRequest {
    pub message: String,
}

/// Generic acknowledgement returned by trigger endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body in the backend's FastAPI style
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Human-readable form of `detail`
    ///
    /// A plain string is returned as is. A validation array is flattened to
    /// its `msg` entries joined with `", "`.
    pub fn message(&self) -> Option<String> {
        let message = match self.detail.as_ref()? {
            Value::String(s) => s.trim().to_string(),
            Value::Array(items) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Object(obj) => obj.get("msg").and_then(Value::as_str).map(String::from),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(", "),
            Value::Null => String::new(),
            other => other.to_string(),
        };

        if message.is_empty() {
            None
        } else {
            Some(message)
        }
    }
}

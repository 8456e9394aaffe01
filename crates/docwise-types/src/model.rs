//! Client-side domain model
//!
//! Serialized in camelCase, the naming convention of the DocumentWise front
//! end. None of these values is authoritative: they are re-fetched from the
//! backend after every mutation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level case/application record grouping uploaded documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: i64,
    pub application_number: Option<String>,
    pub name: String,
    /// ISO-8601 timestamp, passed through from the backend untouched
    pub created_at: String,
    pub documents: Vec<Document>,
    pub signature_analysis_status: Option<AnalysisStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_analysis_report_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_session_id: Option<String>,
}

impl Proposal {
    /// Find one of this proposal's documents by id
    pub fn document(&self, document_id: i64) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == document_id)
    }
}

/// An uploaded PDF belonging to a proposal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    pub name: String,
    pub uploaded_at: String,
    pub total_pages: u32,
    pub project_id: i64,
    pub pages: Vec<Page>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_session_id: Option<String>,
}

impl Document {
    /// Whether `page_number` addresses a page of this document (1-based)
    pub fn contains_page(&self, page_number: u32) -> bool {
        (1..=self.total_pages).contains(&page_number)
    }

    pub fn page(&self, page_number: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.page_number == page_number)
    }
}

/// One page of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: i64,
    pub page_number: u32,
    pub html_content: Option<String>,
    pub text_content: Option<String>,
    pub signatures: Vec<Signature>,
    pub document_id: i64,
}

/// A signature detected on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub id: i64,
    pub page_id: i64,
    /// Inferred from the owning document rather than read from the wire
    pub document_id: i64,
    pub stakeholder_id: Option<i64>,
    pub ai_signature_id: Option<String>,
    pub confidence: Option<f64>,
    pub coordinates: Option<BoundingBox>,
    pub is_consistent_with_stakeholder_group: Option<bool>,
    pub is_unique_among_stakeholders: Option<bool>,
    pub analysis_notes: Option<String>,
}

/// Signature bounding box in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Signature-analysis status of a proposal
///
/// The backend sends a free-form string. Known spellings are folded into the
/// named variants; anything else is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnalysisStatus {
    NotStarted,
    InProgress,
    Completed,
    Failed,
    Other(String),
}

impl AnalysisStatus {
    pub fn parse(raw: &str) -> Self {
        let folded: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match folded.as_str() {
            "notstarted" | "pending" => AnalysisStatus::NotStarted,
            "inprogress" | "running" | "processing" => AnalysisStatus::InProgress,
            "completed" | "completedsuccess" | "complete" => AnalysisStatus::Completed,
            "failed" | "error" => AnalysisStatus::Failed,
            _ => AnalysisStatus::Other(raw.to_string()),
        }
    }

    /// Canonical wire spelling
    pub fn as_str(&self) -> &str {
        match self {
            AnalysisStatus::NotStarted => "not_started",
            AnalysisStatus::InProgress => "in_progress",
            AnalysisStatus::Completed => "completed",
            AnalysisStatus::Failed => "failed",
            AnalysisStatus::Other(raw) => raw,
        }
    }

    /// Badge label shown next to a proposal
    pub fn label(&self) -> &str {
        match self {
            AnalysisStatus::NotStarted => "Not Started",
            AnalysisStatus::InProgress => "In Progress",
            AnalysisStatus::Completed => "Completed",
            AnalysisStatus::Failed => "Failed",
            AnalysisStatus::Other(raw) => raw,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AnalysisStatus::Completed | AnalysisStatus::Failed)
    }
}

impl From<String> for AnalysisStatus {
    fn from(raw: String) -> Self {
        AnalysisStatus::parse(&raw)
    }
}

impl From<AnalysisStatus> for String {
    fn from(status: AnalysisStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

// Chat types have no transform step: the chat API's snake_case payload is
// read directly and written back out in camelCase.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_mime_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct ChatSessionInfo {
    pub id: String,
    pub title: String,
    pub created_at: String,
}

/// A chat session together with its messages, oldest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatHistory {
    pub session: ChatSessionInfo,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// A file picked for upload, before it is sent anywhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    /// Declared MIME type, if the source supplied one
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// An upload declared as `application/pdf`
    pub fn pdf(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(
            file_name,
            Some(crate::validation::PDF_MIME_TYPE.to_string()),
            bytes,
        )
    }
}

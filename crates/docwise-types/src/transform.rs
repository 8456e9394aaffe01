//! Wire -> domain conversion

use serde_json::Value;

use crate::model::{AnalysisStatus, BoundingBox, Document, Page, Proposal, Signature};
use crate::wire::{ApiDocument, ApiPage, ApiProposal, ApiSignature};

impl From<ApiProposal> for Proposal {
    fn from(api: ApiProposal) -> Self {
        Proposal {
            id: api.id,
            application_number: api.application_number,
            name: api.name,
            created_at: api.created_at,
            documents: api.documents.into_iter().map(Document::from).collect(),
            signature_analysis_status: api
                .signature_analysis_status
                .as_deref()
                .map(AnalysisStatus::parse),
            signature_analysis_report_html: api.signature_analysis_report_html,
            chat_session_id: api.chat_session_id,
        }
    }
}

impl From<ApiDocument> for Document {
    fn from(api: ApiDocument) -> Self {
        let document_id = api.id;
        Document {
            id: api.id,
            name: api.file_name,
            uploaded_at: api.created_at,
            total_pages: api.total_pages,
            project_id: api.project_id,
            pages: api
                .pages
                .into_iter()
                .map(|page| page_from_api(page, document_id))
                .collect(),
            chat_session_id: api.chat_session_id,
        }
    }
}

/// Convert a page, stamping `document_id` onto its signatures
pub fn page_from_api(api: ApiPage, document_id: i64) -> Page {
    Page {
        id: api.id,
        page_number: api.page_number,
        html_content: api.generated_form_html,
        text_content: api.text_content,
        signatures: api
            .signatures
            .into_iter()
            .map(|sig| signature_from_api(sig, document_id))
            .collect(),
        document_id: api.document_id,
    }
}

pub fn signature_from_api(api: ApiSignature, document_id: i64) -> Signature {
    Signature {
        id: api.id,
        page_id: api.page_id,
        document_id,
        stakeholder_id: api.stakeholder_id,
        ai_signature_id: api.ai_signature_id,
        confidence: api.ai_confidence.as_deref().and_then(parse_confidence),
        coordinates: api.bounding_box_json.as_ref().and_then(parse_bounding_box),
        is_consistent_with_stakeholder_group: api.is_consistent_with_stakeholder_group,
        is_unique_among_stakeholders: api.is_unique_among_stakeholders,
        analysis_notes: api.analysis_notes,
    }
}

/// Parse the backend's string confidence
///
/// Reads the longest numeric prefix, so `"0.87"` and `"87%"` both parse.
/// Returns `None` when no finite number can be read.
pub fn parse_confidence(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    (1..=trimmed.len())
        .rev()
        .filter(|&end| trimmed.is_char_boundary(end))
        .find_map(|end| trimmed[..end].parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Read `{x, y, width, height}`; any other shape yields `None`
pub fn parse_bounding_box(value: &Value) -> Option<BoundingBox> {
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value.clone()).ok()
}

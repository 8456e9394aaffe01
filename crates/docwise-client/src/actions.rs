//! Outcome-returning facade over a `DocumentWiseApi`
//!
//! Every operation validates its input first, so a rejected value never
//! reaches the backend. Failures are logged here and converted into the
//! user-facing message of an [`Outcome`]; callers never see a `Result`.

use docwise_types::validation::{
    require_id, validate_chat_message, validate_pdf_upload, validate_proposal_name,
};
use docwise_types::{
    ChatHistory, Document, Proposal, SignatureAnalysisReportData, UploadFile, ValidationError,
};
use std::sync::Arc;
use tracing::{error, warn};

use crate::api::{ApiResult, DocumentWiseApi};
use crate::error::{reason_phrase, ClientError};
use crate::operation::Operation;
use crate::outcome::{ErrorKind, Outcome};

#[derive(Clone)]
pub struct Actions {
    api: Arc<dyn DocumentWiseApi>,
}

impl Actions {
    pub fn new(api: Arc<dyn DocumentWiseApi>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &Arc<dyn DocumentWiseApi> {
        &self.api
    }

    pub async fn list_proposals(&self) -> Outcome<Vec<Proposal>> {
        settle(Operation::ListProposals, self.api.list_proposals().await)
    }

    pub async fn get_proposal(&self, proposal_id: i64) -> Outcome<Proposal> {
        let op = Operation::GetProposal;
        match require_id("Proposal ID", proposal_id) {
            Ok(id) => settle(op, self.api.get_proposal(id).await),
            Err(e) => rejected(op, e),
        }
    }

    pub async fn create_proposal(&self, name: &str) -> Outcome<Proposal> {
        let op = Operation::CreateProposal;
        match validate_proposal_name(name) {
            Ok(name) => settle(op, self.api.create_proposal(&name).await),
            Err(e) => rejected(op, e),
        }
    }

    pub async fn delete_proposal(&self, proposal_id: i64) -> Outcome<()> {
        let op = Operation::DeleteProposal;
        match require_id("Proposal ID", proposal_id) {
            Ok(id) => settle(op, self.api.delete_proposal(id).await),
            Err(e) => rejected(op, e),
        }
    }

    pub async fn upload_document(&self, proposal_id: i64, file: UploadFile) -> Outcome<Document> {
        let op = Operation::UploadDocument;
        let checked = require_id("Proposal ID", proposal_id)
            .and_then(|id| validate_pdf_upload(&file).map(|()| id));
        match checked {
            Ok(id) => settle(op, self.api.upload_document(id, file).await),
            Err(e) => rejected(op, e),
        }
    }

    pub async fn start_signature_analysis(&self, proposal_id: i64) -> Outcome<String> {
        let op = Operation::StartSignatureAnalysis;
        match require_id("Proposal ID", proposal_id) {
            Ok(id) => settle(op, self.api.start_signature_analysis(id).await),
            Err(e) => rejected(op, e),
        }
    }

    pub async fn extract_html(
        &self,
        proposal_id: i64,
        document_id: i64,
        page_number: u32,
    ) -> Outcome<String> {
        let op = Operation::ExtractHtml;
        match page_address(proposal_id, document_id, page_number) {
            Ok(()) => settle(
                op,
                self.api
                    .extract_html(proposal_id, document_id, page_number)
                    .await,
            ),
            Err(e) => rejected(op, e),
        }
    }

    pub async fn page_html(
        &self,
        proposal_id: i64,
        document_id: i64,
        page_number: u32,
    ) -> Outcome<String> {
        let op = Operation::PageHtml;
        match page_address(proposal_id, document_id, page_number) {
            Ok(()) => settle(
                op,
                self.api.page_html(proposal_id, document_id, page_number).await,
            ),
            Err(e) => rejected(op, e),
        }
    }

    pub fn page_pdf_url(&self, proposal_id: i64, document_id: i64, page_number: u32) -> Outcome<String> {
        let op = Operation::PagePdfUrl;
        match page_address(proposal_id, document_id, page_number) {
            Ok(()) => settle(
                op,
                self.api.page_pdf_url(proposal_id, document_id, page_number),
            ),
            Err(e) => rejected(op, e),
        }
    }

    pub fn page_html_view_url(
        &self,
        proposal_id: i64,
        document_id: i64,
        page_number: u32,
    ) -> Outcome<String> {
        let op = Operation::PageHtmlViewUrl;
        match page_address(proposal_id, document_id, page_number) {
            Ok(()) => settle(
                op,
                self.api
                    .page_html_view_url(proposal_id, document_id, page_number),
            ),
            Err(e) => rejected(op, e),
        }
    }

    pub fn signature_image_url(&self, proposal_id: i64, signature_id: i64) -> Outcome<String> {
        let op = Operation::SignatureImageUrl;
        let checked = require_id("Proposal ID", proposal_id)
            .and_then(|_| require_id("Signature ID", signature_id));
        match checked {
            Ok(_) => settle(op, self.api.signature_image_url(proposal_id, signature_id)),
            Err(e) => rejected(op, e),
        }
    }

    pub async fn signature_analysis_report_html(&self, proposal_id: i64) -> Outcome<String> {
        let op = Operation::ReportHtml;
        match require_id("Proposal ID", proposal_id) {
            Ok(id) => settle(op, self.api.signature_analysis_report_html(id).await),
            Err(e) => rejected(op, e),
        }
    }

    pub async fn signature_analysis_report(
        &self,
        proposal_id: i64,
    ) -> Outcome<SignatureAnalysisReportData> {
        let op = Operation::ReportData;
        match require_id("Proposal ID", proposal_id) {
            Ok(id) => settle(op, self.api.signature_analysis_report(id).await),
            Err(e) => rejected(op, e),
        }
    }

    pub async fn chat_history(&self, session_id: &str) -> Outcome<ChatHistory> {
        let op = Operation::ChatHistory;
        match require_session(session_id) {
            Ok(session) => settle(op, self.api.chat_history(session).await),
            Err(e) => rejected(op, e),
        }
    }

    pub async fn send_chat_message(&self, session_id: &str, content: &str) -> Outcome<()> {
        let op = Operation::SendChatMessage;
        let checked = require_session(session_id)
            .and_then(|session| validate_chat_message(content).map(|text| (session, text)));
        match checked {
            Ok((session, text)) => settle(op, self.api.send_chat_message(session, text).await),
            Err(e) => rejected(op, e),
        }
    }
}

fn page_address(proposal_id: i64, document_id: i64, page_number: u32) -> Result<(), ValidationError> {
    require_id("Proposal ID", proposal_id)?;
    require_id("Document ID", document_id)?;
    require_id("Page number", i64::from(page_number))?;
    Ok(())
}

fn require_session(session_id: &str) -> Result<&str, ValidationError> {
    let trimmed = session_id.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingId("Session ID"))
    } else {
        Ok(trimmed)
    }
}

fn rejected<T>(op: Operation, err: ValidationError) -> Outcome<T> {
    warn!(operation = %op, error = %err, "Rejected before request");
    Outcome::failed(ErrorKind::Validation, err.to_string())
}

/// Log a failed result and turn it into an outcome
pub fn settle<T>(op: Operation, result: ApiResult<T>) -> Outcome<T> {
    match result {
        Ok(data) => Outcome::ok(data),
        Err(err) => {
            let message = describe(op, &err);
            error!(operation = %op, error = %err, "{message}");
            Outcome::failed(ErrorKind::of(&err), message)
        }
    }
}

/// User-facing message for a failed operation
pub fn describe(op: Operation, err: &ClientError) -> String {
    match err {
        ClientError::Validation(e) => e.to_string(),
        ClientError::NotFound(message) | ClientError::EmptyResponse(message) => message.clone(),
        ClientError::Http {
            detail: Some(detail),
            ..
        } if op.detail_stands_alone() => detail.clone(),
        ClientError::Http { status, detail } => format!(
            "{}: {}",
            op.failure_prefix(),
            detail.as_deref().unwrap_or_else(|| reason_phrase(*status))
        ),
        ClientError::Config(_) => err.to_string(),
        ClientError::Transport(_) | ClientError::Decode(_) => op.unexpected_message().to_string(),
    }
}

//! The `DocumentWiseApi` trait
//!
//! Implemented by [`crate::HttpApi`] against the real backend and by
//! [`crate::InMemoryApi`] for tests and demo mode. Views and the HTTP server
//! only ever hold an `Arc<dyn DocumentWiseApi>`.

use async_trait::async_trait;
use docwise_types::{ChatHistory, Document, Proposal, SignatureAnalysisReportData, UploadFile};

use crate::error::ClientError;

pub type ApiResult<T> = Result<T, ClientError>;

#[async_trait]
pub trait DocumentWiseApi: Send + Sync {
    async fn list_proposals(&self) -> ApiResult<Vec<Proposal>>;

    async fn get_proposal(&self, proposal_id: i64) -> ApiResult<Proposal>;

    async fn create_proposal(&self, name: &str) -> ApiResult<Proposal>;

    async fn delete_proposal(&self, proposal_id: i64) -> ApiResult<()>;

    /// Upload one PDF and return the document the backend created for it
    async fn upload_document(&self, proposal_id: i64, file: UploadFile) -> ApiResult<Document>;

    /// Returns the backend's acknowledgement message
    async fn start_signature_analysis(&self, proposal_id: i64) -> ApiResult<String>;

    /// Returns the backend's acknowledgement message
    async fn extract_html(
        &self,
        proposal_id: i64,
        document_id: i64,
        page_number: u32,
    ) -> ApiResult<String>;

    /// Generated HTML for a page, or a placeholder when there is none
    async fn page_html(
        &self,
        proposal_id: i64,
        document_id: i64,
        page_number: u32,
    ) -> ApiResult<String>;

    /// URL of the single-page PDF; no request is made
    fn page_pdf_url(
        &self,
        proposal_id: i64,
        document_id: i64,
        page_number: u32,
    ) -> ApiResult<String>;

    /// URL of the standalone HTML view, for iframes; no request is made
    fn page_html_view_url(
        &self,
        proposal_id: i64,
        document_id: i64,
        page_number: u32,
    ) -> ApiResult<String>;

    /// URL of a signature instance's cropped image; no request is made
    fn signature_image_url(&self, proposal_id: i64, signature_id: i64) -> ApiResult<String>;

    async fn signature_analysis_report_html(&self, proposal_id: i64) -> ApiResult<String>;

    async fn signature_analysis_report(
        &self,
        proposal_id: i64,
    ) -> ApiResult<SignatureAnalysisReportData>;

    async fn chat_history(&self, session_id: &str) -> ApiResult<ChatHistory>;

    async fn send_chat_message(&self, session_id: &str, content: &str) -> ApiResult<()>;
}

//! `DocumentWiseApi` over HTTP
//!
//! Every backend call goes through [`HttpApi::check`], which turns non-2xx
//! responses into [`ClientError`]s carrying the server's `detail`, and then
//! through the wire -> domain transform. Nothing is retried.

use async_trait::async_trait;
use docwise_types::validation::PDF_MIME_TYPE;
use docwise_types::wire::{
    ApiDocument, ApiProposal, ChatMessageRequest, ErrorBody, ExtractHtmlRequest,
    GeneratedHtmlResponse, MessageResponse, ProposalCreatePayload,
};
use docwise_types::{ChatHistory, Document, Proposal, SignatureAnalysisReportData, UploadFile};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::api::{ApiResult, DocumentWiseApi};
use crate::config::ApiConfig;
use crate::endpoints::Endpoints;
use crate::error::ClientError;
use crate::operation::Operation;

pub const PAGE_HTML_MISSING: &str = "<p>HTML content not available for this page.</p>";
pub const PAGE_HTML_EMPTY: &str = "<p>No HTML content available for this page.</p>";
pub const REPORT_HTML_EMPTY: &str = "<p>Report content is not available.</p>";
pub const ANALYSIS_STARTED: &str = "Signature analysis started.";
pub const EXTRACTION_STARTED: &str = "HTML extraction process started.";
pub const NO_DOCUMENT_RETURNED: &str = "No document data returned from API.";

/// Multipart field the backend reads uploaded files from
const UPLOAD_FIELD: &str = "files";

pub struct HttpApi {
    client: Client,
    endpoints: Endpoints,
}

impl HttpApi {
    /// Build a client from explicit configuration
    ///
    /// Missing base URLs are not an error here; each affected call fails with
    /// [`ClientError::Config`] instead.
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        let endpoints = Endpoints::new(config);

        match (endpoints.api_base(), endpoints.chat_base()) {
            (Some(api), Some(chat)) => {
                info!(api_base_url = %api, chat_api_base_url = %chat, "DocumentWise API client configured");
            }
            (api, chat) => {
                warn!(
                    api_base_url = ?api,
                    chat_api_base_url = ?chat,
                    missing = ?config.missing(),
                    "DocumentWise API client is missing base URLs"
                );
            }
        }

        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Pass 2xx responses through; map everything else to an error
    async fn check(response: Response, op: Operation) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            if let Some(message) = op.not_found_message() {
                return Err(ClientError::NotFound(message.to_string()));
            }
        }

        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message());
        Err(ClientError::Http {
            status: status.as_u16(),
            detail,
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, op: Operation) -> ApiResult<T> {
        debug!(operation = %op, url = %url, "GET");
        let response = self.client.get(url).send().await?;
        Self::read_json(Self::check(response, op).await?).await
    }
}

#[async_trait]
impl DocumentWiseApi for HttpApi {
    async fn list_proposals(&self) -> ApiResult<Vec<Proposal>> {
        let url = self.endpoints.proposals()?;
        let proposals: Vec<ApiProposal> = self.get_json(url, Operation::ListProposals).await?;
        Ok(proposals.into_iter().map(Proposal::from).collect())
    }

    async fn get_proposal(&self, proposal_id: i64) -> ApiResult<Proposal> {
        let url = self.endpoints.proposal(proposal_id)?;
        let proposal: ApiProposal = self.get_json(url, Operation::GetProposal).await?;
        Ok(proposal.into())
    }

    async fn create_proposal(&self, name: &str) -> ApiResult<Proposal> {
        let url = self.endpoints.proposals()?;
        let payload = ProposalCreatePayload {
            name: name.to_string(),
            chat_session_id: None,
        };

        debug!(url = %url, name = %name, "Creating proposal");
        let response = self.client.post(url).json(&payload).send().await?;
        let created: ApiProposal =
            Self::read_json(Self::check(response, Operation::CreateProposal).await?).await?;

        info!(proposal_id = created.id, "Proposal created");
        Ok(created.into())
    }

    async fn delete_proposal(&self, proposal_id: i64) -> ApiResult<()> {
        let url = self.endpoints.proposal(proposal_id)?;
        debug!(url = %url, "Deleting proposal");
        let response = self.client.delete(url).send().await?;
        Self::check(response, Operation::DeleteProposal).await?;

        info!(proposal_id, "Proposal deleted");
        Ok(())
    }

    async fn upload_document(&self, proposal_id: i64, file: UploadFile) -> ApiResult<Document> {
        let url = self.endpoints.documents(proposal_id)?;
        let mime = file
            .content_type
            .clone()
            .unwrap_or_else(|| PDF_MIME_TYPE.to_string());
        let size = file.bytes.len();

        let part = Part::bytes(file.bytes)
            .file_name(file.file_name.clone())
            .mime_str(&mime)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        debug!(url = %url, file_name = %file.file_name, size, "Uploading document");
        let response = self.client.post(url).multipart(form).send().await?;
        let documents: Vec<ApiDocument> =
            Self::read_json(Self::check(response, Operation::UploadDocument).await?).await?;

        let document = documents
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::EmptyResponse(NO_DOCUMENT_RETURNED.to_string()))?;

        info!(proposal_id, document_id = document.id, "Document uploaded");
        Ok(document.into())
    }

    async fn start_signature_analysis(&self, proposal_id: i64) -> ApiResult<String> {
        let url = self.endpoints.start_signature_analysis(proposal_id)?;
        debug!(url = %url, "Starting signature analysis");
        let response = self.client.post(url).send().await?;
        let response = Self::check(response, Operation::StartSignatureAnalysis).await?;

        // The acknowledgement body is optional
        let ack = response.json::<MessageResponse>().await.unwrap_or_default();
        info!(proposal_id, "Signature analysis started");
        Ok(ack.message.unwrap_or_else(|| ANALYSIS_STARTED.to_string()))
    }

    async fn extract_html(
        &self,
        proposal_id: i64,
        document_id: i64,
        page_number: u32,
    ) -> ApiResult<String> {
        let url = self.endpoints.extract_html(proposal_id, document_id)?;
        debug!(url = %url, page_number, "Triggering HTML extraction");
        let response = self
            .client
            .post(url)
            .json(&ExtractHtmlRequest { page_number })
            .send()
            .await?;
        let response = Self::check(response, Operation::ExtractHtml).await?;

        let ack = response.json::<MessageResponse>().await.unwrap_or_default();
        Ok(ack.message.unwrap_or_else(|| EXTRACTION_STARTED.to_string()))
    }

    async fn page_html(
        &self,
        proposal_id: i64,
        document_id: i64,
        page_number: u32,
    ) -> ApiResult<String> {
        let url = self
            .endpoints
            .page(proposal_id, document_id, page_number, "html")?;
        debug!(url = %url, "GET");
        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(PAGE_HTML_MISSING.to_string());
        }

        let body: GeneratedHtmlResponse =
            Self::read_json(Self::check(response, Operation::PageHtml).await?).await?;
        Ok(body
            .html_content
            .filter(|html| !html.trim().is_empty())
            .unwrap_or_else(|| PAGE_HTML_EMPTY.to_string()))
    }

    fn page_pdf_url(
        &self,
        proposal_id: i64,
        document_id: i64,
        page_number: u32,
    ) -> ApiResult<String> {
        self.endpoints
            .page(proposal_id, document_id, page_number, "pdf")
            .map(String::from)
    }

    fn page_html_view_url(
        &self,
        proposal_id: i64,
        document_id: i64,
        page_number: u32,
    ) -> ApiResult<String> {
        self.endpoints
            .page(proposal_id, document_id, page_number, "html_view")
            .map(String::from)
    }

    fn signature_image_url(&self, proposal_id: i64, signature_id: i64) -> ApiResult<String> {
        self.endpoints
            .signature_image(proposal_id, signature_id)
            .map(String::from)
    }

    async fn signature_analysis_report_html(&self, proposal_id: i64) -> ApiResult<String> {
        let url = self.endpoints.signature_analysis_report(proposal_id)?;
        debug!(url = %url, "GET report html");
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "text/html")
            .send()
            .await?;
        let response = Self::check(response, Operation::ReportHtml).await?;

        let html = response
            .text()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        if html.trim().is_empty() {
            Ok(REPORT_HTML_EMPTY.to_string())
        } else {
            Ok(html)
        }
    }

    async fn signature_analysis_report(
        &self,
        proposal_id: i64,
    ) -> ApiResult<SignatureAnalysisReportData> {
        let url = self.endpoints.signature_analysis_report(proposal_id)?;
        debug!(url = %url, "GET report data");
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let response = Self::check(response, Operation::ReportData).await?;

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map_or(true, |v| v.contains("json"));
        if !is_json {
            return Err(ClientError::Decode(
                "Report is only available as HTML.".to_string(),
            ));
        }
        Self::read_json(response).await
    }

    async fn chat_history(&self, session_id: &str) -> ApiResult<ChatHistory> {
        let url = self.endpoints.chat(session_id, "history")?;
        self.get_json(url, Operation::ChatHistory).await
    }

    async fn send_chat_message(&self, session_id: &str, content: &str) -> ApiResult<()> {
        let url = self.endpoints.chat(session_id, "message")?;
        debug!(url = %url, session_id = %session_id, "Sending chat message");
        let response = self
            .client
            .post(url)
            .json(&ChatMessageRequest {
                message: content.to_string(),
            })
            .send()
            .await?;
        Self::check(response, Operation::SendChatMessage).await?;
        Ok(())
    }
}

//! HTTP handlers for the DocumentWise server
//!
//! Each handler delegates to [`docwise_client::Actions`], which validates
//! input and turns backend failures into user-facing messages. Path and body
//! extractors are taken as `Result`s so a malformed request still gets an
//! `{error}` body.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::multipart::MultipartRejection,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use docwise_client::Outcome;
use docwise_types::wire::ChatMessageRequest;
use docwise_types::UploadFile;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{reply, reply_with, ApiError};
use crate::state::AppState;

/// Multipart fields accepted for an uploaded file
const UPLOAD_FIELDS: [&str; 2] = ["file", "files"];

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub mode: &'static str,
}

/// Handler: GET /health
pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "docwise-api",
        version: env!("CARGO_PKG_VERSION"),
        mode: state.mode.as_str(),
    })
}

#[derive(Debug, Deserialize)]
pub struct CreateProposalRequest {
    pub name: String,
}

type PagePath = Result<Path<(i64, i64, u32)>, PathRejection>;
type ProposalPath = Result<Path<i64>, PathRejection>;

/// URLs needed to display one page side by side
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageAssets {
    pub pdf_url: String,
    pub html_view_url: String,
}

/// Handler: GET /api/proposals
pub async fn handle_list_proposals(State(state): State<AppState>) -> Response {
    reply(state.actions.list_proposals().await)
}

/// Handler: POST /api/proposals
pub async fn handle_create_proposal(
    State(state): State<AppState>,
    payload: Result<Json<CreateProposalRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;
    info!(name = %req.name, "Create proposal requested");
    Ok(reply_with(
        StatusCode::CREATED,
        state.actions.create_proposal(&req.name).await,
    ))
}

/// Handler: GET /api/proposals/:id
pub async fn handle_get_proposal(
    State(state): State<AppState>,
    path: ProposalPath,
) -> Result<Response, ApiError> {
    let Path(proposal_id) = path?;
    Ok(reply(state.actions.get_proposal(proposal_id).await))
}

/// Handler: DELETE /api/proposals/:id
pub async fn handle_delete_proposal(
    State(state): State<AppState>,
    path: ProposalPath,
) -> Result<Response, ApiError> {
    let Path(proposal_id) = path?;
    Ok(reply(state.actions.delete_proposal(proposal_id).await))
}

/// Handler: POST /api/proposals/:id/documents
pub async fn handle_upload_document(
    State(state): State<AppState>,
    path: ProposalPath,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let Path(proposal_id) = path?;
    let mut multipart = multipart?;
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        let is_file = field
            .name()
            .is_some_and(|name| UPLOAD_FIELDS.contains(&name));
        if !is_file {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload.pdf").to_string();
        let content_type = field.content_type().map(String::from);
        let bytes = field.bytes().await?;
        debug!(file_name = %file_name, size = bytes.len(), "Received upload");
        upload = Some(UploadFile::new(file_name, content_type, bytes.to_vec()));
        break;
    }

    let file = upload.ok_or_else(|| ApiError::BadRequest("File is required.".to_string()))?;
    Ok(reply_with(
        StatusCode::CREATED,
        state.actions.upload_document(proposal_id, file).await,
    ))
}

/// Handler: POST /api/proposals/:id/signature-analysis/start
pub async fn handle_start_analysis(
    State(state): State<AppState>,
    path: ProposalPath,
) -> Result<Response, ApiError> {
    let Path(proposal_id) = path?;
    Ok(reply_with(
        StatusCode::ACCEPTED,
        state.actions.start_signature_analysis(proposal_id).await,
    ))
}

/// Handler: GET /api/proposals/:id/signature-analysis/report
///
/// Answers with the report as `text/html`; failures still use the JSON
/// outcome body.
pub async fn handle_report_html(
    State(state): State<AppState>,
    path: ProposalPath,
) -> Result<Response, ApiError> {
    let Path(proposal_id) = path?;
    let outcome = state.actions.signature_analysis_report_html(proposal_id).await;
    if !outcome.is_ok() {
        return Ok(reply(outcome));
    }
    let html = outcome.data.unwrap_or_default();
    Ok(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html).into_response())
}

/// Handler: GET /api/proposals/:id/signature-analysis/report-data
pub async fn handle_report_data(
    State(state): State<AppState>,
    path: ProposalPath,
) -> Result<Response, ApiError> {
    let Path(proposal_id) = path?;
    Ok(reply(state.actions.signature_analysis_report(proposal_id).await))
}

/// Handler: POST /api/proposals/:pid/documents/:did/pages/:n/extract-html
pub async fn handle_extract_html(
    State(state): State<AppState>,
    path: PagePath,
) -> Result<Response, ApiError> {
    let Path((proposal_id, document_id, page_number)) = path?;
    Ok(reply_with(
        StatusCode::ACCEPTED,
        state
            .actions
            .extract_html(proposal_id, document_id, page_number)
            .await,
    ))
}

/// Handler: GET /api/proposals/:pid/documents/:did/pages/:n/html
pub async fn handle_page_html(
    State(state): State<AppState>,
    path: PagePath,
) -> Result<Response, ApiError> {
    let Path((proposal_id, document_id, page_number)) = path?;
    Ok(reply(
        state
            .actions
            .page_html(proposal_id, document_id, page_number)
            .await,
    ))
}

/// Handler: GET /api/proposals/:pid/documents/:did/pages/:n/assets
pub async fn handle_page_assets(
    State(state): State<AppState>,
    path: PagePath,
) -> Result<Response, ApiError> {
    let Path((proposal_id, document_id, page_number)) = path?;
    let pdf = state
        .actions
        .page_pdf_url(proposal_id, document_id, page_number);
    let html_view = state
        .actions
        .page_html_view_url(proposal_id, document_id, page_number);

    let outcome = match (split(pdf), split(html_view)) {
        (Ok(pdf_url), Ok(html_view_url)) => Outcome::ok(PageAssets {
            pdf_url,
            html_view_url,
        }),
        (Err(failed), _) | (_, Err(failed)) => failed,
    };
    Ok(reply(outcome))
}

/// Handler: GET /api/proposals/:pid/signatures/:sid/image-url
pub async fn handle_signature_image_url(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path((proposal_id, signature_id)) = path?;
    Ok(reply(state.actions.signature_image_url(proposal_id, signature_id)))
}

/// Handler: GET /api/chat/:session/history
pub async fn handle_chat_history(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(session_id) = path?;
    Ok(reply(state.actions.chat_history(&session_id).await))
}

/// Handler: POST /api/chat/:session/message
pub async fn handle_send_chat_message(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<ChatMessageRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Path(session_id) = path?;
    let Json(req) = payload?;
    Ok(reply(
        state
            .actions
            .send_chat_message(&session_id, &req.message)
            .await,
    ))
}

/// Separate a successful value from a failure that can be re-typed
fn split<T, U>(outcome: Outcome<T>) -> Result<T, Outcome<U>> {
    let kind = outcome.kind;
    match (outcome.data, outcome.error) {
        (Some(data), None) => Ok(data),
        (_, error) => Err(Outcome {
            data: None,
            error: Some(error.unwrap_or_else(|| "No data returned.".to_string())),
            kind,
        }),
    }
}

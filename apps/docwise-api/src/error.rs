//! Error responses for the DocumentWise server
//!
//! Every JSON route answers with an [`Outcome`] body. The HTTP status is
//! derived from the outcome's [`ErrorKind`].

use axum::{
    extract::multipart::MultipartError,
    extract::rejection::{JsonRejection, PathRejection},
    extract::multipart::MultipartRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use docwise_client::{ErrorKind, Outcome};
use serde::Serialize;
use thiserror::Error;

/// Failures raised by the server itself, before an action runs
///
/// Extractor rejections keep their own 4xx status but answer with the same
/// `{error}` body as every other route.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid upload: {}", .0.body_text())]
    Multipart(#[from] MultipartError),

    #[error("Invalid upload: {}", .0.body_text())]
    MultipartRequest(#[from] MultipartRejection),

    #[error("{}", .0.body_text())]
    Json(#[from] JsonRejection),

    #[error("{}", .0.body_text())]
    Path(#[from] PathRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Multipart(e) => e.status(),
            ApiError::MultipartRequest(e) => e.status(),
            ApiError::Json(e) => e.status(),
            ApiError::Path(e) => e.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(error = %self, %status, "Rejected request");
        let body = Outcome::<()>::failed(ErrorKind::Validation, self.to_string());
        (status, Json(body)).into_response()
    }
}

pub fn status_for(kind: Option<ErrorKind>) -> StatusCode {
    match kind {
        Some(ErrorKind::Validation) => StatusCode::BAD_REQUEST,
        Some(ErrorKind::NotFound) => StatusCode::NOT_FOUND,
        Some(ErrorKind::Upstream) => StatusCode::BAD_GATEWAY,
        Some(ErrorKind::Config) | None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Serialize an outcome with a status matching its error class
pub fn reply<T: Serialize>(outcome: Outcome<T>) -> Response {
    reply_with(StatusCode::OK, outcome)
}

/// Like [`reply`], with a custom success status
pub fn reply_with<T: Serialize>(success: StatusCode, outcome: Outcome<T>) -> Response {
    let status = if outcome.is_ok() {
        success
    } else {
        status_for(outcome.kind)
    };
    (status, Json(outcome)).into_response()
}

//! Error types for the DocumentWise client

use docwise_types::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing or malformed base URL
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request never produced a response
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response, with the server's `detail` when it sent one
    #[error("HTTP {status}: {}", http_message(.status, .detail))]
    Http { status: u16, detail: Option<String> },

    #[error("{0}")]
    NotFound(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("{0}")]
    EmptyResponse(String),
}

impl ClientError {
    /// HTTP status for errors that came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::NotFound(_) => Some(404),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

fn http_message(status: &u16, detail: &Option<String>) -> String {
    detail
        .clone()
        .unwrap_or_else(|| reason_phrase(*status).to_string())
}

/// Canonical reason phrase, e.g. `500` -> `"Internal Server Error"`
pub fn reason_phrase(status: u16) -> &'static str {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown Status")
}

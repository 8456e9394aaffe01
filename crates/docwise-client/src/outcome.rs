//! Uniform `{data, error}` result handed to views and HTTP callers

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Broad class of a failure, used to pick an HTTP status at the server edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any request was made
    Validation,
    NotFound,
    /// The backend answered with an error, or could not be reached
    Upstream,
    Config,
}

impl ErrorKind {
    pub fn of(err: &ClientError) -> Self {
        match err {
            ClientError::Validation(_) => ErrorKind::Validation,
            ClientError::Config(_) => ErrorKind::Config,
            e if e.is_not_found() => ErrorKind::NotFound,
            _ => ErrorKind::Upstream,
        }
    }
}

/// Either a value or a user-facing error message, never both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub kind: Option<ErrorKind>,
}

impl<T> Outcome<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            kind: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
            kind: None,
        }
    }

    pub fn failed(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            ..Self::err(message)
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Convert into a `Result`; missing data without an error is a failure
    pub fn into_result(self) -> Result<T, String> {
        match (self.data, self.error) {
            (_, Some(error)) => Err(error),
            (Some(data), None) => Ok(data),
            (None, None) => Err("No data returned.".to_string()),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        Outcome {
            data: self.data.map(f),
            error: self.error,
            kind: self.kind,
        }
    }
}

//! URL construction for the proposals and chat APIs
//!
//! Path segments are percent-encoded by [`Url::path_segments_mut`], so chat
//! session ids are safe to embed verbatim.

use reqwest::Url;

use crate::config::{ApiConfig, API_BASE_URL_ENV, CHAT_API_BASE_URL_ENV};
use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct Endpoints {
    api_base: Option<String>,
    chat_base: Option<String>,
}

impl Endpoints {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            api_base: normalize(config.api_base_url.as_deref()),
            chat_base: normalize(config.chat_api_base_url.as_deref()),
        }
    }

    pub fn api_base(&self) -> Option<&str> {
        self.api_base.as_deref()
    }

    pub fn chat_base(&self) -> Option<&str> {
        self.chat_base.as_deref()
    }

    /// `{api}/proposals/`
    pub fn proposals(&self) -> Result<Url, ClientError> {
        self.api(&["proposals"], true)
    }

    /// `{api}/proposals/{id}/`
    pub fn proposal(&self, id: i64) -> Result<Url, ClientError> {
        self.api(&["proposals", &id.to_string()], true)
    }

    /// `{api}/proposals/{id}/documents/`
    pub fn documents(&self, proposal_id: i64) -> Result<Url, ClientError> {
        self.api(&["proposals", &proposal_id.to_string(), "documents"], true)
    }

    /// `{api}/proposals/{id}/signature-analysis/start`
    pub fn start_signature_analysis(&self, proposal_id: i64) -> Result<Url, ClientError> {
        self.api(
            &["proposals", &proposal_id.to_string(), "signature-analysis", "start"],
            false,
        )
    }

    /// `{api}/proposals/{id}/signature-analysis/report`
    pub fn signature_analysis_report(&self, proposal_id: i64) -> Result<Url, ClientError> {
        self.api(
            &["proposals", &proposal_id.to_string(), "signature-analysis", "report"],
            false,
        )
    }

    /// `{api}/proposals/{pid}/documents/{did}/extract-html`
    pub fn extract_html(&self, proposal_id: i64, document_id: i64) -> Result<Url, ClientError> {
        self.api(
            &[
                "proposals",
                &proposal_id.to_string(),
                "documents",
                &document_id.to_string(),
                "extract-html",
            ],
            false,
        )
    }

    /// `{api}/proposals/{pid}/documents/{did}/pages/{n}/{leaf}`
    pub fn page(
        &self,
        proposal_id: i64,
        document_id: i64,
        page_number: u32,
        leaf: &str,
    ) -> Result<Url, ClientError> {
        self.api(
            &[
                "proposals",
                &proposal_id.to_string(),
                "documents",
                &document_id.to_string(),
                "pages",
                &page_number.to_string(),
                leaf,
            ],
            false,
        )
    }

    /// `{api}/proposals/{pid}/signatures/{sid}/image`
    pub fn signature_image(&self, proposal_id: i64, signature_id: i64) -> Result<Url, ClientError> {
        self.api(
            &[
                "proposals",
                &proposal_id.to_string(),
                "signatures",
                &signature_id.to_string(),
                "image",
            ],
            false,
        )
    }

    /// `{chat}/chat/{session}/{leaf}`
    pub fn chat(&self, session_id: &str, leaf: &str) -> Result<Url, ClientError> {
        let base = self
            .chat_base
            .as_deref()
            .ok_or_else(|| missing(CHAT_API_BASE_URL_ENV))?;
        build(base, &["chat", session_id, leaf], false)
    }

    fn api(&self, segments: &[&str], trailing_slash: bool) -> Result<Url, ClientError> {
        let base = self
            .api_base
            .as_deref()
            .ok_or_else(|| missing(API_BASE_URL_ENV))?;
        build(base, segments, trailing_slash)
    }
}

fn normalize(base: Option<&str>) -> Option<String> {
    base.map(|b| b.trim().trim_end_matches('/').to_string())
        .filter(|b| !b.is_empty())
}

fn missing(var: &str) -> ClientError {
    ClientError::Config(format!("{var} is not configured."))
}

fn build(base: &str, segments: &[&str], trailing_slash: bool) -> Result<Url, ClientError> {
    let mut url = Url::parse(base)
        .map_err(|e| ClientError::Config(format!("Invalid base URL {base:?}: {e}")))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| ClientError::Config(format!("Base URL cannot carry a path: {base}")))?;
        path.pop_if_empty().extend(segments);
        if trailing_slash {
            path.push("");
        }
    }
    Ok(url)
}

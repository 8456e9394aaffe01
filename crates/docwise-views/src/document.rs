//! Page-by-page document viewer
//!
//! Shows the PDF page next to its generated HTML. The HTML is available both
//! inline ([`DocumentViewer::html`]) and as a URL for an iframe
//! ([`DocumentViewer::html_view_url`]).

use docwise_client::Actions;
use docwise_types::{Document, Proposal};
use tracing::{debug, warn};

use crate::state::{pause, LoadState, Timing, Toast, Toasts};

pub const DOCUMENT_NOT_FOUND: &str = "Document not found in the proposal.";

pub struct DocumentViewer {
    actions: Actions,
    timing: Timing,
    proposal_id: i64,
    document_id: i64,
    pub proposal: LoadState<Proposal>,
    pub sidebar: Vec<Proposal>,
    current_page: u32,
    html: Option<String>,
    html_error: Option<String>,
    pdf_url: Option<String>,
    html_view_url: Option<String>,
    pub toasts: Toasts,
}

impl DocumentViewer {
    pub fn new(actions: Actions, timing: Timing, proposal_id: i64, document_id: i64) -> Self {
        Self {
            actions,
            timing,
            proposal_id,
            document_id,
            proposal: LoadState::Loading,
            sidebar: Vec::new(),
            current_page: 1,
            html: None,
            html_error: None,
            pdf_url: None,
            html_view_url: None,
            toasts: Toasts::default(),
        }
    }

    pub async fn load(&mut self) {
        self.proposal = LoadState::Loading;
        let (proposal, sidebar) = tokio::join!(
            self.actions.get_proposal(self.proposal_id),
            self.actions.list_proposals()
        );

        match sidebar.into_result() {
            Ok(list) => self.sidebar = list,
            Err(message) => warn!(error = %message, "Sidebar proposals unavailable"),
        }

        let proposal = match proposal.into_result() {
            Ok(proposal) => proposal,
            Err(message) => {
                self.proposal = LoadState::Failed(message);
                return;
            }
        };
        if proposal.document(self.document_id).is_none() {
            self.proposal = LoadState::Failed(DOCUMENT_NOT_FOUND.to_string());
            return;
        }

        self.proposal = LoadState::Ready(proposal);
        self.current_page = 1;
        self.load_page().await;
    }

    pub fn document(&self) -> Option<&Document> {
        self.proposal.ready()?.document(self.document_id)
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.document().map_or(0, |d| d.total_pages)
    }

    /// Most recently loaded HTML for the current page
    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    /// Error from the last HTML fetch, if it failed
    pub fn html_error(&self) -> Option<&str> {
        self.html_error.as_deref()
    }

    pub fn pdf_url(&self) -> Option<&str> {
        self.pdf_url.as_deref()
    }

    pub fn html_view_url(&self) -> Option<&str> {
        self.html_view_url.as_deref()
    }

    /// Move to `page_number`; pages outside `1..=total_pages` are ignored
    pub async fn go_to_page(&mut self, page_number: u32) -> bool {
        let in_range = self
            .document()
            .is_some_and(|d| d.contains_page(page_number));
        if !in_range {
            debug!(page_number, total_pages = self.total_pages(), "Ignoring out-of-range page");
            return false;
        }
        if page_number == self.current_page {
            return true;
        }

        self.current_page = page_number;
        self.load_page().await;
        true
    }

    pub async fn next_page(&mut self) -> bool {
        self.go_to_page(self.current_page.saturating_add(1)).await
    }

    pub async fn previous_page(&mut self) -> bool {
        self.go_to_page(self.current_page.saturating_sub(1)).await
    }

    /// Ask the backend to regenerate HTML for the current page, then re-fetch
    /// it after the configured delay
    pub async fn extract_html(&mut self) -> bool {
        let outcome = self
            .actions
            .extract_html(self.proposal_id, self.document_id, self.current_page)
            .await;
        match outcome.into_result() {
            Ok(message) => {
                self.toasts.push(Toast::info("HTML Extraction Started", message));
                pause(self.timing.extraction_refresh_delay).await;
                self.fetch_html().await;
                true
            }
            Err(message) => {
                self.toasts.push(Toast::error("Extraction Failed", message));
                false
            }
        }
    }

    async fn load_page(&mut self) {
        let page = self.current_page;
        self.pdf_url = self
            .actions
            .page_pdf_url(self.proposal_id, self.document_id, page)
            .data;
        self.html_view_url = self
            .actions
            .page_html_view_url(self.proposal_id, self.document_id, page)
            .data;
        self.fetch_html().await;
    }

    /// A failed fetch keeps whatever HTML was already shown
    async fn fetch_html(&mut self) {
        let outcome = self
            .actions
            .page_html(self.proposal_id, self.document_id, self.current_page)
            .await;
        match outcome.into_result() {
            Ok(html) => {
                self.html = Some(html);
                self.html_error = None;
            }
            Err(message) => self.html_error = Some(message),
        }
    }
}

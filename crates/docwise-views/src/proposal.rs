//! Proposal detail page: documents, upload and signature analysis

use docwise_client::{Actions, ErrorKind};
use docwise_types::{AnalysisStatus, Proposal, UploadFile};
use tracing::{info, warn};

use crate::state::{pause, LoadState, Timing, Toast, Toasts};

pub struct ProposalDetailView {
    actions: Actions,
    timing: Timing,
    proposal_id: i64,
    pub proposal: LoadState<Proposal>,
    /// Other proposals, for navigation; stays empty if its fetch fails
    pub sidebar: Vec<Proposal>,
    pub toasts: Toasts,
}

impl ProposalDetailView {
    pub fn new(actions: Actions, timing: Timing, proposal_id: i64) -> Self {
        Self {
            actions,
            timing,
            proposal_id,
            proposal: LoadState::Loading,
            sidebar: Vec::new(),
            toasts: Toasts::default(),
        }
    }

    pub fn proposal_id(&self) -> i64 {
        self.proposal_id
    }

    /// Fetch the proposal and the sidebar list concurrently
    pub async fn load(&mut self) {
        self.proposal = LoadState::Loading;
        let (proposal, sidebar) = tokio::join!(
            self.actions.get_proposal(self.proposal_id),
            self.actions.list_proposals()
        );

        self.proposal = match proposal.into_result() {
            Ok(proposal) => LoadState::Ready(proposal),
            Err(message) => LoadState::Failed(message),
        };
        match sidebar.into_result() {
            Ok(list) => self.sidebar = list,
            Err(message) => warn!(error = %message, "Sidebar proposals unavailable"),
        }
    }

    /// Re-fetch only the proposal; failures become toasts and the last
    /// loaded state is kept
    pub async fn refresh(&mut self) {
        match self.actions.get_proposal(self.proposal_id).await.into_result() {
            Ok(proposal) => self.proposal = LoadState::Ready(proposal),
            Err(message) => self
                .toasts
                .push(Toast::error("Error Refreshing Proposal", message)),
        }
    }

    pub async fn upload_document(&mut self, file: UploadFile) -> bool {
        let file_name = file.file_name.clone();
        let outcome = self.actions.upload_document(self.proposal_id, file).await;

        if outcome.is_ok() {
            info!(proposal_id = self.proposal_id, file_name = %file_name, "Document added");
            self.toasts.push(Toast::info(
                "Document Uploaded",
                format!("\"{file_name}\" has been added to the proposal."),
            ));
            self.refresh().await;
            return true;
        }

        let title = match outcome.kind {
            Some(ErrorKind::Validation) => "Invalid File",
            _ => "Upload Failed",
        };
        self.toasts
            .push(Toast::error(title, outcome.error.unwrap_or_default()));
        false
    }

    /// Trigger analysis, then refresh after the configured delay
    pub async fn start_analysis(&mut self) -> bool {
        let outcome = self.actions.start_signature_analysis(self.proposal_id).await;
        match outcome.into_result() {
            Ok(message) => {
                self.toasts
                    .push(Toast::info("Signature Analysis Started", message));
                pause(self.timing.refresh_delay).await;
                self.refresh().await;
                true
            }
            Err(message) => {
                self.toasts
                    .push(Toast::error("Error Starting Analysis", message));
                false
            }
        }
    }

    pub fn status(&self) -> AnalysisStatus {
        self.proposal
            .ready()
            .and_then(|p| p.signature_analysis_status.clone())
            .unwrap_or(AnalysisStatus::NotStarted)
    }

    /// Label for the analysis status badge
    pub fn status_badge(&self) -> String {
        self.status().label().to_string()
    }

    /// A report can be viewed once analysis has completed
    pub fn can_view_report(&self) -> bool {
        self.status() == AnalysisStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ToastVariant;
    use docwise_client::{InMemoryApi, Operation};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn view(proposal_id: i64) -> (Arc<InMemoryApi>, ProposalDetailView) {
        let api = Arc::new(InMemoryApi::demo());
        let view = ProposalDetailView::new(Actions::new(api.clone()), Timing::immediate(), proposal_id);
        (api, view)
    }

    #[tokio::test]
    async fn load_fetches_proposal_and_sidebar() {
        let (_, mut view) = view(1);
        view.load().await;

        let proposal = view.proposal.ready().unwrap();
        assert_eq!(proposal.name, "Quarterly Business Review Documents");
        assert_eq!(view.sidebar.len(), 3);
        assert_eq!(view.status_badge(), "Not Started");
    }

    #[tokio::test]
    async fn sidebar_failure_is_not_fatal() {
        let (api, mut view) = view(1);
        api.fail_with(Operation::ListProposals, 500, None);
        view.load().await;

        assert!(view.proposal.ready().is_some());
        assert!(view.sidebar.is_empty());
        assert!(view.toasts.pending().is_empty());
    }

    #[tokio::test]
    async fn missing_proposal_fails_load() {
        let (_, mut view) = view(404);
        view.load().await;
        assert_eq!(view.proposal.error(), Some("Proposal not found."));
    }

    #[tokio::test]
    async fn refresh_failure_keeps_state_and_toasts() {
        let (api, mut view) = view(1);
        view.load().await;
        api.fail_with(Operation::GetProposal, 500, Some("db down"));

        view.refresh().await;
        assert!(view.proposal.ready().is_some());
        let toasts = view.toasts.take();
        assert_eq!(toasts[0].description, "Failed to fetch proposal: db down");
    }

    #[tokio::test]
    async fn non_pdf_upload_is_rejected_client_side() {
        let (api, mut view) = view(1);
        let file = UploadFile::new("photo.png", Some("image/png".into()), vec![1, 2, 3]);

        assert!(!view.upload_document(file).await);
        assert_eq!(api.call_count(), 0);
        let toast = &view.toasts.pending()[0];
        assert_eq!(toast.title, "Invalid File");
        assert_eq!(toast.variant, ToastVariant::Destructive);
    }

    #[tokio::test]
    async fn upload_refreshes_documents() {
        let (_, mut view) = view(3);
        view.load().await;
        assert!(view.proposal.ready().unwrap().documents.is_empty());

        assert!(view
            .upload_document(UploadFile::pdf("deck.pdf", b"%PDF-1.7".to_vec()))
            .await);
        assert_eq!(view.proposal.ready().unwrap().documents.len(), 1);
    }

    #[tokio::test]
    async fn analysis_refreshes_status() {
        let (_, mut view) = view(1);
        view.load().await;
        assert!(!view.can_view_report());

        assert!(view.start_analysis().await);
        assert_eq!(view.status_badge(), "Completed");
        assert!(view.can_view_report());
        assert_eq!(view.toasts.take()[0].title, "Signature Analysis Started");
    }

    #[tokio::test]
    async fn analysis_failure_is_toasted() {
        let (_, mut view) = view(3);
        view.load().await;
        assert!(!view.start_analysis().await);
        assert_eq!(view.toasts.take()[0].variant, ToastVariant::Destructive);
    }
}

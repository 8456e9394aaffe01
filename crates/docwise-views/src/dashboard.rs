//! Proposal list with create and delete

use docwise_client::Actions;
use docwise_types::Proposal;
use tracing::info;

use crate::state::{LoadState, Toast, Toasts};

pub struct DashboardView {
    actions: Actions,
    pub proposals: LoadState<Vec<Proposal>>,
    pub toasts: Toasts,
}

impl DashboardView {
    pub fn new(actions: Actions) -> Self {
        Self {
            actions,
            proposals: LoadState::Loading,
            toasts: Toasts::default(),
        }
    }

    pub async fn load(&mut self) {
        self.proposals = LoadState::Loading;
        let outcome = self.actions.list_proposals().await;
        self.proposals = match outcome.into_result() {
            Ok(proposals) => LoadState::Ready(proposals),
            Err(message) => LoadState::Failed(message),
        };
    }

    /// Create a proposal and reload the list; returns the new proposal
    ///
    /// Names shorter than three characters are rejected without a request.
    pub async fn create_proposal(&mut self, name: &str) -> Option<Proposal> {
        match self.actions.create_proposal(name).await.into_result() {
            Ok(proposal) => {
                info!(proposal_id = proposal.id, "Proposal created from dashboard");
                self.toasts.push(Toast::info(
                    "Proposal Created",
                    format!("\"{}\" has been created.", proposal.name),
                ));
                self.load().await;
                Some(proposal)
            }
            Err(message) => {
                self.toasts
                    .push(Toast::error("Error Creating Proposal", message));
                None
            }
        }
    }

    pub async fn delete_proposal(&mut self, proposal_id: i64) -> bool {
        match self.actions.delete_proposal(proposal_id).await.into_result() {
            Ok(()) => {
                self.toasts
                    .push(Toast::info("Proposal Deleted", "The proposal has been removed."));
                self.load().await;
                true
            }
            Err(message) => {
                self.toasts
                    .push(Toast::error("Error Deleting Proposal", message));
                false
            }
        }
    }
}

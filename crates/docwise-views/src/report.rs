//! Signature-analysis report page

use docwise_client::Actions;
use docwise_types::{Proposal, ReportTone, SignatureAnalysisReportData};
use tracing::warn;

use crate::state::LoadState;

pub struct ReportView {
    actions: Actions,
    proposal_id: i64,
    pub report: LoadState<SignatureAnalysisReportData>,
    pub sidebar: Vec<Proposal>,
}

impl ReportView {
    pub fn new(actions: Actions, proposal_id: i64) -> Self {
        Self {
            actions,
            proposal_id,
            report: LoadState::Loading,
            sidebar: Vec::new(),
        }
    }

    pub async fn load(&mut self) {
        self.report = LoadState::Loading;
        let (report, sidebar) = tokio::join!(
            self.actions.signature_analysis_report(self.proposal_id),
            self.actions.list_proposals()
        );

        self.report = match report.into_result() {
            Ok(report) => LoadState::Ready(report),
            Err(message) => LoadState::Failed(message),
        };
        match sidebar.into_result() {
            Ok(list) => self.sidebar = list,
            Err(message) => warn!(error = %message, "Sidebar proposals unavailable"),
        }
    }

    /// Badge tone of the overall status
    pub fn overall_tone(&self) -> ReportTone {
        self.report
            .ready()
            .map_or(ReportTone::Neutral, |r| {
                ReportTone::classify(&r.overall_summary.overall_status.status)
            })
    }

    /// Image of one signature instance, if the report lists it
    pub fn signature_image_url(&self, signature_instance_id: i64) -> Option<String> {
        let report = self.report.ready()?;
        report.signature_instance(signature_instance_id)?;
        self.actions
            .signature_image_url(self.proposal_id, signature_instance_id)
            .data
    }
}

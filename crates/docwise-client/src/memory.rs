//! In-memory `DocumentWiseApi`
//!
//! Backs the server's `--demo` mode and every view test. Behaves like the
//! real backend at the contract level: ids are assigned server-side, uploads
//! are counted with lopdf, analysis produces a report, and chat replies are
//! appended after each user message. Failures can be injected per operation.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use docwise_types::report::{
    AnalysisResults, ConsistencyResult, NamedCount, OverallSummary, SignatureInstanceDetail,
    StakeholderAnalysis, StatusSummary, UniquenessResult,
};
use docwise_types::{
    AnalysisStatus, ChatHistory, ChatMessage, ChatRole, ChatSessionInfo, Document, Proposal,
    SignatureAnalysisReportData, UploadFile,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::api::{ApiResult, DocumentWiseApi};
use crate::config::ApiConfig;
use crate::endpoints::Endpoints;
use crate::error::ClientError;
use crate::http::{
    ANALYSIS_STARTED, EXTRACTION_STARTED, PAGE_HTML_EMPTY, PAGE_HTML_MISSING, REPORT_HTML_EMPTY,
};
use crate::operation::Operation;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Default)]
struct Store {
    proposals: BTreeMap<i64, Proposal>,
    /// Extracted HTML keyed by (document id, page number)
    page_html: HashMap<(i64, u32), String>,
    reports: HashMap<i64, SignatureAnalysisReportData>,
    chats: HashMap<String, ChatHistory>,
    next_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn bump_past(&mut self, id: i64) {
        self.next_id = self.next_id.max(id);
    }

    fn proposal_mut(&mut self, id: i64, op: Operation) -> ApiResult<&mut Proposal> {
        self.proposals.get_mut(&id).ok_or_else(|| not_found(op))
    }
}

#[derive(Debug, Clone)]
struct InjectedFailure {
    status: u16,
    detail: Option<String>,
}

pub struct InMemoryApi {
    store: RwLock<Store>,
    failures: Mutex<HashMap<Operation, InjectedFailure>>,
    calls: AtomicUsize,
    endpoints: Endpoints,
}

impl Default for InMemoryApi {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryApi {
    /// An empty store whose URL operations point at [`DEFAULT_BASE_URL`]
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            store: RwLock::new(Store::default()),
            failures: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
            endpoints: Endpoints::new(&ApiConfig::new(base_url, base_url)),
        }
    }

    /// Store pre-populated with three sample proposals and one chat session
    pub fn demo() -> Self {
        let onboarding = SESSION_DEMO;
        let mut api = Self::new()
            .with_proposal(fixture_proposal(
                1,
                "Quarterly Business Review Documents",
                "2023-01-10T00:00:00Z",
                &[
                    (101, "Initial Agreement Q1.pdf", 5),
                    (102, "Scope of Work Final.pdf", 12),
                ],
            ))
            .with_proposal({
                let mut p = fixture_proposal(
                    2,
                    "New Client Onboarding Pack",
                    "2023-02-05T00:00:00Z",
                    &[(201, "Project Alpha NDA.pdf", 3)],
                );
                p.chat_session_id = Some(onboarding.to_string());
                p
            })
            .with_proposal(fixture_proposal(
                3,
                "Investment Round A Pitch Deck",
                "2023-03-01T00:00:00Z",
                &[],
            ))
            .with_page_html(
                201,
                1,
                "<form><label>Client name</label><input value=\"Project Alpha\"/></form>",
            )
            .with_chat(ChatHistory {
                session: ChatSessionInfo {
                    id: onboarding.to_string(),
                    title: "New Client Onboarding Pack".to_string(),
                    created_at: "2023-02-05T00:00:00Z".to_string(),
                },
                messages: vec![ChatMessage {
                    id: "m-1".to_string(),
                    role: ChatRole::Model,
                    content: "Ask me anything about the onboarding documents.".to_string(),
                    timestamp: "2023-02-05T00:00:00Z".to_string(),
                    file_uri: None,
                    file_mime_type: None,
                }],
            });

        // The onboarding pack ships with a completed analysis
        let store = api.store.get_mut();
        if let Some(proposal) = store.proposals.get_mut(&2) {
            complete_analysis(proposal, &mut store.reports, "2023-02-06T00:00:00Z");
        }
        api
    }

    pub fn with_proposal(mut self, proposal: Proposal) -> Self {
        let store = self.store.get_mut();
        store.bump_past(proposal.id);
        for document in &proposal.documents {
            store.bump_past(document.id);
        }
        store.proposals.insert(proposal.id, proposal);
        self
    }

    pub fn with_page_html(mut self, document_id: i64, page_number: u32, html: &str) -> Self {
        self.store
            .get_mut()
            .page_html
            .insert((document_id, page_number), html.to_string());
        self
    }

    pub fn with_report(mut self, report: SignatureAnalysisReportData) -> Self {
        self.store.get_mut().reports.insert(report.proposal_id, report);
        self
    }

    pub fn with_chat(mut self, history: ChatHistory) -> Self {
        self.store
            .get_mut()
            .chats
            .insert(history.session.id.clone(), history);
        self
    }

    /// Make every subsequent call of `op` fail with `status`
    ///
    /// A 404 on an operation with a dedicated not-found message surfaces as
    /// [`ClientError::NotFound`], as it would over HTTP.
    pub fn fail_with(&self, op: Operation, status: u16, detail: Option<&str>) {
        self.failures_guard().insert(
            op,
            InjectedFailure {
                status,
                detail: detail.map(String::from),
            },
        );
    }

    pub fn clear_failure(&self, op: Operation) {
        self.failures_guard().remove(&op);
    }

    /// Number of backend calls made so far; URL construction is not counted
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Current state of a proposal, bypassing failure injection and the call
    /// counter
    pub async fn snapshot(&self, proposal_id: i64) -> Option<Proposal> {
        self.store.read().await.proposals.get(&proposal_id).cloned()
    }

    fn failures_guard(&self) -> std::sync::MutexGuard<'_, HashMap<Operation, InjectedFailure>> {
        self.failures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn injected(&self, op: Operation) -> ApiResult<()> {
        match self.failures_guard().get(&op) {
            None => Ok(()),
            Some(failure) if failure.status == 404 && op.not_found_message().is_some() => {
                Err(not_found(op))
            }
            Some(failure) => Err(ClientError::Http {
                status: failure.status,
                detail: failure.detail.clone(),
            }),
        }
    }

    /// Count the call, then apply any injected failure
    fn enter(&self, op: Operation) -> ApiResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!(operation = %op, "in-memory call");
        self.injected(op)
    }
}

const SESSION_DEMO: &str = "demo-onboarding";

/// Build a proposal with documents given as `(id, file name, total pages)`
pub fn fixture_proposal(
    id: i64,
    name: &str,
    created_at: &str,
    documents: &[(i64, &str, u32)],
) -> Proposal {
    Proposal {
        id,
        application_number: Some(format!("APP-{id:04}")),
        name: name.to_string(),
        created_at: created_at.to_string(),
        documents: documents
            .iter()
            .map(|&(doc_id, file_name, total_pages)| Document {
                id: doc_id,
                name: file_name.to_string(),
                uploaded_at: created_at.to_string(),
                total_pages,
                project_id: id,
                pages: Vec::new(),
                chat_session_id: None,
            })
            .collect(),
        signature_analysis_status: Some(AnalysisStatus::NotStarted),
        signature_analysis_report_html: None,
        chat_session_id: None,
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn not_found(op: Operation) -> ClientError {
    match op.not_found_message() {
        Some(message) => ClientError::NotFound(message.to_string()),
        None => ClientError::Http {
            status: 404,
            detail: Some("Proposal not found.".to_string()),
        },
    }
}

fn bad_request(detail: String) -> ClientError {
    ClientError::Http {
        status: 400,
        detail: Some(detail),
    }
}

/// Page count of a PDF; unparsable input counts as a single page
fn count_pages(bytes: &[u8]) -> u32 {
    match lopdf::Document::load_mem(bytes) {
        Ok(doc) => u32::try_from(doc.get_pages().len()).unwrap_or(u32::MAX).max(1),
        Err(e) => {
            debug!(error = %e, "Could not parse uploaded PDF, assuming one page");
            1
        }
    }
}

/// Mark a proposal's analysis complete and store its report
fn complete_analysis(
    proposal: &mut Proposal,
    reports: &mut HashMap<i64, SignatureAnalysisReportData>,
    generated_at: &str,
) {
    let instances: Vec<SignatureInstanceDetail> = proposal
        .documents
        .iter()
        .map(|doc| SignatureInstanceDetail {
            signature_instance_id: doc.id * 100 + 1,
            document_name: doc.name.clone(),
            page_number: 1,
            role: "Applicant".to_string(),
        })
        .collect();
    let document_names: Vec<String> = proposal.documents.iter().map(|d| d.name.clone()).collect();
    let description = format!(
        "All {} signatures are consistent for the single stakeholder.",
        instances.len()
    );

    let report = SignatureAnalysisReportData {
        proposal_id: proposal.id,
        proposal_name: proposal.name.clone(),
        proposal_application_number: proposal.application_number.clone(),
        generated_at: generated_at.to_string(),
        overall_summary: OverallSummary {
            documents_analyzed: NamedCount {
                count: u32::try_from(document_names.len()).unwrap_or(u32::MAX),
                names: document_names,
            },
            stakeholders_identified: NamedCount {
                count: 1,
                names: vec!["Primary Signatory".to_string()],
            },
            overall_status: StatusSummary {
                status: "Verified".to_string(),
                description: description.clone(),
            },
        },
        stakeholder_analyses: vec![StakeholderAnalysis {
            stakeholder_id: "1".to_string(),
            stakeholder_name: "Primary Signatory".to_string(),
            roles: "Applicant".to_string(),
            status: "Verified".to_string(),
            signature_instances: instances,
            analysis_results: AnalysisResults {
                intra_stakeholder_consistency: ConsistencyResult {
                    result: "Consistent".to_string(),
                    confidence: Some(0.92),
                    notes: None,
                },
                inter_stakeholder_uniqueness: UniquenessResult {
                    result: "Unique".to_string(),
                    notes: None,
                },
            },
        }],
        cross_stakeholder_uniqueness: Vec::new(),
    };

    proposal.signature_analysis_status = Some(AnalysisStatus::Completed);
    proposal.signature_analysis_report_html = Some(format!(
        "<div><h1>Signature Report</h1><p>Details for {}...</p><p>{}</p></div>",
        proposal.name, description
    ));
    reports.insert(proposal.id, report);
}

#[async_trait]
impl DocumentWiseApi for InMemoryApi {
    async fn list_proposals(&self) -> ApiResult<Vec<Proposal>> {
        self.enter(Operation::ListProposals)?;
        Ok(self.store.read().await.proposals.values().cloned().collect())
    }

    async fn get_proposal(&self, proposal_id: i64) -> ApiResult<Proposal> {
        self.enter(Operation::GetProposal)?;
        self.store
            .read()
            .await
            .proposals
            .get(&proposal_id)
            .cloned()
            .ok_or_else(|| not_found(Operation::GetProposal))
    }

    async fn create_proposal(&self, name: &str) -> ApiResult<Proposal> {
        self.enter(Operation::CreateProposal)?;
        let mut store = self.store.write().await;
        let id = store.next_id();
        let created_at = now();
        let session_id = format!("session-{id}");

        let mut proposal = fixture_proposal(id, name, &created_at, &[]);
        proposal.chat_session_id = Some(session_id.clone());

        store.chats.insert(
            session_id.clone(),
            ChatHistory {
                session: ChatSessionInfo {
                    id: session_id,
                    title: name.to_string(),
                    created_at,
                },
                messages: Vec::new(),
            },
        );
        store.proposals.insert(id, proposal.clone());

        info!(proposal_id = id, "Proposal created");
        Ok(proposal)
    }

    async fn delete_proposal(&self, proposal_id: i64) -> ApiResult<()> {
        self.enter(Operation::DeleteProposal)?;
        let mut store = self.store.write().await;
        let proposal = store
            .proposals
            .remove(&proposal_id)
            .ok_or_else(|| not_found(Operation::DeleteProposal))?;

        store.reports.remove(&proposal_id);
        for document in &proposal.documents {
            store.page_html.retain(|(doc_id, _), _| *doc_id != document.id);
        }
        if let Some(session) = &proposal.chat_session_id {
            store.chats.remove(session);
        }

        info!(proposal_id, "Proposal deleted");
        Ok(())
    }

    async fn upload_document(&self, proposal_id: i64, file: UploadFile) -> ApiResult<Document> {
        self.enter(Operation::UploadDocument)?;
        let mut store = self.store.write().await;
        let id = store.next_id();
        let proposal = store.proposal_mut(proposal_id, Operation::UploadDocument)?;

        let document = Document {
            id,
            name: file.file_name,
            uploaded_at: now(),
            total_pages: count_pages(&file.bytes),
            project_id: proposal_id,
            pages: Vec::new(),
            chat_session_id: None,
        };
        proposal.documents.push(document.clone());

        info!(proposal_id, document_id = id, pages = document.total_pages, "Document uploaded");
        Ok(document)
    }

    async fn start_signature_analysis(&self, proposal_id: i64) -> ApiResult<String> {
        self.enter(Operation::StartSignatureAnalysis)?;
        let mut guard = self.store.write().await;
        let store = &mut *guard;
        let proposal = store
            .proposals
            .get_mut(&proposal_id)
            .ok_or_else(|| not_found(Operation::StartSignatureAnalysis))?;

        if proposal.documents.is_empty() {
            return Err(bad_request(
                "Proposal has no documents to analyze.".to_string(),
            ));
        }

        complete_analysis(proposal, &mut store.reports, &now());
        info!(proposal_id, "Signature analysis completed");
        Ok(ANALYSIS_STARTED.to_string())
    }

    async fn extract_html(
        &self,
        proposal_id: i64,
        document_id: i64,
        page_number: u32,
    ) -> ApiResult<String> {
        self.enter(Operation::ExtractHtml)?;
        let mut store = self.store.write().await;
        let proposal = store.proposal_mut(proposal_id, Operation::ExtractHtml)?;
        let document = proposal
            .document(document_id)
            .ok_or_else(|| bad_request(format!("Document {document_id} not found.")))?;

        if !document.contains_page(page_number) {
            return Err(bad_request(format!(
                "Page {page_number} is out of range for {}.",
                document.name
            )));
        }

        let html = format!(
            "<div class=\"extracted-page\"><h2>{}</h2><p>Page {page_number}</p></div>",
            document.name
        );
        store.page_html.insert((document_id, page_number), html);
        Ok(EXTRACTION_STARTED.to_string())
    }

    async fn page_html(
        &self,
        proposal_id: i64,
        document_id: i64,
        page_number: u32,
    ) -> ApiResult<String> {
        self.enter(Operation::PageHtml)?;
        let store = self.store.read().await;
        let exists = store
            .proposals
            .get(&proposal_id)
            .and_then(|p| p.document(document_id))
            .is_some_and(|d| d.contains_page(page_number));
        if !exists {
            return Ok(PAGE_HTML_MISSING.to_string());
        }

        Ok(store
            .page_html
            .get(&(document_id, page_number))
            .filter(|html| !html.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| PAGE_HTML_EMPTY.to_string()))
    }

    fn page_pdf_url(
        &self,
        proposal_id: i64,
        document_id: i64,
        page_number: u32,
    ) -> ApiResult<String> {
        self.injected(Operation::PagePdfUrl)?;
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
        self.injected(Operation::PageHtmlViewUrl)?;
        self.endpoints
            .page(proposal_id, document_id, page_number, "html_view")
            .map(String::from)
    }

    fn signature_image_url(&self, proposal_id: i64, signature_id: i64) -> ApiResult<String> {
        self.injected(Operation::SignatureImageUrl)?;
        self.endpoints
            .signature_image(proposal_id, signature_id)
            .map(String::from)
    }

    async fn signature_analysis_report_html(&self, proposal_id: i64) -> ApiResult<String> {
        self.enter(Operation::ReportHtml)?;
        let store = self.store.read().await;
        let proposal = store
            .proposals
            .get(&proposal_id)
            .ok_or_else(|| not_found(Operation::ReportHtml))?;

        match (&proposal.signature_analysis_status, &proposal.signature_analysis_report_html) {
            (Some(AnalysisStatus::Completed), Some(html)) if !html.trim().is_empty() => {
                Ok(html.clone())
            }
            (Some(AnalysisStatus::Completed), _) => Ok(REPORT_HTML_EMPTY.to_string()),
            _ => Err(not_found(Operation::ReportHtml)),
        }
    }

    async fn signature_analysis_report(
        &self,
        proposal_id: i64,
    ) -> ApiResult<SignatureAnalysisReportData> {
        self.enter(Operation::ReportData)?;
        self.store
            .read()
            .await
            .reports
            .get(&proposal_id)
            .cloned()
            .ok_or_else(|| not_found(Operation::ReportData))
    }

    async fn chat_history(&self, session_id: &str) -> ApiResult<ChatHistory> {
        self.enter(Operation::ChatHistory)?;
        self.store
            .read()
            .await
            .chats
            .get(session_id)
            .cloned()
            .ok_or_else(|| not_found(Operation::ChatHistory))
    }

    async fn send_chat_message(&self, session_id: &str, content: &str) -> ApiResult<()> {
        self.enter(Operation::SendChatMessage)?;
        let mut store = self.store.write().await;
        let history = store
            .chats
            .get_mut(session_id)
            .ok_or_else(|| not_found(Operation::SendChatMessage))?;

        let timestamp = now();
        let next = history.messages.len() + 1;
        history.messages.push(ChatMessage {
            id: format!("m-{next}"),
            role: ChatRole::User,
            content: content.to_string(),
            timestamp: timestamp.clone(),
            file_uri: None,
            file_mime_type: None,
        });
        history.messages.push(ChatMessage {
            id: format!("m-{}", next + 1),
            role: ChatRole::Model,
            content: format!("Noted: {content}"),
            timestamp,
            file_uri: None,
            file_mime_type: None,
        });
        Ok(())
    }
}

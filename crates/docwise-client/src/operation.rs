//! Catalogue of backend operations and their user-facing messages

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListProposals,
    GetProposal,
    CreateProposal,
    DeleteProposal,
    UploadDocument,
    StartSignatureAnalysis,
    ExtractHtml,
    PageHtml,
    PagePdfUrl,
    PageHtmlViewUrl,
    SignatureImageUrl,
    ReportHtml,
    ReportData,
    ChatHistory,
    SendChatMessage,
}

impl Operation {
    /// Stable identifier used in logs
    pub fn name(self) -> &'static str {
        match self {
            Operation::ListProposals => "list_proposals",
            Operation::GetProposal => "get_proposal",
            Operation::CreateProposal => "create_proposal",
            Operation::DeleteProposal => "delete_proposal",
            Operation::UploadDocument => "upload_document",
            Operation::StartSignatureAnalysis => "start_signature_analysis",
            Operation::ExtractHtml => "extract_html",
            Operation::PageHtml => "page_html",
            Operation::PagePdfUrl => "page_pdf_url",
            Operation::PageHtmlViewUrl => "page_html_view_url",
            Operation::SignatureImageUrl => "signature_image_url",
            Operation::ReportHtml => "signature_analysis_report_html",
            Operation::ReportData => "signature_analysis_report",
            Operation::ChatHistory => "chat_history",
            Operation::SendChatMessage => "send_chat_message",
        }
    }

    /// Prefix for HTTP failures without a server-supplied detail
    pub fn failure_prefix(self) -> &'static str {
        match self {
            Operation::ListProposals => "Failed to fetch proposals",
            Operation::GetProposal => "Failed to fetch proposal",
            Operation::CreateProposal => "Failed to create proposal",
            Operation::DeleteProposal => "Failed to delete proposal",
            Operation::UploadDocument => "Failed to upload document",
            Operation::StartSignatureAnalysis => "Failed to start signature analysis",
            Operation::ExtractHtml => "Failed to trigger HTML extraction",
            Operation::PageHtml => "Failed to fetch HTML content",
            Operation::PagePdfUrl => "Failed to load PDF page",
            Operation::PageHtmlViewUrl => "Failed to load HTML view",
            Operation::SignatureImageUrl => "Failed to fetch signature image",
            Operation::ReportHtml | Operation::ReportData => {
                "Failed to fetch signature analysis report"
            }
            Operation::ChatHistory => "Failed to fetch chat history",
            Operation::SendChatMessage => "Failed to send message",
        }
    }

    /// Mutations report the server's detail as-is, without the prefix
    pub fn detail_stands_alone(self) -> bool {
        matches!(
            self,
            Operation::CreateProposal
                | Operation::UploadDocument
                | Operation::StartSignatureAnalysis
                | Operation::ExtractHtml
        )
    }

    /// Message used when the resource answers 404
    pub fn not_found_message(self) -> Option<&'static str> {
        match self {
            Operation::GetProposal | Operation::DeleteProposal => Some("Proposal not found."),
            Operation::ReportHtml | Operation::ReportData => {
                Some("Report not found or analysis not complete.")
            }
            Operation::ChatHistory | Operation::SendChatMessage => Some("Chat session not found."),
            _ => None,
        }
    }

    /// Message for transport or decoding failures
    pub fn unexpected_message(self) -> &'static str {
        match self {
            Operation::ListProposals => "An unexpected error occurred while fetching proposals.",
            Operation::GetProposal => "An unexpected error occurred while fetching the proposal.",
            Operation::CreateProposal => {
                "Failed to create proposal due to a network or unexpected error."
            }
            Operation::DeleteProposal => {
                "An unexpected error occurred while deleting the proposal."
            }
            Operation::UploadDocument => "An unexpected error occurred while adding the document.",
            Operation::StartSignatureAnalysis => {
                "Signature analysis failed to start due to an unexpected error."
            }
            Operation::ExtractHtml => "Failed to extract HTML due to an unexpected error.",
            Operation::PageHtml => "An unexpected error occurred fetching HTML content.",
            Operation::PagePdfUrl => "An unexpected error occurred while fetching PDF page.",
            Operation::PageHtmlViewUrl => "An unexpected error occurred while loading the HTML view.",
            Operation::SignatureImageUrl => {
                "An unexpected error occurred fetching signature image."
            }
            Operation::ReportHtml | Operation::ReportData => {
                "An unexpected error occurred fetching the signature analysis report."
            }
            Operation::ChatHistory => "An unexpected error occurred while fetching chat history.",
            Operation::SendChatMessage => "An unexpected error occurred while sending the message.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

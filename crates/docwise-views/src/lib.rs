//! DocumentWise view models
//!
//! One view model per page of the front end. Each is built fresh for a
//! navigation, owns its state, and takes `&mut self` for every mutation, so a
//! response is always applied to the view that requested it.
//!
//! - [`DashboardView`]: proposal list, create, delete
//! - [`ProposalDetailView`]: documents, upload, signature analysis
//! - [`DocumentViewer`]: page navigation with PDF and generated HTML
//! - [`ReportView`]: signature-analysis report
//! - [`ChatView`]: chat with optimistic sends

pub mod chat;
pub mod dashboard;
pub mod document;
pub mod proposal;
pub mod report;
pub mod state;

pub use chat::ChatView;
pub use dashboard::DashboardView;
pub use document::DocumentViewer;
pub use proposal::ProposalDetailView;
pub use report::ReportView;
pub use state::{LoadState, Timing, Toast, ToastVariant, Toasts};

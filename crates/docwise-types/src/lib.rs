//! DocumentWise domain types
//!
//! Every entity here is a client-side projection of state owned by the
//! external DocumentWise backend. The crate is split into:
//!
//! - [`wire`]: the backend's snake_case JSON schema, deserialized verbatim
//! - [`model`]: the camelCase domain model handed to views
//! - [`transform`]: wire -> domain conversion (confidence parsing, bounding
//!   boxes, document id inference)
//! - [`report`]: the aggregated signature-analysis report
//! - [`validation`]: checks that run before any request is sent

pub mod model;
pub mod report;
pub mod transform;
pub mod validation;
pub mod wire;

pub use model::{
    AnalysisStatus, BoundingBox, ChatHistory, ChatMessage, ChatRole, ChatSessionInfo, Document,
    Page, Proposal, Signature, UploadFile,
};
pub use report::{ReportTone, SignatureAnalysisReportData};
pub use validation::ValidationError;

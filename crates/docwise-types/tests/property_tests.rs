//! Property-based tests for docwise-types
//!
//! Covers the transform layer and client-side validation with proptest.

use docwise_types::transform::{parse_confidence, signature_from_api};
use docwise_types::validation::{validate_pdf_upload, validate_proposal_name, PDF_MAGIC};
use docwise_types::wire::{ApiDocument, ApiProposal, ApiSignature};
use docwise_types::{Proposal, UploadFile, ValidationError};
use proptest::prelude::*;

// ============================================================
// Strategies
// ============================================================

fn api_document(proposal_id: i64) -> impl Strategy<Value = ApiDocument> {
    (1i64..10_000, "[a-z]{1,12}\\.pdf", 0u32..500).prop_map(move |(id, file_name, total_pages)| {
        ApiDocument {
            id,
            file_name,
            project_id: proposal_id,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            total_pages,
            pages: Vec::new(),
            chat_session_id: None,
        }
    })
}

fn api_proposal() -> impl Strategy<Value = ApiProposal> {
    (1i64..100_000, proptest::option::of("APP-[0-9]{4}"), "[A-Za-z ]{3,40}")
        .prop_flat_map(|(id, application_number, name)| {
            proptest::collection::vec(api_document(id), 0..6).prop_map(move |documents| {
                ApiProposal {
                    id,
                    application_number: application_number.clone(),
                    name: name.clone(),
                    created_at: "2024-01-01T00:00:00Z".to_string(),
                    documents,
                    signature_analysis_status: None,
                    signature_analysis_report_html: None,
                    chat_session_id: None,
                }
            })
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================================
    // Transform Tests
    // ============================================================

    #[test]
    fn transform_preserves_ids_and_counts(api in api_proposal()) {
        let proposal = Proposal::from(api.clone());

        prop_assert_eq!(proposal.id, api.id);
        prop_assert_eq!(&proposal.application_number, &api.application_number);
        prop_assert_eq!(proposal.documents.len(), api.documents.len());
        for (doc, api_doc) in proposal.documents.iter().zip(&api.documents) {
            prop_assert_eq!(&doc.name, &api_doc.file_name);
            prop_assert_eq!(doc.total_pages, api_doc.total_pages);
        }
    }

    #[test]
    fn transform_is_deterministic(api in api_proposal()) {
        prop_assert_eq!(Proposal::from(api.clone()), Proposal::from(api));
    }

    #[test]
    fn formatted_confidence_parses_back(value in 0.0f64..1.0) {
        let formatted = format!("{}", value);
        prop_assert_eq!(parse_confidence(&formatted), Some(value));
    }

    #[test]
    fn garbage_confidence_is_none(raw in "[a-zA-Z ]{0,20}") {
        // Letters alone never form a finite number
        prop_assert_eq!(parse_confidence(&raw), None);
    }

    #[test]
    fn signature_takes_owning_document_id(
        wire_doc_id in proptest::option::of(any::<i64>()),
        owner in 1i64..10_000
    ) {
        let api = ApiSignature {
            id: 1,
            page_id: 2,
            document_id: wire_doc_id,
            stakeholder_id: None,
            ai_signature_id: None,
            ai_confidence: None,
            bounding_box_json: None,
            textract_response_json: None,
            is_consistent_with_stakeholder_group: None,
            is_unique_among_stakeholders: None,
            analysis_notes: None,
        };
        prop_assert_eq!(signature_from_api(api, owner).document_id, owner);
    }

    // ============================================================
    // Validation Tests
    // ============================================================

    #[test]
    fn names_under_three_chars_rejected(name in "[a-z]{0,2}") {
        prop_assert_eq!(
            validate_proposal_name(&name),
            Err(ValidationError::NameTooShort { min: 3 })
        );
    }

    #[test]
    fn names_of_three_or_more_accepted(name in "[A-Za-z0-9]{3,60}") {
        prop_assert_eq!(validate_proposal_name(&name), Ok(name.clone()));
    }

    #[test]
    fn pdf_bytes_without_declared_type_accepted(
        rest in proptest::collection::vec(any::<u8>(), 0..100)
    ) {
        let mut bytes = PDF_MAGIC.to_vec();
        bytes.extend(rest);
        let file = UploadFile::new("upload", None, bytes);
        prop_assert!(validate_pdf_upload(&file).is_ok());
    }

    #[test]
    fn non_pdf_mime_types_rejected(
        mime in prop_oneof![
            Just("image/png"),
            Just("text/plain"),
            Just("application/msword"),
            Just("application/octet-stream")
        ]
    ) {
        let file = UploadFile::new("x.pdf", Some(mime.to_string()), b"%PDF-1.7".to_vec());
        let is_not_pdf = matches!(validate_pdf_upload(&file), Err(ValidationError::NotPdf { .. }));
        prop_assert!(is_not_pdf);
    }
}

//! Property-based tests for docwise-client
//!
//! URL construction, outcome serialization and error descriptions.

use docwise_client::actions::describe;
use docwise_client::{ApiConfig, ClientError, Endpoints, Operation, Outcome};
use proptest::prelude::*;

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::ListProposals),
        Just(Operation::GetProposal),
        Just(Operation::CreateProposal),
        Just(Operation::DeleteProposal),
        Just(Operation::UploadDocument),
        Just(Operation::StartSignatureAnalysis),
        Just(Operation::ExtractHtml),
        Just(Operation::PageHtml),
        Just(Operation::ReportHtml),
        Just(Operation::ReportData),
        Just(Operation::ChatHistory),
        Just(Operation::SendChatMessage),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================================
    // Endpoint Tests
    // ============================================================

    #[test]
    fn page_urls_embed_every_id(pid in 1i64..1_000_000, did in 1i64..1_000_000, page in 1u32..5_000) {
        let endpoints = Endpoints::new(&ApiConfig::new("http://api.test/v1/", "http://chat.test"));
        let url = endpoints.page(pid, did, page, "pdf").unwrap();
        let expected = format!("http://api.test/v1/proposals/{pid}/documents/{did}/pages/{page}/pdf");
        prop_assert_eq!(url.as_str(), expected.as_str());
    }

    #[test]
    fn chat_session_stays_one_segment(session in "[a-zA-Z0-9 /?#%_-]{1,30}") {
        let endpoints = Endpoints::new(&ApiConfig::new("http://api.test", "http://chat.test"));
        let url = endpoints.chat(&session, "history").unwrap();
        let segments: Vec<&str> = url.path_segments().unwrap().collect();
        prop_assert_eq!(segments.len(), 3);
        prop_assert_eq!(segments[0], "chat");
        prop_assert_eq!(segments[2], "history");
    }

    // ============================================================
    // Outcome Tests
    // ============================================================

    #[test]
    fn outcome_serializes_exactly_one_side(value in any::<i64>(), message in "[a-zA-Z .]{1,40}", ok in any::<bool>()) {
        let outcome = if ok { Outcome::ok(value) } else { Outcome::err(message) };
        let json = serde_json::to_value(&outcome).unwrap();
        let object = json.as_object().unwrap();
        prop_assert_eq!(object.len(), 1);
        prop_assert_eq!(object.contains_key("data"), ok);
    }

    #[test]
    fn http_errors_keep_server_detail(op in operation(), status in 400u16..600, detail in "[a-z]{1,20}") {
        let message = describe(op, &ClientError::Http { status, detail: Some(detail.clone()) });
        if op.detail_stands_alone() {
            prop_assert_eq!(message, detail);
        } else {
            prop_assert!(message.starts_with(op.failure_prefix()));
            prop_assert!(message.ends_with(&detail));
        }
    }
}

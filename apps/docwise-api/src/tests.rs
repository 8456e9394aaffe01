//! Tests for the DocumentWise server
//!
//! Test categories:
//! - HTTP endpoints against the in-memory store (axum-test)
//! - Status mapping and request validation properties (proptest)

#[cfg(test)]
mod http_endpoint_tests {
    //! HTTP endpoint integration tests using axum-test

    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use docwise_client::{ApiConfig, InMemoryApi};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::sync::Arc;

    use crate::build_router;
    use crate::state::{AppState, Mode};

    /// Create a test server over the seeded demo store
    fn create_test_server() -> TestServer {
        TestServer::new(build_router(AppState::demo())).unwrap()
    }

    fn create_test_server_with(api: Arc<InMemoryApi>) -> TestServer {
        let state = AppState::new(api, Mode::Demo);
        TestServer::new(build_router(state)).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_mode() {
        let server = create_test_server();
        let response = server.get("/health").await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "docwise-api");
        assert_eq!(json["mode"], "demo");
    }

    #[tokio::test]
    async fn test_list_proposals_is_camel_case() {
        let server = create_test_server();
        let response = server.get("/api/proposals").await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        let proposals = json["data"].as_array().unwrap();
        assert_eq!(proposals.len(), 3);
        assert_eq!(proposals[0]["applicationNumber"], "APP-0001");
        assert_eq!(proposals[0]["documents"][0]["totalPages"], 5);
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn test_get_missing_proposal_is_404() {
        let server = create_test_server();
        let response = server.get("/api/proposals/999").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let json = response.json::<Value>();
        assert_eq!(json, json!({"error": "Proposal not found."}));
    }

    #[tokio::test]
    async fn test_create_rejects_short_name() {
        let server = create_test_server();
        let response = server
            .post("/api/proposals")
            .json(&json!({"name": "ab"}))
            .await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["error"],
            "Proposal name must be at least 3 characters."
        );
    }

    #[tokio::test]
    async fn test_malformed_json_body_is_outcome() {
        let server = create_test_server();
        let response = server
            .post("/api/proposals")
            .bytes(Vec::from("{not json").into())
            .content_type("application/json")
            .await;

        response.assert_status_bad_request();
        let json = response.json::<Value>();
        assert!(json.get("data").is_none());
        assert!(!json["error"].as_str().unwrap().is_empty());

        let response = server
            .post("/api/chat/demo-onboarding/message")
            .json(&json!({"text": "wrong field"}))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_path_param_is_outcome() {
        let server = create_test_server();
        let response = server.get("/api/proposals/abc").await;

        response.assert_status_bad_request();
        assert!(response.json::<Value>()["error"]
            .as_str()
            .unwrap()
            .contains("abc"));

        server
            .get("/api/proposals/2/documents/201/pages/first/html")
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_create_and_delete_proposal() {
        let server = create_test_server();
        let response = server
            .post("/api/proposals")
            .json(&json!({"name": "Series B Docs"}))
            .await;
        response.assert_status(StatusCode::CREATED);

        let id = response.json::<Value>()["data"]["id"].as_i64().unwrap();
        server
            .delete(&format!("/api/proposals/{id}"))
            .await
            .assert_status_ok();
        server
            .get(&format!("/api/proposals/{id}"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upload_pdf() {
        let server = create_test_server();
        let form = MultipartForm::new().add_part(
            "file",
            Part::bytes(b"%PDF-1.7 minimal".to_vec())
                .file_name("deck.pdf")
                .mime_type("application/pdf"),
        );

        let response = server
            .post("/api/proposals/3/documents")
            .multipart(form)
            .await;
        response.assert_status(StatusCode::CREATED);

        let json = response.json::<Value>();
        assert_eq!(json["data"]["name"], "deck.pdf");
        assert_eq!(json["data"]["projectId"], 3);
    }

    #[tokio::test]
    async fn test_upload_rejects_non_pdf_without_backend_call() {
        let api = Arc::new(InMemoryApi::demo());
        let server = create_test_server_with(api.clone());
        let form = MultipartForm::new().add_part(
            "files",
            Part::bytes(b"hello".to_vec())
                .file_name("notes.txt")
                .mime_type("text/plain"),
        );

        let response = server
            .post("/api/proposals/1/documents")
            .multipart(form)
            .await;
        response.assert_status_bad_request();
        assert!(response.json::<Value>()["error"]
            .as_str()
            .unwrap()
            .contains("notes.txt"));
        assert_eq!(api.call_count(), 0);
    }

    fn pdf_part(file_name: &str, size: usize) -> Part {
        let mut bytes = b"%PDF-1.7\n".to_vec();
        bytes.resize(size, b' ');
        Part::bytes(bytes)
            .file_name(file_name)
            .mime_type("application/pdf")
    }

    #[tokio::test]
    async fn test_upload_larger_than_axum_default_limit() {
        let server = create_test_server();
        let form = MultipartForm::new().add_part("file", pdf_part("scan.pdf", 3 * 1024 * 1024));

        let response = server
            .post("/api/proposals/3/documents")
            .multipart(form)
            .await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["data"]["name"], "scan.pdf");
    }

    #[tokio::test]
    async fn test_upload_over_configured_limit_is_413_json() {
        let state = AppState::demo().with_max_upload_bytes(1024);
        let server = TestServer::new(build_router(state)).unwrap();
        let form = MultipartForm::new().add_part("file", pdf_part("big.pdf", 8 * 1024));

        let response = server
            .post("/api/proposals/3/documents")
            .multipart(form)
            .await;
        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        assert!(response.json::<Value>()["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid upload"));
    }

    #[tokio::test]
    async fn test_upload_without_file_field() {
        let server = create_test_server();
        let form = MultipartForm::new().add_text("comment", "no file here");

        let response = server
            .post("/api/proposals/1/documents")
            .multipart(form)
            .await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"], "File is required.");
    }

    #[tokio::test]
    async fn test_report_html_and_data() {
        let server = create_test_server();

        let response = server
            .get("/api/proposals/2/signature-analysis/report")
            .await;
        response.assert_status_ok();
        assert!(response
            .header("content-type")
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert!(response.text().contains("Signature Report"));

        let response = server
            .get("/api/proposals/2/signature-analysis/report-data")
            .await;
        response.assert_status_ok();
        let json = response.json::<Value>();
        assert_eq!(json["data"]["proposalName"], "New Client Onboarding Pack");
        assert_eq!(
            json["data"]["overallSummary"]["overallStatus"]["status"],
            "Verified"
        );

        server
            .get("/api/proposals/1/signature-analysis/report")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_start_analysis_then_report() {
        let server = create_test_server();
        server
            .post("/api/proposals/1/signature-analysis/start")
            .await
            .assert_status(StatusCode::ACCEPTED);

        let json = server.get("/api/proposals/1").await.json::<Value>();
        assert_eq!(json["data"]["signatureAnalysisStatus"], "completed");
    }

    #[tokio::test]
    async fn test_page_html_and_assets() {
        let server = create_test_server();

        let response = server
            .get("/api/proposals/2/documents/201/pages/1/html")
            .await;
        response.assert_status_ok();
        assert!(response.json::<Value>()["data"]
            .as_str()
            .unwrap()
            .contains("Project Alpha"));

        let response = server
            .get("/api/proposals/2/documents/201/pages/1/assets")
            .await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>()["data"],
            json!({
                "pdfUrl": "http://localhost:8000/proposals/2/documents/201/pages/1/pdf",
                "htmlViewUrl": "http://localhost:8000/proposals/2/documents/201/pages/1/html_view"
            })
        );

        server
            .get("/api/proposals/2/documents/201/pages/0/assets")
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_extract_html() {
        let server = create_test_server();
        server
            .post("/api/proposals/1/documents/101/pages/2/extract-html")
            .await
            .assert_status(StatusCode::ACCEPTED);

        let json = server
            .get("/api/proposals/1/documents/101/pages/2/html")
            .await
            .json::<Value>();
        assert!(json["data"]
            .as_str()
            .unwrap()
            .contains("Initial Agreement Q1.pdf"));
    }

    #[tokio::test]
    async fn test_signature_image_url() {
        let server = create_test_server();
        let response = server
            .get("/api/proposals/2/signatures/20101/image-url")
            .await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>()["data"],
            "http://localhost:8000/proposals/2/signatures/20101/image"
        );
    }

    #[tokio::test]
    async fn test_chat_round_trip() {
        let server = create_test_server();
        server
            .post("/api/chat/demo-onboarding/message")
            .json(&json!({"message": "Who signed?"}))
            .await
            .assert_status_ok();

        let json = server
            .get("/api/chat/demo-onboarding/history")
            .await
            .json::<Value>();
        let messages = json["data"]["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1]["role"], "user");

        server
            .get("/api/chat/unknown/history")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_502() {
        // Nothing listens on port 9 (discard)
        let config = ApiConfig::new("http://127.0.0.1:9", "http://127.0.0.1:9");
        let state = AppState::proxy(&config).unwrap();
        let server = TestServer::new(build_router(state)).unwrap();

        let response = server.get("/api/proposals").await;
        response.assert_status(StatusCode::BAD_GATEWAY);
        assert_eq!(
            response.json::<Value>()["error"],
            "An unexpected error occurred while fetching proposals."
        );
    }

    #[tokio::test]
    async fn test_unconfigured_backend_is_500() {
        let state = AppState::proxy(&ApiConfig::default()).unwrap();
        let server = TestServer::new(build_router(state)).unwrap();

        let response = server.get("/api/proposals").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.json::<Value>()["error"]
            .as_str()
            .unwrap()
            .starts_with("Configuration error"));
    }
}

#[cfg(test)]
mod property_tests {
    use axum::http::StatusCode;
    use docwise_client::{ErrorKind, Outcome};
    use proptest::prelude::*;

    use crate::error::status_for;

    fn error_kind() -> impl Strategy<Value = ErrorKind> {
        prop_oneof![
            Just(ErrorKind::Validation),
            Just(ErrorKind::NotFound),
            Just(ErrorKind::Upstream),
            Just(ErrorKind::Config),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        // ============================================================
        // Status Mapping Tests
        // ============================================================

        /// Property: every failure maps to an error status
        #[test]
        fn failures_never_map_to_success(kind in error_kind()) {
            let status = status_for(Some(kind));
            prop_assert!(status.is_client_error() || status.is_server_error());
        }

        /// Property: only validation failures are the caller's fault
        #[test]
        fn client_errors_are_validation_or_not_found(kind in error_kind()) {
            let is_client = status_for(Some(kind)).is_client_error();
            prop_assert_eq!(
                is_client,
                matches!(kind, ErrorKind::Validation | ErrorKind::NotFound)
            );
        }

        /// Property: a failed outcome body carries only the error message
        #[test]
        fn failed_body_has_only_error(kind in error_kind(), message in "[A-Za-z .]{1,60}") {
            let body = serde_json::to_value(Outcome::<i64>::failed(kind, message.clone())).unwrap();
            prop_assert_eq!(body, serde_json::json!({"error": message}));
            prop_assert_ne!(status_for(Some(kind)), StatusCode::OK);
        }
    }
}

//! HTTP-level tests for ApiClient against a mock backend

use notex_api::{ApiClient, Backend, Error, HistoryEntry};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri()).unwrap()
}

#[tokio::test]
async fn test_chat_completion_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({
            "message": "and the second point?",
            "history": [
                {"role": "user", "content": "summarize this"},
                {"role": "assistant", "content": "three points"}
            ],
            "model": "2.5 Flash",
            "context": "three points"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "The second point is about testing."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let history = vec![
        HistoryEntry::user("summarize this"),
        HistoryEntry::assistant("three points"),
    ];
    let resp = client
        .chat_completion("and the second point?", &history, "2.5 Flash", Some("three points"))
        .await
        .unwrap();

    assert_eq!(resp.reply(), Some("The second point is about testing."));
}

#[tokio::test]
async fn test_chat_completion_error_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "model not found"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .chat_completion("hi", &[], "nope", None)
        .await
        .unwrap_err();

    match err {
        Error::Request(detail) => assert_eq!(detail, "model not found"),
        other => panic!("expected request error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_chat_completion_error_without_detail_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.chat_completion("hi", &[], "m", None).await.unwrap_err();
    assert_eq!(err.user_message(), "Failed to get chat response");
}

#[tokio::test]
async fn test_error_with_non_json_body_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/summarize/youtube"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .summarize_youtube("https://youtu.be/abc123", "m")
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Failed to summarize video");
}

#[tokio::test]
async fn test_summarize_youtube_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/summarize/youtube"))
        .and(body_json(json!({"url": "https://youtu.be/abc123", "model": "2.5 Flash"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "summary": "**Key ideas**"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let resp = client
        .summarize_youtube("https://youtu.be/abc123", "2.5 Flash")
        .await
        .unwrap();
    assert_eq!(resp.text(), Some("**Key ideas**"));
}

#[tokio::test]
async fn test_summarize_document_sends_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/summarize/document"))
        .and(body_string_contains("filename=\"report.pdf\""))
        .and(body_string_contains("name=\"model\""))
        .and(body_string_contains("2.5 Flash"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "summary": "A short report."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let resp = client
        .summarize_document(b"%PDF-1.4 fake".to_vec(), "report.pdf", "2.5 Flash")
        .await
        .unwrap();
    assert_eq!(resp.text(), Some("A short report."));
}

#[tokio::test]
async fn test_summarize_document_error_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/summarize/document"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .summarize_document(vec![1, 2, 3], "a.docx", "m")
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Failed to summarize document");
}

#[tokio::test]
async fn test_health_returns_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "google_api": true
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let status = client.health().await.unwrap();
    assert_eq!(status["status"], "healthy");
}

#[tokio::test]
async fn test_health_unreachable_is_none() {
    let client = ApiClient::new("http://127.0.0.1:1").unwrap();
    assert!(client.health().await.is_none());
}

#[tokio::test]
async fn test_transport_failure_is_http_error() {
    let client = ApiClient::new("http://127.0.0.1:1").unwrap();
    let err = client.chat_completion("hi", &[], "m", None).await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}

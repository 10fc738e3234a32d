//! Controller flows driven over HTTP against a mock backend

use notex_api::ApiClient;
use notex_session::{InteractionController, Outcome, Storage};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn controller_for(server: &MockServer) -> InteractionController {
    let client = ApiClient::new(server.uri()).unwrap();
    InteractionController::new(Storage::in_memory(), Arc::new(client))
}

#[tokio::test]
async fn test_backend_detail_appended_as_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "detail": "model not found"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctrl = controller_for(&server).await;
    let outcome = ctrl.send_message("hi").await.unwrap();

    assert_eq!(outcome, Outcome::Failed("model not found".to_string()));
    assert!(!ctrl.session().is_busy());

    let conv = ctrl.active_conversation().unwrap();
    assert_eq!(conv.messages.len(), 2);
    assert!(conv.messages[0].is_user);
    let reply = &conv.messages[1];
    assert!(!reply.is_user);
    assert!(reply.content.starts_with("❌ Error: model not found"));
    assert!(reply.content.contains(&server.uri()));
}

#[tokio::test]
async fn test_summary_then_follow_up_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/summarize/youtube"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "summary": "A talk about ownership."
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "It covered borrowing."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctrl = controller_for(&server).await;
    ctrl.summarize_link("https://youtu.be/abc123").await.unwrap();
    ctrl.send_message("what else?").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let chat: serde_json::Value = requests
        .iter()
        .find(|r| r.url.path() == "/api/chat")
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .unwrap();
    assert_eq!(chat["context"], "A talk about ownership.");
    assert_eq!(chat["history"].as_array().unwrap().len(), 2);
}

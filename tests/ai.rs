#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{memory_state, state_with_llm};
use taskboard::llm::{LlmClient, DEFAULT_MODEL};

fn completion(content: &str) -> Value {
    json!({
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    })
}

async fn mock_provider(expected_prompt: &str, answer: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "system", "content": "You are an AI assistant helping with task management." },
                { "role": "user", "content": expected_prompt }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(answer)))
        .expect(1)
        .mount(&server)
        .await;
    server
}

fn client_for(server: &MockServer) -> LlmClient {
    LlmClient::new(
        format!("{}/v1/chat/completions", server.uri()),
        Some("sk-test".to_string()),
        DEFAULT_MODEL,
    )
    .unwrap()
}

#[actix_rt::test]
async fn test_suggest_tasks() {
    let server = mock_provider(
        "Generate a list of tasks for the following project: a bakery website",
        "1. Design the menu page",
    )
    .await;
    let app = test_app!(state_with_llm(client_for(&server)));

    let req = test::TestRequest::post()
        .uri("/ai/suggest-tasks")
        .set_json(json!({ "project_description": "a bakery website" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "suggestions": "1. Design the menu page" }));
}

#[actix_rt::test]
async fn test_improve_task() {
    let server = mock_provider(
        "Rewrite and improve the clarity of this task description: fix login",
        "Fix the login form validation",
    )
    .await;
    let app = test_app!(state_with_llm(client_for(&server)));

    let req = test::TestRequest::post()
        .uri("/ai/improve-task")
        .set_json(json!({ "task_description": "fix login" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "improved_task": "Fix the login form validation" }));
}

#[actix_rt::test]
async fn test_assign_priority() {
    let server = mock_provider(
        "Analyze the following task and suggest its priority (Low, Medium, High): outage",
        "High",
    )
    .await;
    let app = test_app!(state_with_llm(client_for(&server)));

    let req = test::TestRequest::post()
        .uri("/ai/assign-priority")
        .set_json(json!({ "task_description": "outage" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "priority": "High" }));
}

#[actix_rt::test]
async fn test_provider_failure_is_a_generic_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key sk-test"))
        .mount(&server)
        .await;
    let app = test_app!(state_with_llm(client_for(&server)));

    let req = test::TestRequest::post()
        .uri("/ai/improve-task")
        .set_json(json!({ "task_description": "anything" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "AI service unavailable" }));
}

#[actix_rt::test]
async fn test_missing_api_key_and_bad_bodies() {
    let app = test_app!(memory_state());

    let req = test::TestRequest::post()
        .uri("/ai/suggest-tasks")
        .set_json(json!({ "project_description": "a bakery website" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let req = test::TestRequest::post()
        .uri("/ai/suggest-tasks")
        .set_json(json!({ "project": "wrong field" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/ai/assign-priority")
        .set_json(json!({ "task_description": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

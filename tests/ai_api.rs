//! AI 생성 엔드포인트 통합 테스트
//!
//! 외부 AI는 `ScriptedOracle`로 교체합니다.

mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

fn generate_body(count: i64) -> serde_json::Value {
    json!({
        "role": "Backend Engineer",
        "experience": "2 years",
        "topicsToFocus": ["Rust", "SQL"],
        "numberOfQuestions": count
    })
}

#[tokio::test]
async fn generates_questions_from_fenced_json() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com").await;
    app.oracle
        .push_text("```json\n[{\"question\":\"Q1\",\"answer\":\"A1\"}]\n```");

    let (status, body) = app
        .post("/api/ai/generate-questions", &token, generate_body(3))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["questions"], json!([{ "question": "Q1", "answer": "A1" }]));

    let prompts = app.oracle.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("exactly 3"));
    assert!(prompts[0].contains("Rust, SQL"));
    assert!(prompts[0].contains("Backend Engineer"));
}

#[tokio::test]
async fn topics_may_be_a_single_string() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com").await;
    app.oracle.push_text("[]");

    let (status, _) = app
        .post(
            "/api/ai/generate-questions",
            &token,
            json!({
                "role": "SRE",
                "experience": "5 years",
                "topicsToFocus": "Kubernetes, Linux",
                "numberOfQuestions": 5
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(app.oracle.prompts()[0].contains("Kubernetes, Linux"));
}

#[tokio::test]
async fn empty_envelope_is_upstream_error() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com").await;
    app.oracle.push(json!({}));

    let (status, body) = app
        .post("/api/ai/generate-questions", &token, generate_body(3))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Error generating interview questions");
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn unparseable_text_is_upstream_error() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com").await;
    app.oracle.push_text("Sure! Here are your questions:");

    let (status, body) = app
        .post("/api/ai/generate-questions", &token, generate_body(3))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Error generating interview questions");
}

#[tokio::test]
async fn oracle_failure_is_upstream_error() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com").await;
    app.oracle.push_failure("quota exceeded");

    let (status, body) = app
        .post("/api/ai/generate-questions", &token, generate_body(3))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("quota exceeded"));
}

#[tokio::test]
async fn missing_fields_are_rejected_without_calling_ai() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com").await;

    let (status, body) = app
        .post(
            "/api/ai/generate-questions",
            &token,
            json!({ "role": "Backend Engineer", "experience": "2 years", "numberOfQuestions": 3 }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please provide all the required fields.");
    assert!(app.oracle.prompts().is_empty());
}

#[tokio::test]
async fn question_count_must_be_in_range() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com").await;

    for count in [2, 16] {
        let (status, _) = app
            .post("/api/ai/generate-questions", &token, generate_body(count))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "count {}", count);
    }
    assert!(app.oracle.prompts().is_empty());
}

#[tokio::test]
async fn requires_token() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/ai/generate-questions",
            None,
            Some(generate_body(3)),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn explanation_is_fence_stripped_text() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com").await;
    app.oracle
        .push_text("```\nA closure captures its environment.\n```");

    let (status, body) = app
        .post(
            "/api/ai/generate-explanation",
            &token,
            json!({ "question": "What is a closure?" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["explanation"], "A closure captures its environment.");
    assert!(app.oracle.prompts()[0].contains("What is a closure?"));
}

#[tokio::test]
async fn explanation_requires_question() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com").await;

    let (status, body) = app
        .post("/api/ai/generate-explanation", &token, json!({}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields");
}

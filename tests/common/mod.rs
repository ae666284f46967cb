//! 통합 테스트 공용 도우미
//!
//! - 인메모리 SQLite + 마이그레이션
//! - 응답을 미리 정해 두는 `ScriptedOracle`
//! - `tower::ServiceExt::oneshot`으로 라우터에 요청 보내기

#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use interview_prep::{
    build_router, db,
    services::oracle::{Oracle, OracleError},
    AppState,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "integration-test-secret";

/// Gemini 응답 봉투 모양으로 텍스트를 감쌉니다.
pub fn envelope(text: &str) -> Value {
    json!({
        "candidates": [
            { "content": { "role": "model", "parts": [ { "text": text } ] } }
        ]
    })
}

/// 큐에 넣은 응답을 순서대로 돌려주고, 받은 프롬프트를 기록합니다.
#[derive(Default)]
pub struct ScriptedOracle {
    responses: Mutex<VecDeque<Result<Value, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedOracle {
    pub fn push(&self, response: Value) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_text(&self, text: &str) {
        self.push(envelope(text));
    }

    pub fn push_failure(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn generate(&self, prompt: &str) -> Result<Value, OracleError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(OracleError::Unavailable(message)),
            None => Err(OracleError::Unavailable("no scripted response".to_string())),
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub oracle: Arc<ScriptedOracle>,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = db::connect("sqlite::memory:").await.unwrap();
        db::run_migrations(&pool).await.unwrap();

        let oracle = Arc::new(ScriptedOracle::default());
        let state = AppState::new(pool.clone(), JWT_SECRET, oracle.clone());

        Self {
            router: build_router(state, None),
            pool,
            oracle,
        }
    }

    /// 요청을 보내고 (상태 코드, JSON 본문)을 돌려줍니다. 본문이 비어 있으면 `Value::Null`.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            request = request.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, path: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, path, Some(token), None).await
    }

    pub async fn post(&self, path: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, path, Some(token), Some(body)).await
    }

    pub async fn delete(&self, path: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, path, Some(token), None).await
    }

    /// 사용자를 등록하고 (토큰, 사용자 ID)를 돌려줍니다.
    pub async fn register(&self, name: &str, email: &str) -> (String, String) {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({ "name": name, "email": email, "password": "secret123" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_str().unwrap().to_string(),
        )
    }

    /// 질문 세 개가 있는 세션을 만들고 본문의 `session`을 돌려줍니다.
    pub async fn create_session(&self, token: &str, role: &str) -> Value {
        let (status, body) = self
            .post(
                "/api/session/create",
                token,
                json!({
                    "role": role,
                    "experience": "2 years",
                    "topicsToFocus": ["Rust", "SQL"],
                    "description": "Practice round",
                    "questions": [
                        { "question": "Q1", "answer": "A1" },
                        { "question": "Q2", "answer": "A2" },
                        { "question": "Q3", "answer": "A3" }
                    ]
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
        body["session"].clone()
    }
}

pub fn question_texts(session: &Value) -> Vec<String> {
    session["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["question"].as_str().unwrap().to_string())
        .collect()
}

//! # 타입이 있는 HTTP API 클라이언트
//!
//! 서버의 각 엔드포인트에 대응하는 메서드를 제공합니다.
//! 2xx가 아닌 응답은 서버가 보낸 `message`와 함께 `ClientError::Api`가 됩니다.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::models::*;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// 세션 생성 위저드가 필요로 하는 API
#[async_trait]
pub trait SessionApi: Send + Sync {
    async fn generate_questions(
        &self,
        req: &GenerateQuestionsRequest,
    ) -> Result<Vec<QuestionPair>, ClientError>;

    async fn create_session(
        &self,
        req: &CreateSessionRequest,
    ) -> Result<SessionWithQuestions, ClientError>;
}

/// 메모 자동 저장이 값을 내보내는 곳
#[async_trait]
pub trait NoteSink: Send + Sync {
    async fn save_note(&self, question_id: &str, note: &str) -> Result<(), ClientError>;
}

#[derive(Debug, Deserialize)]
struct SessionEnvelope {
    session: SessionWithQuestions,
}

#[derive(Debug, Deserialize)]
struct SessionsEnvelope {
    sessions: Vec<SessionWithQuestions>,
}

#[derive(Debug, Deserialize)]
struct QuestionEnvelope {
    question: Question,
}

#[derive(Debug, Deserialize)]
struct QuestionsEnvelope {
    questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: UserResponse,
}

#[derive(Debug, Deserialize)]
struct MessageEnvelope {
    message: String,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// `base_url`은 `/api` 앞부분입니다 (예: "http://localhost:5000").
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}/api{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn read<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body: Value = response.json().await.unwrap_or(Value::Null);
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed"))
            .to_string();

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError> {
        let mut builder = self.request(method, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        Self::read(builder.send().await?).await
    }

    /// 회원가입 후 토큰을 저장합니다.
    pub async fn register(&mut self, req: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        let auth: AuthResponse = self.send(Method::POST, "/auth/register", Some(req)).await?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    /// 로그인 후 토큰을 저장합니다.
    pub async fn login(&mut self, req: &LoginRequest) -> Result<AuthResponse, ClientError> {
        let auth: AuthResponse = self.send(Method::POST, "/auth/login", Some(req)).await?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    pub async fn profile(&self) -> Result<UserResponse, ClientError> {
        let envelope: UserEnvelope = self.send::<(), _>(Method::GET, "/auth/profile", None).await?;
        Ok(envelope.user)
    }

    pub async fn generate_explanation(&self, question: &str) -> Result<String, ClientError> {
        let req = GenerateExplanationRequest {
            question: Some(question.to_string()),
        };
        let response: GenerateExplanationResponse = self
            .send(Method::POST, "/ai/generate-explanation", Some(&req))
            .await?;
        Ok(response.explanation)
    }

    pub async fn my_sessions(&self) -> Result<Vec<SessionWithQuestions>, ClientError> {
        let envelope: SessionsEnvelope = self
            .send::<(), _>(Method::GET, "/session/my-sessions", None)
            .await?;
        Ok(envelope.sessions)
    }

    pub async fn get_session(&self, id: &str) -> Result<SessionWithQuestions, ClientError> {
        let envelope: SessionEnvelope = self
            .send::<(), _>(Method::GET, &format!("/session/{}", id), None)
            .await?;
        Ok(envelope.session)
    }

    /// 성공 시 서버 메시지를 돌려줍니다.
    pub async fn delete_session(&self, id: &str) -> Result<String, ClientError> {
        let envelope: MessageEnvelope = self
            .send::<(), _>(Method::DELETE, &format!("/session/{}", id), None)
            .await?;
        Ok(envelope.message)
    }

    pub async fn add_questions(
        &self,
        session_id: &str,
        questions: Vec<QuestionPair>,
    ) -> Result<Vec<Question>, ClientError> {
        let req = AddQuestionsRequest {
            session_id: Some(session_id.to_string()),
            questions: Some(questions),
        };
        let envelope: QuestionsEnvelope = self
            .send(Method::POST, "/questions/add", Some(&req))
            .await?;
        Ok(envelope.questions)
    }

    pub async fn toggle_pin(&self, question_id: &str) -> Result<Question, ClientError> {
        let envelope: QuestionEnvelope = self
            .send::<(), _>(Method::POST, &format!("/questions/{}/pin", question_id), None)
            .await?;
        Ok(envelope.question)
    }

    pub async fn update_note(&self, question_id: &str, note: &str) -> Result<Question, ClientError> {
        let req = UpdateNoteRequest {
            note: Some(note.to_string()),
        };
        let envelope: QuestionEnvelope = self
            .send(Method::POST, &format!("/questions/{}/note", question_id), Some(&req))
            .await?;
        Ok(envelope.question)
    }
}

#[async_trait]
impl SessionApi for ApiClient {
    async fn generate_questions(
        &self,
        req: &GenerateQuestionsRequest,
    ) -> Result<Vec<QuestionPair>, ClientError> {
        let response: GenerateQuestionsResponse = self
            .send(Method::POST, "/ai/generate-questions", Some(req))
            .await?;
        Ok(response.questions)
    }

    async fn create_session(
        &self,
        req: &CreateSessionRequest,
    ) -> Result<SessionWithQuestions, ClientError> {
        let envelope: SessionEnvelope = self
            .send(Method::POST, "/session/create", Some(req))
            .await?;
        Ok(envelope.session)
    }
}

#[async_trait]
impl NoteSink for ApiClient {
    async fn save_note(&self, question_id: &str, note: &str) -> Result<(), ClientError> {
        self.update_note(question_id, note).await.map(|_| ())
    }
}

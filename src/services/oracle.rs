//! # 생성형 AI(oracle) 포트와 어댑터
//!
//! `Oracle` 트레이트는 "프롬프트를 보내면 응답 봉투(JSON)를 돌려주는" 외부 서비스의 계약입니다.
//! 응답 봉투의 해석은 `normalize` 모듈이 담당하므로, 여기서는 원본 JSON을 그대로 돌려줍니다.
//!
//! - `GeminiOracle`: Google Generative Language REST API 어댑터 (운영용)
//! - 테스트에서는 `Oracle`을 구현한 대역을 `AppState`에 주입합니다.
//!
//! 호출마다 외부 요청이 정확히 한 번 일어납니다. 재시도, 캐싱, 타임아웃은 없습니다.

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("AI request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("AI service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("AI service unavailable: {0}")]
    Unavailable(String),
}

/// 단일 턴 텍스트 생성 서비스
#[async_trait]
pub trait Oracle: Send + Sync {
    /// `role = "user"` 텍스트 파트 하나로 요청하고 응답 봉투를 돌려줍니다.
    async fn generate(&self, prompt: &str) -> Result<Value, OracleError>;
}

/// Gemini `generateContent` 엔드포인트를 호출하는 어댑터
#[derive(Clone)]
pub struct GeminiOracle {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiOracle {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// 요청 본문: `contents: [{ role: "user", parts: [{ text }] }]`
    fn request_body(prompt: &str) -> Value {
        json!({
            "contents": [
                { "role": "user", "parts": [ { "text": prompt } ] }
            ]
        })
    }
}

#[async_trait]
impl Oracle for GeminiOracle {
    async fn generate(&self, prompt: &str) -> Result<Value, OracleError> {
        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Calling generative AI");

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Generative AI call failed");
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

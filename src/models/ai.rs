use serde::{Deserialize, Serialize};

use super::question::QuestionPair;
use super::session::Topics;

/// 질문 생성 요청 — `POST /api/ai/generate-questions`
///
/// 네 필드 모두 필수이지만, 누락 시 400과 JSON 메시지를 돌려주기 위해 Option으로 받습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuestionsRequest {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub topics_to_focus: Option<Topics>,
    #[serde(default)]
    pub number_of_questions: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateQuestionsResponse {
    pub success: bool,
    pub questions: Vec<QuestionPair>,
}

/// 개념 설명 요청 — `POST /api/ai/generate-explanation`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateExplanationRequest {
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateExplanationResponse {
    pub success: bool,
    pub explanation: String,
}

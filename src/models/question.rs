//! # 질문 모델 정의
//!
//! 질문은 정확히 하나의 세션에 속합니다 (`session_id` 역참조).
//! 세션과 함께 생성되거나 나중에 추가되고, 고정(pin)과 메모는 개별적으로 수정됩니다.
//! 삭제는 세션 삭제의 일부로만 일어납니다.

use serde::{Deserialize, Serialize};

/// 질문 엔티티 — DB의 `questions` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    /// 소유 세션의 ID
    pub session_id: String,
    /// 세션 내 삽입 순서 (0부터 시작)
    pub position: i64,
    pub question: String,
    pub answer: String,
    /// 사용자가 남긴 메모. 기본값은 빈 문자열
    pub note: String,
    pub is_pinned: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// AI가 생성한 질문/답변 한 쌍
///
/// 생성 API의 응답이자, 세션 생성/질문 추가 요청의 입력입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPair {
    pub question: String,
    pub answer: String,
}

impl QuestionPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// 메모 수정 요청 — `POST /api/questions/:id/note`
///
/// `note`가 없거나 null이면 빈 문자열로 저장합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(default)]
    pub note: Option<String>,
}

/// 기존 세션에 질문 추가 요청 — `POST /api/questions/add`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddQuestionsRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub questions: Option<Vec<QuestionPair>>,
}

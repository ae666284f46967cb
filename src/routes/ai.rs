//! # AI 생성 라우트 핸들러
//!
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | /api/ai/generate-questions | `generate_questions` | 질문/답변 생성 (저장 안 함) |
//! | POST | /api/ai/generate-explanation | `generate_explanation` | 개념 설명 생성 |
//!
//! ## 처리 순서
//! ```text
//! 요청 검증 → 프롬프트 생성 → oracle 호출(1회) → 텍스트 추출 → 펜스 제거 → (JSON 파싱) → 응답
//! ```
//! 호출마다 외부 AI 요청이 정확히 한 번 나갑니다. 저장은 클라이언트가 따로 요청합니다.

use crate::{
    error::AppError,
    extract::ApiJson,
    middleware::auth::AuthUser,
    models::*,
    services::{self, build_explain_prompt, build_question_prompt},
    state::AppState,
};
use axum::{extract::State, Json};

const MISSING_FIELDS: &str = "Please provide all the required fields.";

fn required(value: Option<String>) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(MISSING_FIELDS.to_string()))
}

/// `POST /api/ai/generate-questions`
///
/// role, experience, topicsToFocus, numberOfQuestions 네 필드가 모두 필요합니다.
/// numberOfQuestions는 [3, 15] 범위여야 합니다.
pub async fn generate_questions(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiJson(req): ApiJson<GenerateQuestionsRequest>,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    let role = required(req.role)?;
    let experience = required(req.experience)?;
    let topics = req
        .topics_to_focus
        .map(|t| t.to_list())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest(MISSING_FIELDS.to_string()))?;
    let count = req
        .number_of_questions
        .ok_or_else(|| AppError::BadRequest(MISSING_FIELDS.to_string()))?;

    if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&count) {
        return Err(AppError::BadRequest(format!(
            "numberOfQuestions must be between {} and {}",
            MIN_QUESTIONS, MAX_QUESTIONS
        )));
    }

    let prompt = build_question_prompt(&role, &experience, &topics, count as u32);
    tracing::info!(user_id = %auth_user.user_id, count, "Generating interview questions");

    let envelope = state
        .oracle
        .generate(&prompt)
        .await
        .map_err(|e| AppError::upstream("Error generating interview questions", e))?;

    let cleaned = services::strip_fences(&services::extract_text(&envelope));
    let questions = services::parse_question_pairs(&cleaned)
        .map_err(|e| AppError::upstream("Error generating interview questions", e))?;

    Ok(Json(GenerateQuestionsResponse {
        success: true,
        questions,
    }))
}

/// `POST /api/ai/generate-explanation`
///
/// 펜스만 제거한 설명 문자열을 그대로 돌려줍니다 (JSON 파싱 없음).
pub async fn generate_explanation(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiJson(req): ApiJson<GenerateExplanationRequest>,
) -> Result<Json<GenerateExplanationResponse>, AppError> {
    let question = req
        .question
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing required fields".to_string()))?;

    tracing::info!(user_id = %auth_user.user_id, "Generating concept explanation");

    let envelope = state
        .oracle
        .generate(&build_explain_prompt(&question))
        .await
        .map_err(|e| AppError::upstream("Error generating concept explanation", e))?;

    let explanation = services::strip_fences(&services::extract_text(&envelope));

    Ok(Json(GenerateExplanationResponse {
        success: true,
        explanation,
    }))
}

//! # 질문 API 라우트 핸들러
//!
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | /api/questions/add | `add_questions` | 기존 세션에 질문 추가 |
//! | POST | /api/questions/:id/pin | `toggle_pin` | 고정 토글 |
//! | POST | /api/questions/:id/note | `update_note` | 메모 수정 |
//!
//! 질문을 바꾸기 전에 호출자가 부모 세션의 소유자인지 확인합니다.
//! 소유자가 아니면 세션 삭제와 같은 401을 돌려줍니다.

use crate::{
    db,
    error::AppError,
    extract::ApiJson,
    middleware::auth::AuthUser,
    models::*,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

const NOT_OWNER: &str = "You are not authorized to modify this question";

/// 세션이 호출자 소유인지 확인합니다.
async fn ensure_session_owner(
    state: &AppState,
    session_id: &str,
    auth_user: &AuthUser,
    message: &str,
) -> Result<Session, AppError> {
    let session = db::get_session(&state.pool, session_id)
        .await?
        .ok_or_else(|| AppError::not_found("Session"))?;

    if session.user_id != auth_user.user_id {
        return Err(AppError::Unauthorized(message.to_string()));
    }
    Ok(session)
}

/// 질문을 불러오고, 부모 세션이 호출자 소유인지 확인합니다.
async fn load_owned_question(
    state: &AppState,
    id: &str,
    auth_user: &AuthUser,
) -> Result<Question, AppError> {
    let question = db::get_question(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Question"))?;

    ensure_session_owner(state, &question.session_id, auth_user, NOT_OWNER).await?;
    Ok(question)
}

/// `POST /api/questions/add` + `{ sessionId, questions: [...] }` → `201 { success, questions }`
pub async fn add_questions(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiJson(req): ApiJson<AddQuestionsRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let (Some(session_id), Some(pairs)) = (req.session_id, req.questions) else {
        return Err(AppError::BadRequest("Invalid input data".to_string()));
    };

    ensure_session_owner(
        &state,
        &session_id,
        &auth_user,
        "You are not authorized to modify this session",
    )
    .await?;

    let created = db::append_questions(&state.pool, &session_id, &pairs).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "questions": created })),
    ))
}

/// `POST /api/questions/:id/pin` → `{ success, question }`
///
/// 두 번 호출하면 원래 상태로 돌아옵니다.
pub async fn toggle_pin(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    load_owned_question(&state, &id, &auth_user).await?;

    let question = db::toggle_pin(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Question"))?;

    Ok(Json(json!({ "success": true, "question": question })))
}

/// `POST /api/questions/:id/note` + `{ note }` → `{ success, question }`
///
/// `note`가 없거나 null이면 빈 문자열로 저장합니다.
pub async fn update_note(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateNoteRequest>,
) -> Result<Json<Value>, AppError> {
    load_owned_question(&state, &id, &auth_user).await?;

    let note = req.note.unwrap_or_default();
    let question = db::update_note(&state.pool, &id, &note)
        .await?
        .ok_or_else(|| AppError::not_found("Question"))?;

    Ok(Json(json!({ "success": true, "question": question })))
}

//! # 면접 세션 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | /api/session/create | `create_session` | 세션 + 질문 일괄 생성 |
//! | GET | /api/session/my-sessions | `my_sessions` | 내 세션 목록 (최신순) |
//! | GET | /api/session/:id | `get_session` | 세션 상세 (고정 질문 먼저) |
//! | DELETE | /api/session/:id | `delete_session` | 세션과 질문 삭제 |
//!
//! 모든 엔드포인트는 인증이 필요합니다 (`AuthUser` 추출기).

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

/// 세션을 생성합니다.
///
/// `POST /api/session/create`
/// + `{ role, experience, topicsToFocus, description, questions: [{question, answer}] }`
/// → `201 { success, session }`
///
/// 세션과 질문은 하나의 트랜잭션으로 저장되어, 일부만 저장되는 일이 없습니다.
pub async fn create_session(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiJson(req): ApiJson<CreateSessionRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let role = req.role.as_deref().map(str::trim).unwrap_or_default();
    let experience = req.experience.as_deref().map(str::trim).unwrap_or_default();
    if role.is_empty() || experience.is_empty() {
        return Err(AppError::BadRequest(
            "Role and experience are required".to_string(),
        ));
    }

    let topics = req.topics_to_focus.as_ref().map(Topics::joined).unwrap_or_default();
    let description = req
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());

    let new = NewSession {
        user_id: &auth_user.user_id,
        role,
        experience,
        topics_to_focus: &topics,
        description,
    };

    let session = db::create_session(&state.pool, &new, &req.questions).await?;

    tracing::info!(
        session_id = %session.session.id,
        questions = session.questions.len(),
        "Created session"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "session": session })),
    ))
}

/// 내 세션 목록을 최신순으로 조회합니다.
///
/// `GET /api/session/my-sessions` → `{ success, sessions: [...] }`
pub async fn my_sessions(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let sessions = db::list_sessions_for_user(&state.pool, &auth_user.user_id).await?;
    Ok(Json(json!({ "success": true, "sessions": sessions })))
}

/// 세션 상세를 조회합니다.
///
/// `GET /api/session/:id` → `{ success, session }`
///
/// 다른 사용자의 세션은 존재 여부를 드러내지 않도록 404로 응답합니다.
pub async fn get_session(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let session = db::get_session_with_questions(&state.pool, &id)
        .await?
        .filter(|s| s.session.user_id == auth_user.user_id)
        .ok_or_else(|| AppError::not_found("Session"))?;

    Ok(Json(json!({ "success": true, "session": session })))
}

/// 세션과 그 질문들을 삭제합니다.
///
/// `DELETE /api/session/:id` → `200 { success, message }`
/// - 세션이 없으면 404
/// - 소유자가 아니면 401 (세션과 질문은 그대로 유지)
pub async fn delete_session(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let session = db::get_session(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Session"))?;

    if session.user_id != auth_user.user_id {
        return Err(AppError::Unauthorized(
            "You are not authorized to delete this session".to_string(),
        ));
    }

    let removed = db::delete_session(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Session"))?;

    tracing::info!(session_id = %id, removed_questions = removed, "Deleted session");

    Ok(Json(json!({
        "success": true,
        "message": "Session deleted successfully"
    })))
}

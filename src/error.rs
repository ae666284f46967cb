//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 `{ "success": false, "code", "message" }` JSON 응답으로 변환
//!
//! 핸들러 경계에서 모든 에러가 JSON 본문으로 바뀌므로, 어떤 요청도 프로세스를
//! 중단시키지 않습니다. 재시도는 어디에서도 하지 않습니다.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 각 variant는 적절한 HTTP 상태 코드와 메시지로 변환됩니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 필수 필드 누락, 형식 오류 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 세션/질문/사용자를 찾을 수 없음 (HTTP 404)
    #[error("{0}")]
    NotFound(String),

    /// 인증 실패 또는 소유자가 아님 (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 이메일 중복 등 리소스 충돌 (HTTP 409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 외부 AI 호출 실패 또는 AI가 파싱할 수 없는 내용을 반환함 (HTTP 500)
    ///
    /// `message`는 사용자에게 보여줄 요약, `detail`은 원인 메시지입니다.
    /// 원인 메시지도 응답 본문의 `error` 필드로 그대로 전달합니다.
    #[error("{message}: {detail}")]
    Upstream { message: String, detail: String },

    /// 데이터베이스 오류 (HTTP 500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// 외부 AI 관련 실패를 사용자용 요약 메시지와 함께 감쌉니다.
    pub fn upstream(message: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        AppError::Upstream {
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    pub fn not_found(what: &str) -> Self {
        AppError::NotFound(format!("{} not found", what))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 데이터베이스/내부 에러는 실제 내용을 로그에만 남기고 일반 메시지만 반환합니다.
    /// 외부 AI 에러는 원인 메시지를 `error` 필드에 함께 담습니다.
    fn into_response(self) -> Response {
        let (status, code, message, detail) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            AppError::Upstream { message, detail } => {
                tracing::error!("Upstream error: {}: {}", message, detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "upstream_error",
                    message,
                    Some(detail),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "success": false,
            "code": code,
            "message": message,
        });
        if let Some(detail) = detail {
            body["error"] = json!(detail);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn upstream_error_surfaces_detail() {
        let (status, body) =
            render(AppError::upstream("Error generating interview questions", "EOF while parsing")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Error generating interview questions");
        assert_eq!(body["error"], "EOF while parsing");
    }

    #[tokio::test]
    async fn database_error_hides_detail() {
        let (status, body) = render(AppError::Database(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "A database error occurred");
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let (status, body) = render(AppError::not_found("Session")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Session not found");
        assert_eq!(body["code"], "not_found");
    }
}

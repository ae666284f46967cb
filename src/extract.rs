//! 요청 본문 추출기

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json`과 같지만, 파싱 실패를 `AppError::BadRequest`(400 JSON 본문)로 돌려줍니다.
///
/// 기본 `Json` 추출기는 필드 누락 시 422와 일반 텍스트 본문을 반환합니다.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

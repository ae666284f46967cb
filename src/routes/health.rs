//! # 헬스체크(Health Check) 핸들러
//!
//! - `GET /api/health` → `{ "status": "ok" }`
//!
//! 로드밸런서나 컨테이너 오케스트레이터가 서버 상태를 확인할 때 사용합니다.

use axum::Json;
use serde_json::{json, Value};

/// 인증도 DB 접근도 없이 항상 200을 반환합니다.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}

//! 애플리케이션 공유 상태

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::services::oracle::Oracle;

/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
///
/// 외부 AI 클라이언트(`oracle`)는 전역 싱글턴이 아니라 여기에 주입됩니다.
/// 테스트에서는 응답을 미리 정해 둔 대역으로 교체합니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (내부적으로 Arc로 공유)
    pub pool: SqlitePool,
    /// JWT 토큰 서명용 비밀키
    pub jwt_secret: String,
    pub oracle: Arc<dyn Oracle>,
}

impl AppState {
    pub fn new(pool: SqlitePool, jwt_secret: impl Into<String>, oracle: Arc<dyn Oracle>) -> Self {
        Self {
            pool,
            jwt_secret: jwt_secret.into(),
            oracle,
        }
    }
}

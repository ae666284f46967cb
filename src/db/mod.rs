//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 각 하위 모듈:
//! - `questions`: 질문 조회, 추가, 고정 토글, 메모 수정
//! - `sessions`: 세션 생성(질문 포함), 조회, 삭제(질문 연쇄 삭제)
//! - `users`: 사용자 인증 관련 쿼리

pub mod questions;
pub mod sessions;
pub mod users;

pub use questions::*;
pub use sessions::*;

use std::{str::FromStr, time::Duration};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite 연결 풀을 만듭니다. 파일이 없으면 새로 생성하고, 외래키 검사를 켭니다.
///
/// WAL 모드에서 쓰기 잠금을 기다리는 최대 시간은 `BUSY_TIMEOUT`입니다.
/// `sqlite::memory:`는 연결마다 별도의 DB가 되므로 연결을 하나로 제한합니다.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// ./migrations 폴더의 SQL 파일 중 아직 실행되지 않은 것을 순서대로 실행합니다.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

//! # 면접 세션 데이터베이스 쿼리 모듈
//!
//! 세션과 그 세션이 소유한 질문들을 하나의 묶음(aggregate)으로 다룹니다.
//!
//! ## 세션 라이프사이클
//! ```text
//! create_session()  ─ 트랜잭션: 세션 INSERT + 질문 N개 INSERT → COMMIT
//! delete_session()  ─ 트랜잭션: 질문 DELETE → 세션 DELETE → COMMIT
//! ```
//!
//! 질문 쪽의 `session_id`가 유일한 연결 고리이므로, 세션의 질문 목록은
//! 항상 역참조가 그 세션을 가리키는 질문들로만 이루어집니다.

use std::collections::HashMap;

use crate::db::questions;
use crate::error::AppError;
use crate::models::{NewSession, QuestionPair, Session, SessionWithQuestions};
use sqlx::SqlitePool;

/// 세션과 질문들을 한 번에 생성합니다.
///
/// 중간에 하나라도 실패하면 트랜잭션이 롤백되어 아무것도 남지 않습니다.
/// 질문의 position은 `questions` 슬라이스의 순서를 따릅니다.
pub async fn create_session(
    pool: &SqlitePool,
    new: &NewSession<'_>,
    questions: &[QuestionPair],
) -> Result<SessionWithQuestions, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    // tx가 commit 없이 drop되면 자동으로 롤백됩니다.
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO sessions (id, user_id, role, experience, topics_to_focus, description)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(new.user_id)
    .bind(new.role)
    .bind(new.experience)
    .bind(new.topics_to_focus)
    .bind(new.description)
    .execute(&mut *tx)
    .await?;

    for (position, pair) in questions.iter().enumerate() {
        questions::insert_question(&mut *tx, &id, position as i64, pair).await?;
    }

    tx.commit().await?;

    get_session_with_questions(pool, &id)
        .await?
        .ok_or(AppError::Internal(
            "Failed to retrieve created session".to_string(),
        ))
}

/// ID로 세션 하나를 조회합니다 (질문 제외).
pub async fn get_session(pool: &SqlitePool, id: &str) -> Result<Option<Session>, AppError> {
    let session = sqlx::query_as::<_, Session>(
        r#"
        SELECT id, user_id, role, experience, topics_to_focus, description, created_at, updated_at
        FROM sessions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

/// 세션을 질문과 함께 조회합니다. 질문은 고정된 것이 먼저, 그 안에서는 삽입 순서입니다.
pub async fn get_session_with_questions(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<SessionWithQuestions>, AppError> {
    let Some(session) = get_session(pool, id).await? else {
        return Ok(None);
    };

    let questions = questions::list_questions_for_session(pool, id).await?;
    Ok(Some(SessionWithQuestions { session, questions }))
}

/// 사용자의 모든 세션을 최신순으로 조회합니다. 각 세션의 질문은 삽입 순서입니다.
pub async fn list_sessions_for_user(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<SessionWithQuestions>, AppError> {
    let sessions = sqlx::query_as::<_, Session>(
        r#"
        SELECT id, user_id, role, experience, topics_to_focus, description, created_at, updated_at
        FROM sessions
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut by_session: HashMap<String, Vec<_>> = HashMap::new();
    for question in questions::list_questions_for_user(pool, user_id).await? {
        by_session
            .entry(question.session_id.clone())
            .or_default()
            .push(question);
    }

    Ok(sessions
        .into_iter()
        .map(|session| {
            let questions = by_session.remove(&session.id).unwrap_or_default();
            SessionWithQuestions { session, questions }
        })
        .collect())
}

/// 세션과 소유한 질문들을 삭제합니다. 질문(자식)을 먼저 지우고 세션(부모)을 지웁니다.
///
/// ## 반환값
/// - `Ok(Some(n))`: 삭제 성공, n은 함께 삭제된 질문 수
/// - `Ok(None)`: 해당 ID의 세션이 없음
pub async fn delete_session(pool: &SqlitePool, id: &str) -> Result<Option<u64>, AppError> {
    let mut tx = pool.begin().await?;

    let removed_questions = questions::delete_questions_for_session(&mut *tx, id).await?;

    let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        // 세션이 없으면 아무것도 바꾸지 않습니다.
        tx.rollback().await?;
        return Ok(None);
    }

    tx.commit().await?;
    Ok(Some(removed_questions))
}

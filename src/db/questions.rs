//! # 질문 데이터베이스 쿼리 모듈
//!
//! `questions` 테이블에 대한 쿼리 함수들입니다.
//!
//! ## 정렬 규칙
//! - 상세 조회: `is_pinned DESC, position ASC` (고정된 질문 먼저, 그 안에서는 삽입 순서)
//! - 목록 조회: `position ASC` (삽입 순서)
//!
//! 트랜잭션 안에서 호출되는 함수는 `&mut SqliteConnection`을 받습니다.
//! 호출하는 쪽에서 `&mut *tx`로 넘깁니다.

use crate::error::AppError;
use crate::models::{Question, QuestionPair};
use sqlx::{SqliteConnection, SqlitePool};

/// 질문 하나를 삽입합니다. 트랜잭션 안에서 호출됩니다.
pub async fn insert_question(
    conn: &mut SqliteConnection,
    session_id: &str,
    position: i64,
    pair: &QuestionPair,
) -> Result<String, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT INTO questions (id, session_id, position, question, answer)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(session_id)
    .bind(position)
    .bind(&pair.question)
    .bind(&pair.answer)
    .execute(&mut *conn)
    .await?;

    Ok(id)
}

/// ID로 질문 하나를 조회합니다.
pub async fn get_question(pool: &SqlitePool, id: &str) -> Result<Option<Question>, AppError> {
    let question = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, session_id, position, question, answer, note, is_pinned, created_at, updated_at
        FROM questions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(question)
}

/// 세션의 질문을 표시 순서대로 조회합니다 (고정 먼저, 그 다음 삽입 순서).
pub async fn list_questions_for_session(
    pool: &SqlitePool,
    session_id: &str,
) -> Result<Vec<Question>, AppError> {
    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, session_id, position, question, answer, note, is_pinned, created_at, updated_at
        FROM questions
        WHERE session_id = ?
        ORDER BY is_pinned DESC, position ASC
        "#,
    )
    .bind(session_id)
    .fetch_all(pool)
    .await?;

    Ok(questions)
}

/// 사용자가 소유한 모든 세션의 질문을 삽입 순서대로 조회합니다.
///
/// 세션 목록을 만들 때 세션마다 쿼리를 날리지 않도록 한 번에 가져옵니다.
pub async fn list_questions_for_user(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<Question>, AppError> {
    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT q.id, q.session_id, q.position, q.question, q.answer, q.note, q.is_pinned,
               q.created_at, q.updated_at
        FROM questions q
        JOIN sessions s ON s.id = q.session_id
        WHERE s.user_id = ?
        ORDER BY q.session_id, q.position ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(questions)
}

/// 세션 맨 뒤에 질문 하나를 추가하고 삽입된 행을 돌려줍니다. 트랜잭션 안에서 호출됩니다.
///
/// position 계산과 INSERT가 한 문장이므로, 이 문장이 쓰기 잠금을 잡은 뒤에
/// `MAX(position)`을 읽습니다.
async fn append_question(
    conn: &mut SqliteConnection,
    session_id: &str,
    pair: &QuestionPair,
) -> Result<Question, AppError> {
    let question = sqlx::query_as::<_, Question>(
        r#"
        INSERT INTO questions (id, session_id, position, question, answer)
        SELECT ?, ?, COALESCE(MAX(position) + 1, 0), ?, ?
        FROM questions
        WHERE session_id = ?
        RETURNING id, session_id, position, question, answer, note, is_pinned, created_at, updated_at
        "#,
    )
    .bind(uuid::Uuid::now_v7().to_string())
    .bind(session_id)
    .bind(&pair.question)
    .bind(&pair.answer)
    .bind(session_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(question)
}

/// 기존 세션 뒤쪽에 질문들을 추가합니다.
///
/// position은 현재 최댓값 다음부터 이어집니다. 전부 하나의 트랜잭션으로 처리하고,
/// 이번에 삽입한 행만 돌려줍니다.
pub async fn append_questions(
    pool: &SqlitePool,
    session_id: &str,
    pairs: &[QuestionPair],
) -> Result<Vec<Question>, AppError> {
    let mut tx = pool.begin().await?;

    let mut created = Vec::with_capacity(pairs.len());
    for pair in pairs {
        created.push(append_question(&mut *tx, session_id, pair).await?);
    }

    tx.commit().await?;
    Ok(created)
}

/// 고정 상태를 뒤집습니다.
///
/// ## 반환값
/// - `Ok(Some(Question))`: 변경된 질문
/// - `Ok(None)`: 해당 ID의 질문이 없음
pub async fn toggle_pin(pool: &SqlitePool, id: &str) -> Result<Option<Question>, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE questions
        SET is_pinned = NOT is_pinned,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_question(pool, id).await
}

/// 메모를 덮어씁니다. 동시 수정은 마지막 쓰기가 이깁니다.
pub async fn update_note(
    pool: &SqlitePool,
    id: &str,
    note: &str,
) -> Result<Option<Question>, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE questions
        SET note = ?,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(note)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_question(pool, id).await
}

/// 세션에 속한 질문을 모두 삭제하고 삭제된 개수를 반환합니다. 트랜잭션 안에서 호출됩니다.
pub async fn delete_questions_for_session(
    conn: &mut SqliteConnection,
    session_id: &str,
) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM questions WHERE session_id = ?")
        .bind(session_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}

//! # 면접 연습 세션 모델 정의
//!
//! 세션은 직무/경력/주제 설정으로 묶인 질문 모음이며, 한 명의 사용자가 소유합니다.
//!
//! ## 세션 흐름
//! 1. `POST /api/ai/generate-questions`로 질문을 생성 (저장하지 않음)
//! 2. `POST /api/session/create`로 세션과 질문을 한 번에 저장
//! 3. 상세 조회 시 고정된 질문이 먼저, 그 안에서는 삽입 순서대로 정렬

use serde::{Deserialize, Serialize};

use super::question::{Question, QuestionPair};

/// 한 번에 생성할 수 있는 질문 수의 하한
pub const MIN_QUESTIONS: i64 = 3;
/// 한 번에 생성할 수 있는 질문 수의 상한
pub const MAX_QUESTIONS: i64 = 15;
/// 직무명 최소 글자 수 (클라이언트 검증)
pub const MIN_ROLE_CHARS: usize = 3;
/// 세션 설명 최대 글자 수 (클라이언트 검증)
pub const MAX_DESCRIPTION_CHARS: usize = 300;

/// 세션 엔티티 — DB의 `sessions` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    /// 소유자 ID
    pub user_id: String,
    pub role: String,
    pub experience: String,
    /// ", "로 이어 붙인 주제 목록
    pub topics_to_focus: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// 질문이 채워진 세션 — 목록/상세/생성 응답에 사용합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionWithQuestions {
    #[serde(flatten)]
    pub session: Session,
    pub questions: Vec<Question>,
}

/// 주제 목록. 클라이언트는 문자열 하나 또는 문자열 배열을 보낼 수 있습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Topics {
    One(String),
    Many(Vec<String>),
}

impl Topics {
    /// 공백뿐인 항목을 제외한 주제 목록
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Topics::One(topic) => vec![topic.clone()],
            Topics::Many(topics) => topics.clone(),
        }
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
    }

    /// 저장/프롬프트용으로 ", "로 이어 붙인 문자열
    pub fn joined(&self) -> String {
        self.to_list().join(", ")
    }

    pub fn is_empty(&self) -> bool {
        self.to_list().is_empty()
    }
}

impl From<Vec<String>> for Topics {
    fn from(topics: Vec<String>) -> Self {
        Topics::Many(topics)
    }
}

/// 세션 생성 요청 — `POST /api/session/create`
///
/// `questions`는 이미 생성된 질문/답변 쌍입니다. 없으면 빈 세션을 만듭니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub topics_to_focus: Option<Topics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<QuestionPair>,
}

/// DB 계층에 넘기는 검증된 세션 필드
#[derive(Debug, Clone)]
pub struct NewSession<'a> {
    pub user_id: &'a str,
    pub role: &'a str,
    pub experience: &'a str,
    pub topics_to_focus: &'a str,
    pub description: Option<&'a str>,
}

//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `ai`: AI 질문 생성/개념 설명 요청과 응답
//! - `question`: 질문(Question)과 질문/답변 쌍
//! - `session`: 면접 연습 세션(Session)
//! - `user`: 사용자(User)와 인증 요청/응답
//!
//! 서버와 `client` 모듈이 같은 구조체를 공유하므로 대부분 Serialize/Deserialize를 모두 derive합니다.

pub mod ai;
pub mod question;
pub mod session;
pub mod user;

pub use ai::*;
pub use question::*;
pub use session::*;
pub use user::*;

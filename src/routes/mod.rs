//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `ai`: AI 질문 생성, 개념 설명
//! - `auth`: 회원가입, 로그인, 프로필
//! - `health`: 서버 상태 확인
//! - `questions`: 질문 추가, 고정 토글, 메모 수정
//! - `sessions`: 세션 생성/목록/상세/삭제

pub mod ai;
pub mod auth;
pub mod health;
pub mod questions;
pub mod sessions;

pub use health::*;

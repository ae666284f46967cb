//! 요청 공통 처리
//!
//! - `auth`: Bearer 토큰(JWT) 발급/검증과 `AuthUser` 추출기

pub mod auth;

//! # 비즈니스 로직 서비스
//!
//! - `prompts`: AI 지시문 생성 (순수 함수)
//! - `normalize`: AI 응답 봉투에서 텍스트 추출, 코드 펜스 제거, JSON 파싱
//! - `oracle`: 외부 생성형 AI 포트(`Oracle`)와 Gemini 어댑터

pub mod normalize;
pub mod oracle;
pub mod prompts;

pub use normalize::*;
pub use prompts::*;

//! # 클라이언트 구성요소
//!
//! - `api`: 서버 API를 호출하는 타입 있는 HTTP 클라이언트
//! - `wizard`: 두 단계 세션 생성 흐름
//! - `autosave`: 질문별 메모 디바운스 저장

pub mod api;
pub mod autosave;
pub mod wizard;

pub use api::{ApiClient, ClientError, NoteSink, SessionApi};
pub use autosave::{NoteAutosaver, NOTE_DEBOUNCE};
pub use wizard::{CreateSessionWizard, SessionConfig, WizardError, WizardStep};

//! # 면접 준비(Interview Prep) 백엔드
//!
//! 사용자가 직무/경력/주제로 세션을 만들고, 외부 생성형 AI가 만든 질문/답변을
//! 고정하고 메모를 남기는 REST API 서버와, 그 API를 쓰는 클라이언트 구성요소입니다.
//!
//! 모듈 구성:
//! - `config`: 환경변수 설정
//! - `db`: SQLite 쿼리 (세션/질문/사용자)
//! - `error`: `AppError`와 JSON 에러 응답
//! - `middleware`: Bearer 토큰 인증
//! - `models`: 데이터 구조체
//! - `routes`: HTTP 핸들러
//! - `services`: 프롬프트 생성, AI 응답 정규화, AI 어댑터
//! - `client`: API 클라이언트, 세션 생성 위저드, 메모 자동 저장

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub use state::AppState;

/// API 라우터를 만듭니다. 모든 경로는 `/api` 아래에 있습니다.
///
/// `frontend_dist`가 존재하는 디렉토리면 API 외의 경로를 SPA로 서빙합니다
/// (찾을 수 없는 경로는 index.html).
pub fn build_router(state: AppState, frontend_dist: Option<&Path>) -> Router {
    let auth_routes = Router::new()
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/profile", get(routes::auth::profile));

    let ai_routes = Router::new()
        .route("/ai/generate-questions", post(routes::ai::generate_questions))
        .route("/ai/generate-explanation", post(routes::ai::generate_explanation));

    let session_routes = Router::new()
        .route("/session/create", post(routes::sessions::create_session))
        .route("/session/my-sessions", get(routes::sessions::my_sessions))
        .route(
            "/session/{id}",
            get(routes::sessions::get_session).delete(routes::sessions::delete_session),
        );

    let question_routes = Router::new()
        .route("/questions/add", post(routes::questions::add_questions))
        .route("/questions/{id}/pin", post(routes::questions::toggle_pin))
        .route("/questions/{id}/note", post(routes::questions::update_note));

    let api_routes = Router::new()
        .merge(auth_routes)
        .merge(ai_routes)
        .merge(session_routes)
        .merge(question_routes)
        .route("/health", get(routes::health_check))
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new().nest("/api", api_routes);

    let app = match frontend_dist.filter(|dir| dir.exists()) {
        Some(dir) => {
            tracing::info!("Serving frontend static files from {}", dir.display());
            let serve_dir =
                ServeDir::new(dir).not_found_service(ServeFile::new(dir.join("index.html")));
            app.fallback_service(serve_dir)
        }
        None => {
            tracing::warn!("Frontend dist directory not found, serving API only");
            app
        }
    };

    app.layer(cors).layer(TraceLayer::new_for_http())
}

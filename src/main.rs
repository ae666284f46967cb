//! # Interview Prep 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성 (실패하면 즉시 종료)
//! 4. 데이터베이스 마이그레이션 실행
//! 5. 생성형 AI 클라이언트 생성 후 AppState에 주입
//! 6. API 라우터 설정 및 HTTP 서버 시작

use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use interview_prep::{
    build_router, config::Config, db, services::oracle::GeminiOracle, AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "interview_prep=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Missing required environment variable")?;
    tracing::info!("Starting Interview Prep server on {}:{}", config.host, config.port);

    // 데이터베이스 연결 실패는 설정 오류이므로 서버를 띄우지 않고 종료합니다.
    let pool = db::connect(&config.database_url)
        .await
        .with_context(|| format!("Failed to connect to database at {}", config.database_url))?;

    tracing::info!("Running database migrations...");
    db::run_migrations(&pool).await?;

    let oracle = GeminiOracle::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_base_url.clone(),
    );
    tracing::info!(model = %config.gemini_model, "Generative AI client configured");

    let state = AppState::new(pool, config.jwt_secret.clone(), Arc::new(oracle));
    let app = build_router(state, Some(Path::new(&config.frontend_dist)));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

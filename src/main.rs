//! # 북마크 API 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 설정 로딩
//! 3. 로깅(tracing) 초기화
//! 4. SQLite 데이터베이스 연결 풀 생성과 테이블 준비
//! 5. API 라우터 설정
//! 6. HTTP 서버 시작

use std::sync::Arc;

use anyhow::{Context, Result};
use bookmarks::{app, config::Config, db::SqliteBookmarkStore, AppState};
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 설정 로딩 ──
    // 로그 기본 필터가 APP_ENV에 따라 달라지므로 로깅보다 먼저 읽습니다.
    let config = Config::from_env().context("DATABASE_URL and API_TOKEN must be set")?;

    // ── 3단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 있으면 그 값을, 없으면 실행 환경별 기본 필터를 사용합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.environment.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Starting bookmarks server on {} ({:?}, mounted at '{}')",
        config.addr(),
        config.environment,
        config.base_path
    );

    // ── 4단계: SQLite 연결 풀 생성 ──
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    // bookmarks 테이블이 없으면 만듭니다.
    tracing::info!("Preparing bookmarks table...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    // ── 5단계: 애플리케이션 상태(State)와 라우터 ──
    let state = AppState {
        store: Arc::new(SqliteBookmarkStore::new(pool)),
        api_token: config.api_token.clone(),
        base_path: config.base_path.clone(),
    };
    let router = app(state);

    // ── 6단계: 서버 시작 ──
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}

//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `API_TOKEN`: Bearer 인증에 쓰는 공유 비밀값 (필수)
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호
//! - `API_BASE_PATH`: API를 마운트할 경로 (기본값 `/api`)
//! - `APP_ENV`: 실행 환경 (`development`, `production`, `test`)

use std::env;

/// 실행 환경. 기본 로그 필터를 고르는 데 사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    /// 알 수 없는 값은 development로 취급합니다.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "test" => Self::Test,
            _ => Self::Development,
        }
    }

    /// `RUST_LOG`가 없을 때 사용할 tracing 필터
    pub fn default_log_filter(self) -> &'static str {
        match self {
            Self::Development => "bookmarks=debug,tower_http=debug,axum=debug",
            Self::Production => "bookmarks=info,tower_http=info",
            Self::Test => "warn",
        }
    }
}

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/bookmarks.db?mode=rwc")
    pub database_url: String,
    /// Authorization 헤더와 비교할 공유 비밀값
    pub api_token: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 8000)
    pub port: u16,
    /// 정규화된 API 마운트 경로. 빈 문자열이면 루트에 마운트합니다.
    pub base_path: String,
    pub environment: Environment,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`과 `API_TOKEN`은 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있어 환경변수가 없어도 동작합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            api_token: env::var("API_TOKEN")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            base_path: normalize_base_path(
                &env::var("API_BASE_PATH").unwrap_or_else(|_| "/api".to_string()),
            ),
            environment: Environment::parse(
                &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            ),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 마운트 경로를 `/segment` 형태로 맞춥니다.
///
/// - 앞에 `/`가 없으면 붙이고, 끝의 `/`는 제거합니다.
/// - `/`나 빈 문자열은 루트 마운트를 뜻하는 빈 문자열이 됩니다.
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

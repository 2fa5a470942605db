//! # 헬스체크(Health Check)와 루트 인사 핸들러
//!
//! ## 엔드포인트
//! - `GET /health` → `{ "status": "ok" }` (인증 없이 접근 가능, 로드밸런서용)
//! - `GET <base>/` → `Hello, world!` (인증 필요)

use axum::Json;
use serde_json::{json, Value};

/// `GET /health` — 서버 상태를 확인합니다.
///
/// State도 저장소도 사용하지 않으므로 실패하지 않습니다.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}

/// `GET <base>/` — API 루트 인사말
pub async fn hello() -> &'static str {
    "Hello, world!"
}

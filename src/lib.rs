//! # 북마크 API 라이브러리
//!
//! 서버 실행 파일(`main.rs`)과 통합 테스트(`tests/`)가 같은 라우터를 쓰도록
//! 모듈과 라우터 조립 함수를 여기서 공개합니다.
//!
//! 요청 흐름:
//! 요청 → 보안 헤더/CORS/로깅 레이어 → Bearer 토큰 검사 → 핸들러
//! → 검증(쓰기) → 저장소 → 정화(읽기) → JSON 응답

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use axum::{
    middleware::from_extractor_with_state,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::{with_security_headers, RequireToken};
use crate::routes::*;

pub use crate::routes::bookmarks::AppState;

/// 전체 애플리케이션 라우터를 조립합니다.
///
/// - `<base>/...`: Bearer 토큰이 필요한 API 라우트
/// - `/health`: 인증 없이 접근 가능한 헬스체크
pub fn app(state: AppState) -> Router {
    let base_path = state.base_path.clone();

    let api_routes = Router::new()
        .route("/", get(hello))
        .route("/bookmarks", get(list_bookmarks).post(create_bookmark))
        .route(
            "/bookmarks/{id}",
            get(get_bookmark).patch(update_bookmark).delete(delete_bookmark),
        )
        // route_layer: 매칭된 라우트에만 적용되므로 없는 경로는 인증 없이 404입니다.
        .route_layer(from_extractor_with_state::<RequireToken, AppState>(
            state.clone(),
        ))
        .with_state(state);

    let router = Router::new().route("/health", get(health_check));

    // axum은 루트("")에 nest할 수 없으므로 빈 마운트 경로는 merge합니다.
    let router = if base_path.is_empty() {
        router.merge(api_routes)
    } else {
        router.nest(&base_path, api_routes)
    };

    // CORS: 모든 출처, 메서드, 헤더 허용
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    with_security_headers(router)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

//! # 보안 응답 헤더
//!
//! 모든 응답에 브라우저 보안 헤더를 붙입니다.
//! 핸들러가 이미 같은 헤더를 설정했다면 덮어쓰지 않습니다 (`if_not_present`).

use axum::{
    http::{header, HeaderName, HeaderValue},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

/// 라우터에 보안 헤더 레이어들을 씌웁니다.
///
/// | 헤더 | 값 |
/// |------|----|
/// | X-Content-Type-Options | nosniff |
/// | X-Frame-Options | SAMEORIGIN |
/// | Referrer-Policy | no-referrer |
/// | X-DNS-Prefetch-Control | off |
/// | X-Download-Options | noopen |
pub fn with_security_headers(router: Router) -> Router {
    router
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_DNS_PREFETCH_CONTROL,
            HeaderValue::from_static("off"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("x-download-options"),
            HeaderValue::from_static("noopen"),
        ))
}

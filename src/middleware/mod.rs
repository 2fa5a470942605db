//! # 미들웨어 모듈
//!
//! - `auth`: 공유 비밀값 Bearer 토큰 검사 (Access Gate)
//! - `security`: helmet 스타일 보안 응답 헤더

pub mod auth;
pub mod security;

pub use auth::{AuthError, RequireToken};
pub use security::with_security_headers;

//! # 서비스 모듈
//!
//! HTTP나 DB를 모르는 순수 로직입니다.
//! - `validate`: 생성/수정 요청 검증
//! - `sanitize`: 응답 직전 XSS 정화

pub mod sanitize;
pub mod validate;

pub use sanitize::*;
pub use validate::*;

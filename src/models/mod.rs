//! # 데이터 모델 모듈
//!
//! - `bookmark`: 북마크 엔티티와 검증된 생성/수정 요청

pub mod bookmark;

pub use bookmark::*;

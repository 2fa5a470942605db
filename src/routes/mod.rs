//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `bookmarks`: 북마크 CRUD 핸들러와 공유 상태(`AppState`)
//! - `health`: 서버 상태 확인과 루트 인사

pub mod bookmarks;
pub mod health;

// `routes::list_bookmarks`처럼 바로 접근할 수 있게 재공개합니다.
pub use bookmarks::*;
pub use health::*;

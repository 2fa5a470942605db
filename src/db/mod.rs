//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 북마크 테이블과 직접 상호작용하는 저장소(Storage Gateway)입니다.
//! 라우트 핸들러(routes/)는 구체 타입이 아니라 `BookmarkStore` 트레잇에만 의존하므로,
//! 테스트에서는 메모리 기반 가짜 저장소로 바꿔 끼울 수 있습니다.
//!
//! 각 하위 모듈:
//! - `bookmarks`: SQLite 기반 구현 (`SqliteBookmarkStore`)

pub mod bookmarks;

pub use bookmarks::*;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Bookmark, BookmarkPatch, NewBookmark};

/// 북마크 저장소 계약
///
/// 모든 연산은 저장소 오류(`AppError::Database`)로 실패할 수 있으며,
/// 핸들러는 이를 재시도 없이 500으로 돌려줍니다.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// 전체 북마크를 id 오름차순으로 조회합니다. 없으면 빈 Vec입니다.
    async fn list(&self) -> Result<Vec<Bookmark>, AppError>;

    /// id로 북마크 하나를 조회합니다.
    async fn get_by_id(&self, id: &str) -> Result<Option<Bookmark>, AppError>;

    /// 새 id를 발급해 저장하고, 저장된 레코드 전체를 돌려줍니다.
    async fn insert(&self, new: &NewBookmark) -> Result<Bookmark, AppError>;

    /// 패치에 담긴 필드만 병합합니다. 영향받은 행 수(0 또는 1)를 돌려줍니다.
    async fn update(&self, id: &str, patch: &BookmarkPatch) -> Result<u64, AppError>;

    /// 삭제합니다. 영향받은 행 수(0 또는 1)를 돌려줍니다.
    async fn delete(&self, id: &str) -> Result<u64, AppError>;
}

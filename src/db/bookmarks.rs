//! # 북마크 데이터베이스 쿼리 모듈
//!
//! `BookmarkStore`의 SQLite 구현입니다.
//! 모든 메서드는 내부의 `SqlitePool`을 사용해 비동기로 실행됩니다.
//!
//! ## 테이블 구조
//! - `bookmarks`: id, title, url, description, rating

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::BookmarkStore;
use crate::error::AppError;
use crate::models::*;

/// SQLite 연결 풀 위에서 동작하는 북마크 저장소
///
/// `SqlitePool`은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct SqliteBookmarkStore {
    pool: SqlitePool,
}

impl SqliteBookmarkStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookmarkStore for SqliteBookmarkStore {
    /// 모든 북마크를 id순으로 조회합니다.
    ///
    /// id가 UUIDv7이므로 id 정렬은 곧 생성 순서입니다.
    async fn list(&self) -> Result<Vec<Bookmark>, AppError> {
        let bookmarks = sqlx::query_as::<_, Bookmark>(
            "SELECT id, title, url, description, rating FROM bookmarks ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(bookmarks)
    }

    /// `fetch_optional`은 결과가 0행이면 None, 1행이면 Some(Bookmark)을 반환합니다.
    async fn get_by_id(&self, id: &str) -> Result<Option<Bookmark>, AppError> {
        let bookmark = sqlx::query_as::<_, Bookmark>(
            "SELECT id, title, url, description, rating FROM bookmarks WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bookmark)
    }

    /// 새 북마크를 저장하고 저장된 북마크를 반환합니다.
    ///
    /// 저장 직후 다시 조회하여, 실제로 테이블에 들어간 값을 돌려줍니다.
    async fn insert(&self, new: &NewBookmark) -> Result<Bookmark, AppError> {
        let id = uuid::Uuid::now_v7().to_string();

        sqlx::query(
            r#"
            INSERT INTO bookmarks (id, title, url, description, rating)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&new.title)
        .bind(&new.url)
        .bind(&new.description) // None이면 SQL NULL
        .bind(new.rating)
        .execute(&self.pool)
        .await?;

        self.get_by_id(&id)
            .await?
            .ok_or(AppError::Internal("Failed to retrieve created bookmark".to_string()))
    }

    /// 부분 업데이트 (PATCH 방식)
    ///
    /// `COALESCE(?, column)`: 바인딩 값이 NULL(= 패치에 없는 필드)이면 기존 값을 유지합니다.
    async fn update(&self, id: &str, patch: &BookmarkPatch) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE bookmarks
            SET title       = COALESCE(?, title),
                url         = COALESCE(?, url),
                description = COALESCE(?, description),
                rating      = COALESCE(?, rating)
            WHERE id = ?
            "#,
        )
        .bind(&patch.title)
        .bind(&patch.url)
        .bind(&patch.description)
        .bind(patch.rating)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &str) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        // rows_affected(): 이 쿼리로 영향받은 행 수
        Ok(result.rows_affected())
    }
}

//! # 북마크 모델 정의
//!
//! 북마크(Bookmark) 리소스에서 사용하는 데이터 구조체들을 정의합니다.
//!
//! ## 구조체 역할
//! - `Bookmark`: 데이터베이스에 저장된 북마크 한 행 (응답용)
//! - `NewBookmark`: 검증을 통과한 생성 요청 (`POST /bookmarks`)
//! - `BookmarkPatch`: 검증을 통과한 부분 수정 요청 (`PATCH /bookmarks/{id}`)
//!
//! 요청 본문은 곧바로 이 구조체들로 역직렬화하지 않습니다.
//! 필드 누락/타입 오류마다 정해진 메시지를 돌려줘야 하므로,
//! 먼저 `serde_json::Map`으로 받은 뒤 `services::validate`가 변환합니다.

use serde::{Deserialize, Serialize};

/// 북마크 엔티티 — DB의 `bookmarks` 테이블 한 행(row)에 대응합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bookmark {
    /// 고유 식별자 (UUIDv7 문자열). 생성 후 변경되지 않습니다.
    pub id: String,
    /// 제목 (비어 있지 않음)
    pub title: String,
    /// http/https 절대 URL. 정화 대상이 아닙니다.
    pub url: String,
    /// 설명. 없으면 JSON `null`
    pub description: Option<String>,
    /// 0~5 사이 정수 평점
    pub rating: i64,
}

/// 생성 요청 — 검증기가 필수 필드를 모두 확인한 뒤에만 만들어집니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub rating: i64,
}

/// 부분 수정 요청
///
/// `None`인 필드는 저장된 값을 그대로 유지합니다 (병합 방식, 교체 아님).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<i64>,
}

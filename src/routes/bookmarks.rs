//! # 북마크(Bookmark) 라우트 핸들러
//!
//! 북마크의 CRUD(생성/조회/수정/삭제)를 처리하는 HTTP 핸들러 함수들입니다.
//!
//! ## 엔드포인트 (`<base>`는 `API_BASE_PATH`, 기본값 `/api`)
//! | 메서드 | 경로 | 핸들러 | 성공 |
//! |--------|------|--------|------|
//! | GET | `<base>/bookmarks` | `list_bookmarks` | 200, 정화된 배열 |
//! | POST | `<base>/bookmarks` | `create_bookmark` | 201 + Location |
//! | GET | `<base>/bookmarks/{id}` | `get_bookmark` | 200 |
//! | PATCH | `<base>/bookmarks/{id}` | `update_bookmark` | 204 |
//! | DELETE | `<base>/bookmarks/{id}` | `delete_bookmark` | 204 |
//!
//! ## 처리 흐름
//! 쓰기: 본문 파싱 → 검증(`services::validate`) → 저장소
//! 읽기: 저장소 → 정화(`services::sanitize`) → JSON
//!
//! PATCH와 DELETE는 존재 여부를 먼저 확인합니다.
//! 없는 리소스는 본문이 잘못되었더라도 항상 404입니다.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};

use crate::{
    db::BookmarkStore,
    error::AppError,
    models::*,
    services::{sanitize_bookmark, validate_create, validate_update},
};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 요청 사이에 바뀌는 값은 없습니다. 저장소만 트레잇 객체로 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 북마크 저장소 (SQLite 구현 또는 테스트용 가짜)
    pub store: Arc<dyn BookmarkStore>,
    /// Bearer 토큰 검사에 쓰는 공유 비밀값
    pub api_token: String,
    /// 정규화된 마운트 경로. Location 헤더를 만들 때 사용합니다.
    pub base_path: String,
}

/// `GET /bookmarks` — 전체 북마크 목록을 조회합니다.
pub async fn list_bookmarks(
    State(state): State<AppState>,
) -> Result<Json<Vec<Bookmark>>, AppError> {
    // `?`: 저장소 에러(AppError)를 그대로 반환 → HTTP 500
    let bookmarks = state.store.list().await?;

    // 저장된 원본은 그대로 두고, 응답으로 나가는 사본만 정화합니다.
    Ok(Json(bookmarks.into_iter().map(sanitize_bookmark).collect()))
}

/// `GET /bookmarks/{id}` — 단일 북마크를 조회합니다.
pub async fn get_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Bookmark>, AppError> {
    let bookmark = find_bookmark(&state, &id).await?;
    Ok(Json(sanitize_bookmark(bookmark)))
}

/// `POST /bookmarks` — 새 북마크를 생성합니다.
///
/// 성공하면 201과 함께 `Location: <base>/bookmarks/<id>` 헤더,
/// 정화된 레코드를 돌려줍니다.
pub async fn create_bookmark(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let body = parse_object(&body)?;
    // ValidationError → AppError::Validation 변환은 #[from] 덕분에 `?` 하나로 끝납니다.
    let new = validate_create(&body)?;

    // 검증을 통과한 원본 값을 저장합니다. 정화는 응답 직전에만 합니다.
    let bookmark = state.store.insert(&new).await?;
    tracing::info!("Bookmark with id {} created", bookmark.id);

    let location = format!("{}/bookmarks/{}", state.base_path, bookmark.id);

    // (상태 코드, 헤더 배열, 본문) 튜플도 IntoResponse를 구현합니다.
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(sanitize_bookmark(bookmark)),
    ))
}

/// `PATCH /bookmarks/{id}` — 북마크를 부분 수정합니다.
///
/// 본문에 없는 필드는 저장된 값을 그대로 유지합니다.
pub async fn update_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    // 존재 여부 확인이 먼저입니다. 없는 리소스는 본문과 관계없이 404
    find_bookmark(&state, &id).await?;

    let body = parse_object(&body)?;
    let patch = validate_update(&body)?;

    // 확인과 수정 사이에 다른 요청이 삭제했을 수 있습니다.
    if state.store.update(&id, &patch).await? == 0 {
        tracing::info!("Bookmark with id {} not found.", id);
        return Err(AppError::NotFound);
    }

    tracing::info!("Bookmark with id {} updated.", id);
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /bookmarks/{id}` — 북마크를 삭제합니다. 삭제는 즉시, 영구적입니다.
pub async fn delete_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    find_bookmark(&state, &id).await?;

    // rows_affected가 0이면 확인 직후 다른 요청이 먼저 지운 경우입니다.
    if state.store.delete(&id).await? == 0 {
        tracing::info!("Bookmark with id {} not found.", id);
        return Err(AppError::NotFound);
    }

    tracing::info!("Bookmark with id {} deleted.", id);
    Ok(StatusCode::NO_CONTENT)
}

/// 저장된 북마크를 찾고, 없으면 404로 바꿉니다.
async fn find_bookmark(state: &AppState, id: &str) -> Result<Bookmark, AppError> {
    // ok_or_else(): Option<Bookmark>를 Result<Bookmark, AppError>로 변환
    // None이면 NotFound → HTTP 404
    state.store.get_by_id(id).await?.ok_or_else(|| {
        tracing::info!("Bookmark with id {} not found.", id);
        AppError::NotFound
    })
}

/// 요청 본문을 JSON 객체로 해석합니다. 빈 본문은 빈 객체입니다.
fn parse_object(body: &[u8]) -> Result<Map<String, Value>, AppError> {
    // 본문 없는 PATCH는 "필드 없음" 검증 에러로 이어지도록 빈 객체로 취급합니다.
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    // Value로 먼저 받아서 "JSON 아님"과 "객체 아님"을 구분합니다.
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
        Err(_) => Err(AppError::BadRequest(
            "Request body must be valid JSON".to_string(),
        )),
    }
}

//! 통합 테스트 공용 도구
//!
//! - `MemoryStore`: `BookmarkStore`의 메모리 기반 가짜 구현
//! - `FailingStore`: 모든 연산이 저장소 오류로 실패하는 구현
//! - 요청 생성/전송 헬퍼

#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use bookmarks::{
    app,
    db::BookmarkStore,
    error::AppError,
    models::{Bookmark, BookmarkPatch, NewBookmark},
    AppState,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const TOKEN: &str = "test-api-token";
pub const BASE: &str = "/api";

/// 메모리 기반 가짜 저장소. 호출 횟수를 세어 인증 단락 여부를 확인할 수 있습니다.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Bookmark>>,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn with(rows: Vec<Bookmark>) -> Self {
        Self {
            rows: Mutex::new(rows),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self, id: &str) -> Option<Bookmark> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned()
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Bookmark>, AppError> {
        self.touch();
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(rows)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Bookmark>, AppError> {
        self.touch();
        Ok(self.snapshot(id))
    }

    async fn insert(&self, new: &NewBookmark) -> Result<Bookmark, AppError> {
        self.touch();
        let bookmark = Bookmark {
            id: uuid::Uuid::now_v7().to_string(),
            title: new.title.clone(),
            url: new.url.clone(),
            description: new.description.clone(),
            rating: new.rating,
        };
        self.rows.lock().unwrap().push(bookmark.clone());
        Ok(bookmark)
    }

    async fn update(&self, id: &str, patch: &BookmarkPatch) -> Result<u64, AppError> {
        self.touch();
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|b| b.id == id) {
            Some(row) => {
                *row = merge_patch(patch, row);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &str) -> Result<u64, AppError> {
        self.touch();
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|b| b.id != id);
        Ok((before - rows.len()) as u64)
    }
}

/// 패치를 저장된 레코드에 병합합니다. `None`인 필드는 기존 값을 유지합니다.
///
/// SQLite 구현의 `COALESCE(?, column)`과 같은 규칙이며, 가짜 저장소의 `update`와
/// SQLite 저장소 결과 비교에 함께 씁니다.
pub fn merge_patch(patch: &BookmarkPatch, bookmark: &Bookmark) -> Bookmark {
    Bookmark {
        id: bookmark.id.clone(),
        title: patch.title.clone().unwrap_or_else(|| bookmark.title.clone()),
        url: patch.url.clone().unwrap_or_else(|| bookmark.url.clone()),
        description: patch
            .description
            .clone()
            .or_else(|| bookmark.description.clone()),
        rating: patch.rating.unwrap_or(bookmark.rating),
    }
}

/// 연결이 끊긴 데이터베이스를 흉내 냅니다.
pub struct FailingStore;

#[async_trait]
impl BookmarkStore for FailingStore {
    async fn list(&self) -> Result<Vec<Bookmark>, AppError> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn get_by_id(&self, _id: &str) -> Result<Option<Bookmark>, AppError> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn insert(&self, _new: &NewBookmark) -> Result<Bookmark, AppError> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn update(&self, _id: &str, _patch: &BookmarkPatch) -> Result<u64, AppError> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn delete(&self, _id: &str) -> Result<u64, AppError> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }
}

pub fn bookmark(id: &str, title: &str, url: &str, description: &str, rating: i64) -> Bookmark {
    Bookmark {
        id: id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        description: Some(description.to_string()),
        rating,
    }
}

pub fn fixtures() -> Vec<Bookmark> {
    vec![
        bookmark("1", "CNN", "https://www.cnn.com", "Neo-liberal news source", 3),
        bookmark("2", "FOX", "https://www.fox.com", "Right wing news source", 1),
        bookmark("3", "Market Watch", "https://www.marketwatch.com", "Financial news", 5),
    ]
}

/// (저장된 원본, 응답에서 기대하는 정화 결과)
pub fn malicious_bookmark() -> (Bookmark, Bookmark) {
    let malicious = bookmark(
        "911",
        r#"Naughty naughty very naughty <script>alert("xss");</script>"#,
        "https://www.hackers.com",
        r#"Bad image <img src="https://url.to.file.which/does-not.exist" onerror="alert(document.cookie);">. But not <strong>all</strong> bad."#,
        1,
    );
    let expected = Bookmark {
        title: r#"Naughty naughty very naughty &lt;script&gt;alert("xss");&lt;/script&gt;"#
            .to_string(),
        description: Some(
            r#"Bad image <img src="https://url.to.file.which/does-not.exist">. But not <strong>all</strong> bad."#
                .to_string(),
        ),
        ..malicious.clone()
    };
    (malicious, expected)
}

pub fn router_with(store: Arc<dyn BookmarkStore>, base_path: &str) -> Router {
    app(AppState {
        store,
        api_token: TOKEN.to_string(),
        base_path: base_path.to_string(),
    })
}

pub fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    request_with_auth(method, uri, body, Some(&format!("Bearer {}", TOKEN)))
}

pub fn request_with_auth(
    method: Method,
    uri: &str,
    body: Option<Value>,
    authorization: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub raw: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.raw).expect("response body should be JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.raw.clone()).expect("response body should be UTF-8")
    }

    pub fn error_message(&self) -> String {
        self.json()["error"]["message"]
            .as_str()
            .expect("error body should carry a message")
            .to_string()
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let raw = response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec();
    TestResponse {
        status,
        headers,
        raw,
    }
}

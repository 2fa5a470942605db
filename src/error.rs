//! # 에러 처리 모듈
//!
//! 북마크 API에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! 응답 본문 형태: `{ "error": { "message": "..." } }`
//!
//! 400은 info 레벨, 500은 error 레벨로 기록합니다. 500의 상세 내용은 로그에만 남습니다.

use axum::{
    http::StatusCode,                   // HTTP 상태 코드 (400, 404, 500 등)
    response::{IntoResponse, Response}, // Axum의 응답 변환 트레이트
    Json,                               // JSON 응답 래퍼
};
use serde_json::json; // json! 매크로: JSON 객체를 간편하게 생성
use thiserror::Error;

use crate::services::ValidationError;

/// 404 응답의 고정 메시지
pub const NOT_FOUND_MESSAGE: &str = "Bookmark Not Found";

// #[derive(Debug, Error)]
// - Debug: 디버깅용 출력 ({:?})
// - Error (thiserror): #[error("...")]로 Display 메시지까지 자동 구현합니다.
/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 북마크가 없음 (HTTP 404)
    #[error("Bookmark Not Found")]
    NotFound,

    /// 필드 규칙 위반 (HTTP 400)
    /// #[from]: `?` 연산자로 ValidationError → AppError 자동 변환
    // transparent: Display를 안쪽 ValidationError에 그대로 위임합니다.
    // 검증 메시지가 곧 응답 메시지이므로 접두어를 붙이지 않습니다.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// 본문을 JSON 객체로 해석할 수 없음 (HTTP 400)
    #[error("{0}")]
    BadRequest(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx 함수 결과에 `?`를 쓰면 자동으로 AppError::Database가 됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, Internal)는 실제 에러 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        // match: variant마다 (상태 코드, 메시지) 튜플을 만듭니다.
        // 새 variant를 추가하면 여기서 컴파일 에러가 나므로 빠뜨릴 수 없습니다.
        let (status, message) = match self {
            // 404는 항상 같은 문구를 씁니다.
            AppError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string()),

            // ref: self를 이동(move)하지 않고 안쪽 값을 참조로 빌려옵니다.
            AppError::Validation(ref e) => {
                tracing::info!("Rejected bookmark payload: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::BadRequest(ref msg) => {
                tracing::info!("Rejected request body: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Internal(ref msg) => {
                // 상세 내용은 서버 로그에만 남깁니다.
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    // 클라이언트에는 일반 메시지만 (내부 구현 노출 방지)
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        // 결과: { "error": { "message": "Bookmark Not Found" } }
        let body = Json(json!({
            "error": {
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

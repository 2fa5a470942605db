use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::routes::bookmarks::AppState;

/// `Authorization: Bearer <API_TOKEN>`을 통과한 요청
///
/// 라우터에 `from_extractor_with_state`로 걸어 두면 핸들러가 실행되기 전에 검사됩니다.
#[derive(Debug, Clone, Copy)]
pub struct RequireToken;

impl FromRequestParts<AppState> for RequireToken {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                tracing::warn!("Unauthorized request to path: {}", parts.uri.path());
                AuthError::MissingToken
            })?;

        match bearer_token(auth_header) {
            Some(token) if token == state.api_token => Ok(RequireToken),
            _ => {
                tracing::warn!("Unauthorized request to path: {}", parts.uri.path());
                Err(AuthError::InvalidToken)
            }
        }
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingToken => "Authorization token is required",
            AuthError::InvalidToken => "Invalid authorization token",
        };

        let body = Json(json!({
            "error": {
                "message": message
            }
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// `Bearer <token>`에서 토큰을 꺼냅니다. 스킴 이름은 대소문자를 구분하지 않습니다.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

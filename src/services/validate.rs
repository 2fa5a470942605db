//! # 북마크 요청 검증 서비스
//!
//! 클라이언트가 보낸 JSON 객체를 검사하여 정규화된 레코드(`NewBookmark`,
//! `BookmarkPatch`)로 바꾸거나, 위반한 규칙 **하나**를 설명하는 에러를 돌려줍니다.
//!
//! ## 검사 순서 (첫 번째 위반만 보고)
//! 1. 필수 필드 누락 (생성 모드: title → url → rating)
//! 2. rating 형식/범위
//! 3. url 형식
//! 4. title/description 타입
//!
//! ## "제공됨" 판정
//! 키가 있고, 값이 `null`이 아니며, 빈 문자열(공백만 있는 문자열 포함)이 아니면
//! 제공된 것으로 봅니다. 숫자는 항상 제공된 것으로 봅니다 (평점 0은 유효).
//!
//! 이 모듈의 함수들은 순수 함수입니다. DB나 로그에 접근하지 않습니다.

use serde_json::{Map, Value};
use thiserror::Error;
use url::Url;

use crate::models::{BookmarkPatch, NewBookmark};

/// 허용하는 평점 범위 (양 끝 포함)
pub const RATING_RANGE: std::ops::RangeInclusive<i64> = 0..=5;

/// 검증 실패 사유. `Display` 문자열이 곧 400 응답 메시지입니다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{0}' is required")]
    Missing(&'static str),

    #[error("'rating' must be a number between 0 and 5")]
    InvalidRating,

    #[error("'url' must be a valid URL")]
    InvalidUrl,

    #[error("'{0}' must be a string")]
    NotAString(&'static str),

    #[error("Request body must contain either 'title', 'url', 'description', or 'rating'")]
    EmptyPatch,
}

/// 검증 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// title, url, rating 필수
    Create,
    /// 모든 필드 선택, 단 최소 하나는 제공되어야 함
    Update,
}

/// 검증을 통과한 후보 레코드
///
/// 생성 모드에서는 title/url/rating이 반드시 `Some`입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<i64>,
}

/// 모드에 맞춰 요청 본문을 검증합니다.
pub fn validate(body: &Map<String, Value>, mode: Mode) -> Result<Candidate, ValidationError> {
    let title = provided(body, "title");
    let url = provided(body, "url");
    let description = provided(body, "description");
    let rating = provided(body, "rating");

    match mode {
        Mode::Create => {
            if title.is_none() {
                return Err(ValidationError::Missing("title"));
            }
            if url.is_none() {
                return Err(ValidationError::Missing("url"));
            }
            if rating.is_none() {
                return Err(ValidationError::Missing("rating"));
            }
        }
        Mode::Update => {
            if title.is_none() && url.is_none() && description.is_none() && rating.is_none() {
                return Err(ValidationError::EmptyPatch);
            }
        }
    }

    let rating = rating.map(parse_rating).transpose()?;
    let url = url.map(parse_url).transpose()?;
    let title = title.map(|v| as_string(v, "title")).transpose()?;
    let description = description
        .map(|v| as_string(v, "description"))
        .transpose()?;

    Ok(Candidate {
        title,
        url,
        description,
        rating,
    })
}

/// 생성 요청을 검증합니다.
pub fn validate_create(body: &Map<String, Value>) -> Result<NewBookmark, ValidationError> {
    let candidate = validate(body, Mode::Create)?;
    // 생성 모드 검증을 통과했다면 세 필드는 모두 채워져 있습니다.
    match candidate {
        Candidate {
            title: Some(title),
            url: Some(url),
            description,
            rating: Some(rating),
        } => Ok(NewBookmark {
            title,
            url,
            description,
            rating,
        }),
        Candidate { title: None, .. } => Err(ValidationError::Missing("title")),
        Candidate { url: None, .. } => Err(ValidationError::Missing("url")),
        Candidate { rating: None, .. } => Err(ValidationError::Missing("rating")),
    }
}

/// 부분 수정 요청을 검증합니다.
pub fn validate_update(body: &Map<String, Value>) -> Result<BookmarkPatch, ValidationError> {
    let candidate = validate(body, Mode::Update)?;
    Ok(BookmarkPatch {
        title: candidate.title,
        url: candidate.url,
        description: candidate.description,
        rating: candidate.rating,
    })
}

/// 필드가 "제공됨" 판정을 통과하면 그 값을 돌려줍니다.
fn provided<'a>(body: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    match body.get(field)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        value => Some(value),
    }
}

/// 평점을 0~5 정수로 변환합니다.
///
/// 정수, 소수부가 0인 실수(`3.0`), 숫자 문자열(`"3"`)을 받아들입니다.
fn parse_rating(value: &Value) -> Result<i64, ValidationError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() && n.fract() == 0.0 => {
            let rating = n as i64;
            if RATING_RANGE.contains(&rating) {
                Ok(rating)
            } else {
                Err(ValidationError::InvalidRating)
            }
        }
        _ => Err(ValidationError::InvalidRating),
    }
}

/// http/https 절대 URL인지 확인하고, 호출자가 보낸 문자열을 그대로 돌려줍니다.
///
/// 저장되는 값이 곧 검사한 값이어야 하므로, WHATWG 파서가 조용히 고쳐 주는 입력
/// (`http:example.com`, `https:\\host`, 앞뒤 공백, 중간의 탭)은 파싱 전에 거절합니다.
fn parse_url(value: &Value) -> Result<String, ValidationError> {
    let Value::String(raw) = value else {
        return Err(ValidationError::InvalidUrl);
    };

    if !is_plain_web_uri(raw) {
        return Err(ValidationError::InvalidUrl);
    }

    let parsed = Url::parse(raw).map_err(|_| ValidationError::InvalidUrl)?;
    let web_scheme = matches!(parsed.scheme(), "http" | "https");
    let has_host = parsed.host_str().is_some_and(|host| !host.is_empty());

    if web_scheme && has_host {
        Ok(raw.clone())
    } else {
        Err(ValidationError::InvalidUrl)
    }
}

/// 공백, 제어 문자, 역슬래시가 없고 `<scheme>://`로 시작하는지 확인합니다.
fn is_plain_web_uri(raw: &str) -> bool {
    if raw
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || c == '\\')
    {
        return false;
    }

    // 스킴 이름은 대소문자를 구분하지 않습니다 (HTTPS://example.com 허용).
    let Some((scheme, rest)) = raw.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    let scheme_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    scheme_ok && !rest.is_empty() && !rest.starts_with('/')
}

fn as_string(value: &Value, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(ValidationError::NotAString(field)),
    }
}

//! # 북마크 정화(XSS 필터) 서비스
//!
//! 저장된 북마크를 클라이언트에게 돌려주기 직전에 `title`과 `description`의
//! 위험한 마크업을 무력화합니다. `url`, `id`, `rating`은 건드리지 않습니다.
//!
//! ## 동작 방식 (허용 목록 기반)
//! - 허용된 태그(`<strong>`, `<img>` 등)는 허용된 속성만 남겨 다시 조립합니다.
//!   `onerror` 같은 이벤트 핸들러 속성은 허용 목록에 없으므로 사라집니다.
//! - 그 밖의 태그는 꺾쇠를 이스케이프합니다: `<script>` → `&lt;script&gt;`
//! - 태그가 아닌 텍스트의 `<`, `>`도 이스케이프합니다.
//!
//! 출력에는 허용 태그 외의 `<`, `>`가 남지 않으므로 같은 함수를 다시 적용해도
//! 결과가 바뀌지 않습니다 (멱등성).
//!
//! 쓰기 경로에서는 호출하지 않습니다. 저장소에는 항상 원본이 남습니다.

use crate::models::Bookmark;

/// 허용 태그와 각 태그에서 허용하는 속성
const ALLOWED_TAGS: &[(&str, &[&str])] = &[
    ("a", &["href", "title", "target"]),
    ("abbr", &["title"]),
    ("b", &[]),
    ("blockquote", &["cite"]),
    ("br", &[]),
    ("code", &[]),
    ("del", &[]),
    ("em", &[]),
    ("h1", &[]),
    ("h2", &[]),
    ("h3", &[]),
    ("h4", &[]),
    ("h5", &[]),
    ("h6", &[]),
    ("hr", &[]),
    ("i", &[]),
    ("img", &["src", "alt", "title", "width", "height"]),
    ("li", &[]),
    ("ol", &[]),
    ("p", &[]),
    ("pre", &[]),
    ("s", &[]),
    ("small", &[]),
    ("span", &[]),
    ("strong", &[]),
    ("sub", &[]),
    ("sup", &[]),
    ("u", &[]),
    ("ul", &[]),
];

/// 링크 속성에서 허용하는 스킴
const SAFE_SCHEMES: &[&str] = &["http:", "https:", "mailto:", "tel:"];

/// 응답용 북마크를 만듭니다. `title`과 `description`만 필터를 거칩니다.
pub fn sanitize_bookmark(bookmark: Bookmark) -> Bookmark {
    Bookmark {
        title: filter_xss(&bookmark.title),
        description: bookmark.description.as_deref().map(filter_xss),
        ..bookmark
    }
}

/// 자유 텍스트에서 스크립트를 실행할 수 있는 마크업을 무력화합니다.
pub fn filter_xss(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        escape_text(&rest[..start], &mut out);
        let candidate = &rest[start..];

        match tag_end(candidate) {
            Some(end) => {
                render_tag(&candidate[..=end], &mut out);
                rest = &candidate[end + 1..];
            }
            None => {
                // 닫히지 않는 '<'는 태그가 아니라 텍스트입니다.
                out.push_str("&lt;");
                rest = &candidate[1..];
            }
        }
    }

    escape_text(rest, &mut out);
    out
}

/// `<`로 시작하는 문자열에서 태그를 닫는 `>`의 위치를 찾습니다.
///
/// 따옴표 안의 `<`, `>`는 무시합니다. 따옴표 밖에서 다른 `<`를 먼저 만나거나
/// 끝까지 `>`가 없으면 `None`입니다.
fn tag_end(candidate: &str) -> Option<usize> {
    let mut quote: Option<char> = None;

    for (i, c) in candidate.char_indices().skip(1) {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '<' => return None,
                '>' => return Some(i),
                _ => {}
            },
        }
    }

    None
}

fn render_tag(tag: &str, out: &mut String) {
    let inner = &tag[1..tag.len() - 1];
    let (closing, body) = match inner.strip_prefix('/') {
        Some(body) => (true, body),
        None => (false, inner),
    };

    let name_len = body
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    let name = body[..name_len].to_ascii_lowercase();

    let Some(allowed_attrs) = allowed_attributes(&name) else {
        escape_text(tag, out);
        return;
    };

    if closing {
        out.push_str("</");
        out.push_str(&name);
        out.push('>');
        return;
    }

    out.push('<');
    out.push_str(&name);

    for (attr, value) in parse_attributes(&body[name_len..]) {
        if !allowed_attrs.contains(&attr.as_str()) {
            continue;
        }
        match value {
            Some(value) => {
                if matches!(attr.as_str(), "href" | "src" | "cite") && !is_safe_link(&value) {
                    continue;
                }
                out.push(' ');
                out.push_str(&attr);
                out.push_str("=\"");
                escape_attribute(&value, out);
                out.push('"');
            }
            None => {
                out.push(' ');
                out.push_str(&attr);
            }
        }
    }

    if body.trim_end().ends_with('/') {
        out.push_str(" /");
    }
    out.push('>');
}

fn allowed_attributes(name: &str) -> Option<&'static [&'static str]> {
    if name.is_empty() {
        return None;
    }
    ALLOWED_TAGS
        .iter()
        .find(|(tag, _)| *tag == name)
        .map(|(_, attrs)| *attrs)
}

/// 태그 이름 뒤의 속성 문자열을 (이름, 값) 목록으로 나눕니다.
///
/// 값이 없는 속성은 `None`입니다. 해석할 수 없는 조각은 버립니다.
fn parse_attributes(input: &str) -> Vec<(String, Option<String>)> {
    let mut attrs = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() || c == '/' {
            chars.next();
            continue;
        }

        if c == '"' || c == '\'' {
            // 속성 이름 자리에 온 따옴표 덩어리는 통째로 건너뜁니다.
            chars.next();
            for (_, next) in chars.by_ref() {
                if next == c {
                    break;
                }
            }
            continue;
        }

        let mut end = input.len();
        while let Some(&(i, next)) = chars.peek() {
            if next.is_whitespace() || matches!(next, '=' | '/' | '"' | '\'') {
                end = i;
                break;
            }
            chars.next();
        }
        let name = input[start..end].to_ascii_lowercase();

        while chars.peek().is_some_and(|&(_, next)| next.is_whitespace()) {
            chars.next();
        }

        let value = if chars.peek().is_some_and(|&(_, next)| next == '=') {
            chars.next();
            while chars.peek().is_some_and(|&(_, next)| next.is_whitespace()) {
                chars.next();
            }
            Some(read_value(input, &mut chars))
        } else {
            None
        };

        if !name.is_empty() {
            attrs.push((name, value));
        }
    }

    attrs
}

fn read_value(
    input: &str,
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
) -> String {
    let Some(&(start, first)) = chars.peek() else {
        return String::new();
    };

    if first == '"' || first == '\'' {
        chars.next();
        let mut end = input.len();
        for (i, next) in chars.by_ref() {
            if next == first {
                end = i;
                break;
            }
        }
        return input[start + 1..end].to_string();
    }

    let mut end = input.len();
    while let Some(&(i, next)) = chars.peek() {
        if next.is_whitespace() {
            end = i;
            break;
        }
        chars.next();
    }
    input[start..end].to_string()
}

/// 링크 속성 값이 안전한 스킴인지 확인합니다.
///
/// 스킴 자리(첫 `/`, `?`, `#` 앞)에 `:`나 문자 참조(`&#`, `&colon`)가 있으면
/// 허용 스킴으로 시작하는 경우에만 통과시킵니다. 상대 경로는 통과합니다.
fn is_safe_link(value: &str) -> bool {
    let normalized: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    // `&#58;`의 '#'은 프래그먼트가 아니라 문자 참조의 일부입니다.
    let mut prefix_end = normalized.len();
    let mut prev = '\0';
    for (i, c) in normalized.char_indices() {
        if c == '/' || c == '?' || (c == '#' && prev != '&') {
            prefix_end = i;
            break;
        }
        prev = c;
    }
    let prefix = &normalized[..prefix_end];

    if prefix.contains(':') || prefix.contains("&#") || prefix.contains("&colon") {
        SAFE_SCHEMES
            .iter()
            .any(|scheme| normalized.starts_with(scheme))
    } else {
        true
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

//! Response body decoding.
//!
//! Fetched bodies arrive as bytes. The charset is taken from the HTTP
//! `Content-Type` header when the server names one, otherwise from the first
//! `<meta>` declaration in the document head, otherwise UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Match `charset=...` inside a header value or `<meta>` tag.
#[allow(clippy::expect_used)]
static CHARSET_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;>]+)"#).expect("valid regex")
});

/// Match a `<meta ...charset...>` tag as a whole.
#[allow(clippy::expect_used)]
static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<meta[^>]+charset[^>]*>").expect("valid regex"));

/// Charset label from a `Content-Type` header value, if it carries one.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    CHARSET_PARAM_RE
        .captures(content_type)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Charset declared by a `<meta>` tag within the first 1024 bytes.
#[must_use]
pub fn charset_from_meta(html: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&html[..html.len().min(1024)]);
    let tag = META_TAG_RE.find(&head)?;
    charset_from_content_type(tag.as_str())
}

/// Decode a response body to a UTF-8 string.
///
/// Invalid sequences are replaced with U+FFFD instead of failing.
#[must_use]
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_from_content_type)
        .or_else(|| charset_from_meta(body))
        .unwrap_or(UTF_8);

    if encoding == UTF_8 {
        return String::from_utf8_lossy(body).into_owned();
    }

    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

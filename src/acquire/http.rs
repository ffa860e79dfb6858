//! Static acquisition over plain HTTP.

use reqwest::blocking::Client;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, CONTENT_TYPE, DNT,
    UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};
use url::Url;

use super::{FetchResult, FetchedPage};
use crate::dom;
use crate::encoding::decode_body;
use crate::error::Error;
use crate::options::Options;
use crate::trace::DebugTrace;

/// Header set of a desktop browser navigating to a page.
///
/// `Accept-Encoding` is left to reqwest, which advertises gzip, deflate and br
/// and only decompresses transparently when it set the header itself.
pub fn browser_headers(user_agent: &str) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent).map_err(|e| Error::Transport(format!("bad user agent: {e}")))?,
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(DNT, HeaderValue::from_static("1"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    Ok(headers)
}

/// GET `url` and parse the body.
///
/// Status and body size are traced before the status is checked, so a 404
/// still leaves both lines behind.
pub fn fetch(url: &Url, options: &Options, trace: &mut DebugTrace) -> FetchResult {
    let client = Client::builder()
        .default_headers(browser_headers(&options.user_agent)?)
        .timeout(options.timeout)
        .build()
        .map_err(|e| Error::Transport(e.to_string()))?;

    let response = client
        .get(url.clone())
        .send()
        .map_err(|e| Error::Transport(e.to_string()))?;

    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.bytes().map_err(|e| Error::Transport(e.to_string()))?;

    tracing::debug!(status = status.as_u16(), bytes = body.len(), "http response");
    trace.push(format!("HTTP Status: {}", status.as_u16()));
    trace.push(format!("Content Length: {} bytes", body.len()));

    if !status.is_success() {
        return Err(Error::HttpStatus(status.as_u16()));
    }

    let html = decode_body(&body, content_type.as_deref());

    Ok(FetchedPage {
        document: dom::parse(&html),
        url: url.clone(),
        status: Some(status.as_u16()),
        byte_length: body.len(),
    })
}

//! URL utilities for page addresses and link resolution.

use url::Url;

use crate::error::{Error, Result};

/// Parse the page URL the user asked for.
///
/// Only absolute `http`/`https` URLs with a host are accepted; anything else
/// cannot be fetched and cannot serve as a base for links.
pub fn parse_page_url(s: &str) -> Result<Url> {
    let s = s.trim();
    let url = Url::parse(s).map_err(|e| Error::InvalidUrl(format!("{s}: {e}")))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::InvalidUrl(format!("{s}: unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(Error::InvalidUrl(format!("{s}: missing host")));
    }

    Ok(url)
}

/// Resolve an `href` value against the page URL.
///
/// Absolute hrefs come back normalised; relative ones are joined the way a
/// browser would. The error is the `url` crate's message.
///
/// # Example
///
/// ```rust
/// use rs_colscrape::url_utils::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://example.org/list/page").unwrap();
/// assert_eq!(resolve_link("/item/1", &base).unwrap(), "https://example.org/item/1");
/// ```
pub fn resolve_link(href: &str, base: &Url) -> std::result::Result<String, String> {
    base.join(href.trim())
        .map(String::from)
        .map_err(|e| format!("cannot resolve '{href}': {e}"))
}

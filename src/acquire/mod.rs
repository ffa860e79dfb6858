//! Document acquisition.
//!
//! Two strategies produce the same [`FetchedPage`]:
//!
//! - [`http`]: one GET with a browser-like header set. Fast, runs no scripts.
//! - [`browser`]: loads the page in a controlled Chrome instance, waits a fixed
//!   time for scripts to populate the DOM, then captures the markup. Needs the
//!   `rendered` cargo feature.
//!
//! A fresh page is produced per call; nothing is cached between calls. Fetch
//! metadata is appended to the caller's trace on success and failure alike.

pub mod browser;
pub mod http;

use std::path::{Path, PathBuf};

use url::Url;

use crate::dom::{self, Document};
use crate::error::Result;
use crate::options::{Options, Strategy};
use crate::trace::DebugTrace;

/// A successfully retrieved and parsed page.
pub struct FetchedPage {
    pub document: Document,
    /// The URL that was requested; links are resolved against it.
    pub url: Url,
    /// HTTP status, when the strategy sees one (static only).
    pub status: Option<u16>,
    /// Size of the body or captured markup in bytes.
    pub byte_length: usize,
}

impl std::fmt::Debug for FetchedPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchedPage")
            .field("url", &self.url.as_str())
            .field("status", &self.status)
            .field("byte_length", &self.byte_length)
            .finish_non_exhaustive()
    }
}

/// Outcome of one acquisition.
pub type FetchResult = Result<FetchedPage>;

/// Retrieve `url` with the given strategy.
pub fn acquire(url: &Url, strategy: Strategy, options: &Options, trace: &mut DebugTrace) -> FetchResult {
    tracing::info!(url = %url, %strategy, "acquiring document");

    let result = match strategy {
        Strategy::Static => http::fetch(url, options, trace),
        Strategy::Rendered => browser::render(url, options, trace),
    };

    if let Err(e) = &result {
        tracing::warn!(url = %url, %strategy, error = %e, "acquisition failed");
    }
    result
}

/// Write the parsed document to `<dir>/scraped_page_<timestamp>.html`.
///
/// Returns the path written.
pub fn save_raw_document(doc: &Document, dir: &Path) -> Result<PathBuf> {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("scraped_page_{stamp}.html"));
    std::fs::write(&path, dom::document_html(doc).as_bytes())?;
    tracing::debug!(path = %path.display(), "raw document saved");
    Ok(path)
}

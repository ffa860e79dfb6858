//! Configuration options for acquisition and scraping.
//!
//! The `Options` struct carries every scalar knob a caller can turn. The
//! extraction core itself takes no options; these only shape how the document
//! is fetched and what ends up in the debug trace.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Desktop Chrome user agent sent by both acquisition strategies.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// How the document is retrieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Single HTTP GET, no script execution.
    #[default]
    Static,
    /// Load the page in a controlled browser and capture the rendered markup.
    Rendered,
}

impl Strategy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Rendered => "rendered",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "rendered" | "js" | "browser" => Ok(Self::Rendered),
            other => Err(format!("unknown strategy '{other}' (expected static or rendered)")),
        }
    }
}

/// Configuration options for a scrape or inspection.
///
/// All fields are public. Use `Default::default()` for standard settings.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use rs_colscrape::{Options, Strategy};
///
/// let options = Options {
///     strategy: Strategy::Rendered,
///     render_wait: Duration::from_secs(5),
///     ..Options::default()
/// };
/// assert!(options.headless);
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Retrieval strategy.
    ///
    /// Default: `Strategy::Static`
    pub strategy: Strategy,

    /// HTTP request timeout for static acquisition.
    ///
    /// Default: 20 seconds
    pub timeout: Duration,

    /// Pause between consecutive requests.
    ///
    /// Advisory only: the library never sleeps on it, callers issuing several
    /// requests (the CLI) do.
    ///
    /// Default: 3 seconds
    pub delay: Duration,

    /// Fixed wait after navigation before the rendered document is captured.
    ///
    /// Default: 10 seconds
    pub render_wait: Duration,

    /// Run the browser without a visible window.
    ///
    /// Default: `true`
    pub headless: bool,

    /// Browser window size in pixels.
    ///
    /// Default: `(1920, 1080)`
    pub window_size: (u32, u32),

    /// User agent for both strategies.
    ///
    /// Default: [`DEFAULT_USER_AGENT`]
    pub user_agent: String,

    /// Append page inspection lines to the scrape trace.
    ///
    /// Default: `true`
    pub debug: bool,

    /// Write the fetched document to `raw_dir` before extraction.
    ///
    /// Default: `false`
    pub save_raw: bool,

    /// Directory receiving saved raw documents.
    ///
    /// Default: current directory
    pub raw_dir: PathBuf,

    /// Include a source preview in page reports.
    ///
    /// Default: `false`
    pub show_page_source: bool,

    /// Number of characters kept in the source preview.
    ///
    /// Default: `2000`
    pub source_preview_len: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            strategy: Strategy::Static,
            timeout: Duration::from_secs(20),
            delay: Duration::from_secs(3),
            render_wait: Duration::from_secs(10),
            headless: true,
            window_size: (1920, 1080),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            debug: true,
            save_raw: false,
            raw_dir: PathBuf::from("."),
            show_page_source: false,
            source_preview_len: 2000,
        }
    }
}

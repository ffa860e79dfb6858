//! Error types for rs-colscrape.
//!
//! The `Display` strings are shown to end users verbatim, so they are kept
//! short and stable.

/// Error type for acquisition, assembly and export operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The server answered with a non-2xx status.
    #[error("HTTP Error: {0}")]
    HttpStatus(u16),

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("Critical error: {0}")]
    Transport(String),

    /// Rendered acquisition was requested but no browser engine is compiled in.
    #[error("automation engine unavailable")]
    EngineUnavailable,

    /// The browser process could not be started.
    #[error("Failed to setup browser: {0}")]
    BrowserLaunch(String),

    /// The browser started but navigation or capture failed.
    #[error("Browser error: {0}")]
    Browser(String),

    /// The page URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Every column came back empty after extraction.
    #[error("No data found with the specified selectors")]
    NoDataFound,

    /// Assembly was handed columns whose longest length is zero.
    #[error("No data extracted")]
    NoDataExtracted,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for failures that happened while fetching the document.
    #[must_use]
    pub fn is_acquisition(&self) -> bool {
        matches!(
            self,
            Self::HttpStatus(_)
                | Self::Transport(_)
                | Self::EngineUnavailable
                | Self::BrowserLaunch(_)
                | Self::Browser(_)
                | Self::InvalidUrl(_)
        )
    }

    /// True for the terminal "nothing matched anywhere" failures.
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoDataFound | Self::NoDataExtracted)
    }
}

/// Result type alias for rs-colscrape operations.
pub type Result<T> = std::result::Result<T, Error>;

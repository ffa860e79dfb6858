//! Rendered acquisition through a controlled Chrome instance.
//!
//! Each call launches its own browser and owns it until return. The browser
//! process is killed when the session guard drops, which happens on every exit path
//! including early `?` returns and unwinding.

#[cfg(not(feature = "rendered"))]
use url::Url;

#[cfg(not(feature = "rendered"))]
use crate::{options::Options, trace::DebugTrace};

/// Whether this build can do rendered acquisition at all.
#[must_use]
pub const fn engine_available() -> bool {
    cfg!(feature = "rendered")
}

#[cfg(not(feature = "rendered"))]
pub fn render(url: &Url, _options: &Options, _trace: &mut DebugTrace) -> super::FetchResult {
    tracing::debug!(url = %url, "rendered acquisition requested without the `rendered` feature");
    Err(crate::error::Error::EngineUnavailable)
}

#[cfg(feature = "rendered")]
pub use engine::render;

#[cfg(feature = "rendered")]
mod engine {
    use std::ffi::OsStr;
    use std::fmt::Display;

    use headless_chrome::{Browser, LaunchOptions};
    use url::Url;

    use super::super::{FetchResult, FetchedPage};
    use crate::dom;
    use crate::error::Error;
    use crate::options::Options;
    use crate::trace::DebugTrace;

    /// Browser owned by a single acquisition.
    struct Session {
        browser: Browser,
    }

    impl Drop for Session {
        fn drop(&mut self) {
            tracing::debug!("closing browser session");
        }
    }

    fn browser_err(e: impl Display) -> Error {
        Error::Browser(e.to_string())
    }

    /// Navigate, sleep `options.render_wait`, capture the rendered markup.
    pub fn render(url: &Url, options: &Options, trace: &mut DebugTrace) -> FetchResult {
        let user_agent = format!("--user-agent={}", options.user_agent);
        let args: Vec<&OsStr> = vec![
            OsStr::new("--no-sandbox"),
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new("--disable-gpu"),
            OsStr::new(&user_agent),
        ];

        let launch = LaunchOptions::default_builder()
            .headless(options.headless)
            .sandbox(false)
            .window_size(Some(options.window_size))
            .args(args)
            .build()
            .map_err(|e| Error::BrowserLaunch(e.to_string()))?;

        let session = Session {
            browser: Browser::new(launch).map_err(|e| Error::BrowserLaunch(e.to_string()))?,
        };
        trace.push("Browser session initialized");

        capture(&session, url, options, trace)
    }

    fn capture(session: &Session, url: &Url, options: &Options, trace: &mut DebugTrace) -> FetchResult {
        let tab = session.browser.new_tab().map_err(browser_err)?;
        tab.set_user_agent(&options.user_agent, None, None)
            .map_err(browser_err)?;
        tab.navigate_to(url.as_str())
            .map_err(browser_err)?
            .wait_until_navigated()
            .map_err(browser_err)?;

        let title = tab.get_title().unwrap_or_default();
        trace.push(format!("Page loaded: {title}"));

        // Fixed wait, not a mutation observer.
        tracing::debug!(wait = ?options.render_wait, "waiting for dynamic content");
        std::thread::sleep(options.render_wait);

        let html = tab.get_content().map_err(browser_err)?;
        trace.push(format!("Page source length: {} characters", html.chars().count()));

        Ok(FetchedPage {
            document: dom::parse(&html),
            url: url.clone(),
            status: None,
            byte_length: html.len(),
        })
    }
}

#[cfg(all(test, not(feature = "rendered")))]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn render_without_engine_fails_fast() {
        let url = Url::parse("https://example.com/").expect("url");
        let mut trace = DebugTrace::new();
        let result = render(&url, &Options::default(), &mut trace);

        assert!(matches!(result, Err(Error::EngineUnavailable)));
        assert!(trace.is_empty());
        assert!(!engine_available());
    }
}

//! # rs-colscrape
//!
//! Column-oriented web scraping. Describe each output column by an HTML tag
//! and a CSS class, point it at a page, and get back a rectangular table that
//! can be exported as CSV or JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_colscrape::{dom, scrape_document, ColumnSpec, Tag};
//! use url::Url;
//!
//! let html = r#"<div class="card"><span class="name">Ann</span><span class="score">Score: 42</span></div>
//!               <div class="card"><span class="name">Bob</span></div>"#;
//! let doc = dom::parse(html);
//! let base = Url::parse("https://example.org/list").unwrap();
//!
//! let specs = [
//!     ColumnSpec::new("Name", Tag::Span, "name"),
//!     ColumnSpec::new("Score", Tag::Span, "score").numeric(),
//! ];
//! let outcome = scrape_document(&doc, &base, &specs);
//! let table = outcome.table.unwrap();
//! assert_eq!(table.len(), 2);
//! assert!(table.column("Score").unwrap()[1].is_absent());
//! ```
//!
//! ## How columns are matched
//!
//! Each column tries an exact class match, then a partial match on the
//! `.`-separated parts of the selector, then a plain CSS selector. The
//! [`DebugTrace`] records how many elements each attempt found, which is
//! usually the quickest way to see why a column came back empty.

mod error;
mod options;
mod patterns;

/// DOM capability accessors over `dom_query`.
pub mod dom;

/// Response body charset detection and decoding.
pub mod encoding;

/// Page URL parsing and link resolution.
pub mod url_utils;

/// Append-only diagnostic trace.
pub mod trace;

/// Static and rendered document acquisition.
pub mod acquire;

/// Page structure inspection.
pub mod inspect;

/// Selector resolution and value extraction.
pub mod extractor;

/// Padding of extracted columns into a table.
pub mod table;

/// CSV and JSON export.
pub mod export;

use url::Url;

// Public API - re-exports
pub use error::{Error, Result};
pub use extractor::{Column, ColumnSpec, ExtractedValue, MatchStrategy, Number, Tag};
pub use inspect::PageReport;
pub use options::{Options, Strategy, DEFAULT_USER_AGENT};
pub use table::ResultTable;
pub use trace::DebugTrace;

use crate::dom::Document;

/// Everything a scrape produced.
///
/// Returned on success and failure alike, so diagnostics gathered before a
/// failure are never lost.
#[derive(Debug, Clone, Default)]
pub struct ScrapeOutcome {
    /// `None` when acquisition failed or nothing was extracted.
    pub table: Option<ResultTable>,
    /// Display-ready failure messages, in the order they happened.
    pub errors: Vec<String>,
    pub trace: DebugTrace,
}

impl ScrapeOutcome {
    fn failed(error: &Error, trace: DebugTrace) -> Self {
        Self {
            table: None,
            errors: vec![error.to_string()],
            trace,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.table.is_some()
    }
}

/// Fetch `url` and extract `specs` from it.
///
/// With `options.debug` the page inspection lines follow the fetch metadata in
/// the trace. With `options.save_raw` the parsed document is written under
/// `options.raw_dir`; a failed write is reported in `errors` and the scrape
/// carries on.
#[must_use]
pub fn scrape(url: &str, specs: &[ColumnSpec], options: &Options) -> ScrapeOutcome {
    let mut trace = DebugTrace::new();

    let page = match url_utils::parse_page_url(url)
        .and_then(|url| acquire::acquire(&url, options.strategy, options, &mut trace))
    {
        Ok(page) => page,
        Err(e) => return ScrapeOutcome::failed(&e, trace),
    };

    if options.debug {
        trace.append(inspect::inspect(&page.document));
    }

    let mut errors = Vec::new();
    if options.save_raw {
        match acquire::save_raw_document(&page.document, &options.raw_dir) {
            Ok(path) => trace.push(format!("HTML saved to {}", path.display())),
            Err(e) => errors.push(format!("Failed to save HTML: {e}")),
        }
    }

    let outcome = scrape_document(&page.document, &page.url, specs);
    trace.append(outcome.trace);
    errors.extend(outcome.errors);

    tracing::info!(
        url,
        rows = outcome.table.as_ref().map_or(0, ResultTable::len),
        errors = errors.len(),
        "scrape finished"
    );

    ScrapeOutcome {
        table: outcome.table,
        errors,
        trace,
    }
}

/// Extract and assemble from an already parsed document.
///
/// No I/O. When every column is empty the error list ends with
/// "No data found with the specified selectors" and no table is returned.
#[must_use]
pub fn scrape_document(doc: &Document, base: &Url, specs: &[ColumnSpec]) -> ScrapeOutcome {
    let extraction = extractor::extract(doc, base, specs);
    let empty = extraction.is_empty();
    let extractor::Extraction {
        columns,
        mut errors,
        trace,
    } = extraction;

    if empty {
        errors.push(Error::NoDataFound.to_string());
        return ScrapeOutcome {
            table: None,
            errors,
            trace,
        };
    }

    let table = match table::assemble(columns) {
        Ok(table) => Some(table),
        Err(e) => {
            errors.push(e.to_string());
            None
        }
    };

    ScrapeOutcome { table, errors, trace }
}

/// Fetch `url` and report its structure.
///
/// The acquisition trace lines come first, followed by the inspection lines.
pub fn inspect_url(url: &str, options: &Options) -> Result<PageReport> {
    let url = url_utils::parse_page_url(url)?;
    let mut trace = DebugTrace::new();
    let page = acquire::acquire(&url, options.strategy, options, &mut trace)?;

    let preview = options.show_page_source.then_some(options.source_preview_len);
    let mut report = inspect::report(&page.document, preview);
    trace.append(report.trace);
    report.trace = trace;
    Ok(report)
}

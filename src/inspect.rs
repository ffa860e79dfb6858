//! Page structure inspection.
//!
//! Helps a user find working selectors before scraping: reports the page
//! title, how many distinct class names exist, and a few hints about whether
//! the content is script-rendered. Pure functions of the parsed document.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::dom::{self, Document};
use crate::patterns::CARD_CLASS;
use crate::trace::DebugTrace;

/// Printed in place of a title when the page has no `<title>`.
pub const NO_TITLE: &str = "No title found";

/// Structural facts about one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageFacts {
    pub title: Option<String>,
    /// Every distinct class token, sorted.
    pub classes: BTreeSet<String>,
    pub card_like: usize,
    pub scripts: usize,
    pub with_data_attributes: usize,
}

impl PageFacts {
    /// Collect the facts in a single pass over the elements.
    #[must_use]
    pub fn collect(doc: &Document) -> Self {
        let title = dom::elements_by_tag(doc, "title")
            .first()
            .map(dom::trimmed_text);

        let mut facts = Self {
            title,
            ..Self::default()
        };

        for el in dom::all_elements(doc) {
            if let Some(raw) = dom::class_name(&el) {
                if CARD_CLASS.is_match(&raw) {
                    facts.card_like += 1;
                }
                facts.classes.extend(dom::class_tokens(&el));
            }
            if dom::tag_name(&el).as_deref() == Some("script") {
                facts.scripts += 1;
            }
            if dom::attribute_names(&el).iter().any(|name| name.starts_with("data-")) {
                facts.with_data_attributes += 1;
            }
        }

        facts
    }

    /// Render as trace lines, in the fixed order users are used to.
    #[must_use]
    pub fn to_trace(&self) -> DebugTrace {
        let mut trace = DebugTrace::new();
        trace.push(format!("Page Title: {}", self.title.as_deref().unwrap_or(NO_TITLE)));
        trace.push(format!("Total unique CSS classes found: {}", self.classes.len()));
        trace.push(format!("Card-like elements found: {}", self.card_like));
        trace.push(format!("Script tags found: {}", self.scripts));
        trace.push(format!("Elements with data attributes: {}", self.with_data_attributes));
        trace
    }
}

/// Inspect `doc` and return the diagnostic lines.
#[must_use]
pub fn inspect(doc: &Document) -> DebugTrace {
    PageFacts::collect(doc).to_trace()
}

/// Result of the "debug page" action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageReport {
    pub trace: DebugTrace,
    /// Sorted distinct class tokens, for picking selectors from.
    pub classes: Vec<String>,
    /// Leading slice of the serialised document, when requested.
    pub source_preview: Option<String>,
}

/// Build a full page report; `preview_len` of `None` omits the source preview.
#[must_use]
pub fn report(doc: &Document, preview_len: Option<usize>) -> PageReport {
    let facts = PageFacts::collect(doc);
    let mut trace = facts.to_trace();

    if facts.classes.is_empty() {
        trace.push("No CSS classes found - this might be a JavaScript-heavy site");
    }

    let source_preview = preview_len.map(|n| dom::document_html(doc).chars().take(n).collect());

    PageReport {
        trace,
        classes: facts.classes.into_iter().collect(),
        source_preview,
    }
}

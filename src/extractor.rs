//! Column extraction.
//!
//! Each [`ColumnSpec`] names an HTML tag and a class selector. For every spec
//! the extractor resolves a list of matching elements by trying, in order:
//!
//! 1. **Exact class**: elements of the tag whose class attribute has the
//!    selector as one of its tokens, or equals it verbatim.
//! 2. **Partial class**: only when step 1 found nothing and the selector has a
//!    `.` in it. The selector is split on `.` and each non-empty part is used
//!    as a regex searched against the raw class attribute. Matches from every
//!    part are concatenated; an element hit by two parts appears twice.
//! 3. **CSS selector**: only when steps 1 and 2 found nothing. The string
//!    `tag.selector` is handed to the CSS engine unchanged. A selector that
//!    does not parse is logged to the trace and counts as zero matches.
//!
//! The matched elements are then turned into [`ExtractedValue`]s: the resolved
//! `href` for link columns, the first number in the text for numeric columns,
//! and the trimmed text otherwise. A failure on one element is reported in the
//! error list and the column moves on to the next element.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::dom::{self, Document, Selection};
use crate::patterns::NUMBER_TEXT;
use crate::trace::DebugTrace;
use crate::url_utils::resolve_link;

// =============================================================================
// Column specification
// =============================================================================

/// Tags a column may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Div,
    Span,
    A,
    P,
    H1,
    H2,
    H3,
}

impl Tag {
    pub const ALL: [Tag; 7] = [Tag::Div, Tag::Span, Tag::A, Tag::P, Tag::H1, Tag::H2, Tag::H3];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Div => "div",
            Self::Span => "span",
            Self::A => "a",
            Self::P => "p",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| format!("unsupported tag '{s}' (expected one of div, span, a, p, h1, h2, h3)"))
    }
}

/// User-authored rule for one output column.
///
/// A spec with an empty `name` or an empty `selector` produces no column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub tag: Tag,
    /// Class to look for; may hold several `.`-separated tokens.
    pub selector: String,
    #[serde(default)]
    pub extract_link: bool,
    #[serde(default)]
    pub as_numeric: bool,
}

impl ColumnSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, tag: Tag, selector: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag,
            selector: selector.into(),
            extract_link: false,
            as_numeric: false,
        }
    }

    /// Take the resolved `href` instead of the text.
    #[must_use]
    pub fn link(mut self) -> Self {
        self.extract_link = true;
        self
    }

    /// Coerce the text to a number.
    #[must_use]
    pub fn numeric(mut self) -> Self {
        self.as_numeric = true;
        self
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.name.is_empty() || self.selector.is_empty()
    }
}

/// Parses `name:tag:selector[:link][:numeric]`.
///
/// The selector itself may contain `:` (utility classes such as `md:flex`);
/// only trailing `link`/`numeric` segments are read as flags.
impl FromStr for ColumnSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut head = s.splitn(3, ':');
        let (Some(name), Some(tag), Some(mut rest)) = (head.next(), head.next(), head.next()) else {
            return Err(format!("column '{s}' must look like name:tag:selector[:link][:numeric]"));
        };

        let mut spec = ColumnSpec::new(name.trim(), tag.parse()?, "");
        loop {
            if let Some(stripped) = rest.strip_suffix(":link") {
                spec.extract_link = true;
                rest = stripped;
            } else if let Some(stripped) = rest.strip_suffix(":numeric") {
                spec.as_numeric = true;
                rest = stripped;
            } else {
                break;
            }
        }
        spec.selector = rest.trim().to_string();
        Ok(spec)
    }
}

// =============================================================================
// Extracted values
// =============================================================================

/// A number pulled out of element text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

/// One cell of a column.
///
/// Serialises as a plain JSON string or number, with `Absent` as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtractedValue {
    Text(String),
    /// Absolute URL.
    Link(String),
    Number(Number),
    /// No element produced a value here, or the cell is padding.
    Absent,
}

impl ExtractedValue {
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Text and links print as-is, numbers in their shortest form, `Absent` as "".
impl fmt::Display for ExtractedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) | Self::Link(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Absent => Ok(()),
        }
    }
}

/// Pull the first number out of `text`.
///
/// A match without a decimal point becomes `Int`, one with a point becomes
/// `Float`. Text without any digits yields `Absent`; a match that does not fit
/// the numeric type (an `i64` overflow) keeps the whole text as `Text`.
///
/// # Example
///
/// ```rust
/// use rs_colscrape::extractor::{coerce_numeric, ExtractedValue, Number};
///
/// assert_eq!(coerce_numeric("Score: 42 pts"), ExtractedValue::Number(Number::Int(42)));
/// assert_eq!(coerce_numeric("Rating: 3.5/5"), ExtractedValue::Number(Number::Float(3.5)));
/// assert_eq!(coerce_numeric("No digits here"), ExtractedValue::Absent);
/// ```
#[must_use]
pub fn coerce_numeric(text: &str) -> ExtractedValue {
    let Some(m) = NUMBER_TEXT.find(text) else {
        return ExtractedValue::Absent;
    };

    let raw = m.as_str();
    let parsed = if raw.contains('.') {
        raw.parse::<f64>().ok().map(Number::Float)
    } else {
        raw.parse::<i64>().ok().map(Number::Int)
    };

    parsed.map_or_else(|| ExtractedValue::Text(text.to_string()), ExtractedValue::Number)
}

// =============================================================================
// Extraction output
// =============================================================================

/// Which resolution step produced a column's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    ExactClass,
    PartialClass,
    CssSelector,
}

/// Values extracted for one spec, before padding.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<ExtractedValue>,
    /// `None` when no strategy matched anything.
    pub matched_by: Option<MatchStrategy>,
}

impl Column {
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<ExtractedValue>) -> Self {
        Self {
            name: name.into(),
            values,
            matched_by: None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Everything one extraction pass produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// One entry per processed spec, in spec order.
    pub columns: Vec<Column>,
    /// Per-element failures, in the order they happened.
    pub errors: Vec<String>,
    pub trace: DebugTrace,
}

impl Extraction {
    /// True when no column holds a single value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Column::is_empty)
    }
}

// =============================================================================
// Extraction
// =============================================================================

/// Run every spec against `doc`, resolving links against `base`.
///
/// Specs are processed independently and in order. Skipped specs (empty name
/// or selector) and repeated names produce no column.
#[must_use]
pub fn extract(doc: &Document, base: &Url, specs: &[ColumnSpec]) -> Extraction {
    let mut out = Extraction::default();
    let mut seen: HashSet<&str> = HashSet::new();

    for spec in specs {
        if spec.is_skipped() {
            continue;
        }
        if !seen.insert(spec.name.as_str()) {
            tracing::warn!(column = %spec.name, "duplicate column name, skipping");
            out.errors.push(format!("Duplicate column name: {}", spec.name));
            continue;
        }

        let column = extract_column(doc, base, spec, &mut out.errors, &mut out.trace);
        out.columns.push(column);
    }

    out
}

fn extract_column(
    doc: &Document,
    base: &Url,
    spec: &ColumnSpec,
    errors: &mut Vec<String>,
    trace: &mut DebugTrace,
) -> Column {
    let (elements, matched_by) = resolve_elements(doc, spec.tag, &spec.selector, trace);

    let mut values = Vec::with_capacity(elements.len());
    for el in &elements {
        match extract_value(el, spec, base) {
            Ok(value) => values.push(value),
            Err(message) => {
                tracing::warn!(column = %spec.name, %message, "element extraction failed");
                errors.push(format!("Error extracting from {}: {message}", spec.name));
            }
        }
    }

    trace.push(format!("  Final count for {}: {}", spec.name, values.len()));

    Column {
        name: spec.name.clone(),
        values,
        matched_by,
    }
}

/// Find the elements a column reads from, recording each attempt in `trace`.
///
/// Later strategies only run when every earlier one came back empty.
pub fn resolve_elements<'a>(
    doc: &'a Document,
    tag: Tag,
    selector: &str,
    trace: &mut DebugTrace,
) -> (Vec<Selection<'a>>, Option<MatchStrategy>) {
    trace.push(format!("Looking for: {tag}.{selector}"));

    let candidates = dom::elements_by_tag(doc, tag.as_str());

    let exact: Vec<Selection<'a>> = candidates
        .iter()
        .filter(|el| exact_class_match(el, selector))
        .cloned()
        .collect();
    tracing::debug!(%tag, selector, count = exact.len(), "exact class match");
    trace.push(format!("  Strategy 1 (exact class): {} elements", exact.len()));
    if !exact.is_empty() {
        return (exact, Some(MatchStrategy::ExactClass));
    }

    if selector.contains('.') {
        let partial = partial_class_matches(&candidates, selector, trace);
        tracing::debug!(%tag, selector, count = partial.len(), "partial class match");
        trace.push(format!("  Strategy 2 (partial class): {} elements", partial.len()));
        if !partial.is_empty() {
            return (partial, Some(MatchStrategy::PartialClass));
        }
    }

    let css = format!("{tag}.{selector}");
    match dom::try_select_all(doc, &css) {
        Ok(found) => {
            tracing::debug!(css = %css, count = found.len(), "css selector match");
            trace.push(format!("  Strategy 3 (CSS selector): {} elements", found.len()));
            let matched_by = (!found.is_empty()).then_some(MatchStrategy::CssSelector);
            (found, matched_by)
        }
        Err(e) => {
            tracing::debug!(css = %css, error = %e, "css selector rejected");
            trace.push(format!("  CSS selector failed: {e}"));
            (Vec::new(), None)
        }
    }
}

/// Class attribute equals `selector`, or has it as one whitespace token.
fn exact_class_match(el: &Selection, selector: &str) -> bool {
    match dom::class_name(el) {
        Some(raw) if raw == selector => true,
        Some(_) => dom::class_tokens(el).contains(selector),
        None => false,
    }
}

/// Concatenated regex hits for every `.`-separated part of `selector`.
fn partial_class_matches<'a>(
    candidates: &[Selection<'a>],
    selector: &str,
    trace: &mut DebugTrace,
) -> Vec<Selection<'a>> {
    let mut matches = Vec::new();

    for part in selector.split('.').filter(|p| !p.is_empty()) {
        let re = match Regex::new(part) {
            Ok(re) => re,
            Err(e) => {
                trace.push(format!("  Partial pattern '{part}' failed: {e}"));
                continue;
            }
        };

        matches.extend(
            candidates
                .iter()
                .filter(|el| dom::class_name(el).is_some_and(|raw| re.is_match(&raw)))
                .cloned(),
        );
    }

    matches
}

fn extract_value(
    el: &Selection,
    spec: &ColumnSpec,
    base: &Url,
) -> std::result::Result<ExtractedValue, String> {
    if spec.extract_link {
        return match dom::get_attribute(el, "href") {
            Some(href) if !href.trim().is_empty() => resolve_link(&href, base).map(ExtractedValue::Link),
            _ => Ok(ExtractedValue::Absent),
        };
    }

    let text = dom::trimmed_text(el);
    if spec.as_numeric {
        Ok(coerce_numeric(&text))
    } else {
        Ok(ExtractedValue::Text(text))
    }
}

//! DOM capability layer.
//!
//! Thin typed accessors over `dom_query`. Everything the extractor and the
//! inspector need to know about an element (its class tokens, its attribute
//! names, its trimmed text) goes through here, so neither of them probes raw
//! attribute maps directly.

use std::collections::BTreeSet;

// Re-export core types for external use
pub use dom_query::{Document, Matcher, Selection};

pub use tendril::StrTendril;

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Serialize the whole document back to HTML.
#[inline]
#[must_use]
pub fn document_html(doc: &Document) -> StrTendril {
    doc.html()
}

// === Attribute Operations ===

/// Raw `class` attribute value, untouched.
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Whitespace-separated tokens of the `class` attribute.
///
/// Returns an empty set when the element has no class attribute.
#[must_use]
pub fn class_tokens(sel: &Selection) -> BTreeSet<String> {
    sel.attr("class")
        .map(|raw| raw.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Names of all attributes present on the first node of the selection.
#[must_use]
pub fn attribute_names(sel: &Selection) -> BTreeSet<String> {
    sel.nodes()
        .first()
        .map(|node| {
            node.attrs()
                .iter()
                .map(|attr| attr.name.local.to_string())
                .collect()
        })
        .unwrap_or_default()
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}

// === Text Content ===

/// All text content of the node and its descendants, as stored.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Text content with surrounding whitespace removed.
#[must_use]
pub fn trimmed_text(sel: &Selection) -> String {
    text_content(sel).trim().to_string()
}

// === Querying ===

/// Every element of the document, in document order.
#[must_use]
pub fn all_elements(doc: &Document) -> Vec<Selection<'_>> {
    doc.select("*")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

/// Elements with the given tag name, in document order.
///
/// `tag` must be a plain tag name; callers pass values from a closed set.
#[must_use]
pub fn elements_by_tag<'a>(doc: &'a Document, tag: &str) -> Vec<Selection<'a>> {
    doc.select(tag)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

/// Apply an arbitrary, possibly malformed, CSS selector.
///
/// Returns the parser's complaint instead of panicking when the selector is
/// not valid CSS.
pub fn try_select_all<'a>(
    doc: &'a Document,
    css: &str,
) -> std::result::Result<Vec<Selection<'a>>, String> {
    let matcher = Matcher::new(css).map_err(|e| format!("invalid selector '{css}': {e:?}"))?;
    Ok(doc
        .select_matcher(&matcher)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_tokens_split_on_whitespace() {
        let doc = parse(r#"<div class="  card  card--wide
            featured ">x</div>"#);
        let div = doc.select("div");

        let tokens = class_tokens(&div);
        assert_eq!(tokens.len(), 3);
        assert!(tokens.contains("card"));
        assert!(tokens.contains("card--wide"));
        assert!(tokens.contains("featured"));
    }

    #[test]
    fn test_class_tokens_empty_without_class() {
        let doc = parse("<div>x</div>");
        assert!(class_tokens(&doc.select("div")).is_empty());
        assert_eq!(class_name(&doc.select("div")), None);
    }

    #[test]
    fn test_attribute_names() {
        let doc = parse(r#"<span id="a" data-id="7" data-kind="x">x</span>"#);
        let names = attribute_names(&doc.select("span"));
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["data-id", "data-kind", "id"]);
    }

    #[test]
    fn test_trimmed_text_includes_descendants() {
        let doc = parse("<p>  Hello <b>world</b>\n </p>");
        assert_eq!(trimmed_text(&doc.select("p")), "Hello world");
    }

    #[test]
    fn test_elements_by_tag_document_order() {
        let doc = parse("<div><span>1</span><p><span>2</span></p><span>3</span></div>");
        let texts: Vec<String> = elements_by_tag(&doc, "span").iter().map(trimmed_text).collect();
        assert_eq!(texts, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_try_select_all_reports_bad_selector() {
        let doc = parse("<div class='a'>x</div>");
        assert_eq!(try_select_all(&doc, "div.a").map(|v| v.len()), Ok(1));
        assert!(try_select_all(&doc, "div.[[").is_err());
    }

    #[test]
    fn test_tag_name_lowercase() {
        let doc = parse("<DIV>x</DIV>");
        assert_eq!(tag_name(&doc.select("div")), Some("div".to_string()));
    }
}

//! Compiled regex patterns shared by the extractor and the inspector.
//!
//! All patterns are compiled once at first use with `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Value Coercion
// =============================================================================

/// First decimal-number-like run: optional digits, optional single point,
/// at least one trailing digit. Matches "42", "3.5" and ".5"; a bare "3." only
/// yields "3".
pub static NUMBER_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d*\.?\d+").expect("NUMBER_TEXT regex"));

// =============================================================================
// Page Inspection
// =============================================================================

/// Class values that usually mark repeated listing entries.
pub static CARD_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(card|item|result)").expect("CARD_CLASS regex"));

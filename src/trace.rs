//! Append-only diagnostic log returned alongside every scrape.

use std::fmt;

use serde::Serialize;

/// Ordered, human-readable diagnostic lines.
///
/// A trace is produced fresh by each scrape or inspection and only ever grows.
/// Its content never influences the extracted table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DebugTrace {
    lines: Vec<String>,
}

impl DebugTrace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Append every line of another trace, keeping its order.
    pub fn append(&mut self, other: DebugTrace) {
        self.lines.extend(other.lines);
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// True if any line contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.lines.iter()
    }

    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl Extend<String> for DebugTrace {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.lines.extend(iter);
    }
}

impl IntoIterator for DebugTrace {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

impl<'a> IntoIterator for &'a DebugTrace {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// One bullet per line.
impl fmt::Display for DebugTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "• {line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let mut a = DebugTrace::new();
        a.push("one");
        let mut b = DebugTrace::new();
        b.push("two");
        b.push(String::from("three"));
        a.append(b);
        assert_eq!(a.lines(), ["one", "two", "three"]);
    }

    #[test]
    fn display_renders_bullets() {
        let mut t = DebugTrace::new();
        t.push("HTTP Status: 200");
        t.push("Content Length: 10 bytes");
        assert_eq!(t.to_string(), "• HTTP Status: 200\n• Content Length: 10 bytes\n");
    }
}

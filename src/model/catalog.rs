//! Catalog — the four playbook datasets plus the derived pattern index.
//!
//! All four datasets are loaded once at startup and never mutated; every
//! lookup miss is an expected condition answered with `None` or an empty
//! value, never an error.

use std::collections::HashMap;

use indexmap::IndexMap;

use super::pattern::{Pattern, PatternId, Quote};

/// Ordered theme label → pattern ids within one phase.
pub type ThemeEntries = IndexMap<String, Vec<PatternId>>;

/// Ordered phase name → themes. Insertion order is display order and must
/// survive filtering.
pub type PlaybookStructure = IndexMap<String, ThemeEntries>;

/// Pattern id → theme code → raw quote strings. Lookup-only at the outer
/// levels; the inner `Vec` order is display order.
pub type QuotesMap = HashMap<PatternId, HashMap<String, Vec<String>>>;

/// Split a theme label `"<code>. <name>"` on the *first* `". "`.
/// A label with no separator is all code, empty name.
pub fn split_theme_label(label: &str) -> (&str, &str) {
    match label.split_once(". ") {
        Some((code, name)) => (code, name),
        None => (label, ""),
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Catalog {
    pub structure: PlaybookStructure,
    pub patterns: Vec<Pattern>,
    pub quotes: QuotesMap,
    pub themes: HashMap<String, String>,

    // Derived index: pattern id → position in `patterns`.
    by_id: HashMap<PatternId, usize>,
}

impl Catalog {
    /// Assemble a catalog from the four loaded datasets, building the
    /// pattern index in one pass.
    pub fn new(
        structure: PlaybookStructure,
        patterns: Vec<Pattern>,
        quotes: QuotesMap,
        themes: HashMap<String, String>,
    ) -> Self {
        let by_id = patterns
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();

        Self {
            structure,
            patterns,
            quotes,
            themes,
            by_id,
        }
    }

    /// O(1) pattern lookup. `None` means "skip this entry", never a fault.
    pub fn pattern(&self, id: &PatternId) -> Option<&Pattern> {
        self.by_id.get(id).map(|&i| &self.patterns[i])
    }

    /// Description for a theme code; unknown codes read as empty.
    pub fn theme_description(&self, code: &str) -> &str {
        self.themes.get(code).map(String::as_str).unwrap_or("")
    }

    /// All raw quote strings recorded for a pattern, across every theme
    /// code. Used by the filter engine, which intentionally matches quotes
    /// from any theme, not just the one being filtered.
    pub fn all_quotes_for<'a>(&'a self, id: &PatternId) -> impl Iterator<Item = &'a str> + 'a {
        self.quotes
            .get(id)
            .into_iter()
            .flat_map(|by_code| by_code.values())
            .flatten()
            .map(String::as_str)
    }

    /// Quotes for one (pattern, theme) pair, parsed into text/author and in
    /// stored order. Either lookup level missing yields an empty list.
    pub fn resolve_quotes(&self, id: &PatternId, theme_code: &str) -> Vec<Quote> {
        self.quotes
            .get(id)
            .and_then(|by_code| by_code.get(theme_code))
            .map(|raw| raw.iter().map(|q| Quote::parse(q)).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_theme_label() {
        assert_eq!(split_theme_label("AP1. Fake Agility"), ("AP1", "Fake Agility"));
        assert_eq!(split_theme_label("NoSeparatorHere"), ("NoSeparatorHere", ""));
    }

    #[test]
    fn test_split_theme_label_first_occurrence() {
        assert_eq!(
            split_theme_label("T1. Screening. The Early Stage"),
            ("T1", "Screening. The Early Stage")
        );
    }
}

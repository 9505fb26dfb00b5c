//! Filter engine and term highlighting.
//!
//! Both operations are pure and total: they run on every keystroke, never
//! touch the catalog they read from, and never fail. Matching is literal,
//! case-insensitive (ASCII fold) substring containment — no pattern syntax,
//! so characters like `.` and `*` in a term only ever match themselves.

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::model::{Catalog, PatternId, PlaybookStructure};

/// Normalize a search term: trim, ASCII case-fold. Empty result means
/// "no filter".
pub fn normalize_term(term: &str) -> String {
    term.trim().to_ascii_lowercase()
}

/// Narrow the catalog structure to entries matching `term`.
///
/// An empty or whitespace-only term is the identity: the original structure
/// is returned borrowed, with no copy made. Otherwise a pattern id is
/// retained iff it resolves in the index and either its id/name/description
/// or any of its quotes (across *all* theme codes, matching the original
/// behaviour) contains the folded term. Themes and phases survive only when
/// non-empty, and relative order is preserved throughout.
pub fn filter<'a>(catalog: &'a Catalog, term: &str) -> Cow<'a, PlaybookStructure> {
    let term = normalize_term(term);
    if term.is_empty() {
        return Cow::Borrowed(&catalog.structure);
    }

    let mut filtered = IndexMap::new();
    for (phase_name, themes) in &catalog.structure {
        let mut filtered_themes = IndexMap::new();
        for (theme_label, ids) in themes {
            let retained: Vec<PatternId> = ids
                .iter()
                .filter(|id| pattern_matches(catalog, id, &term))
                .cloned()
                .collect();
            if !retained.is_empty() {
                filtered_themes.insert(theme_label.clone(), retained);
            }
        }
        if !filtered_themes.is_empty() {
            filtered.insert(phase_name.clone(), filtered_themes);
        }
    }

    Cow::Owned(filtered)
}

/// `term` must already be normalized.
fn pattern_matches(catalog: &Catalog, id: &PatternId, term: &str) -> bool {
    let Some(pattern) = catalog.pattern(id) else {
        return false;
    };
    if pattern.search_haystack().contains(term) {
        return true;
    }
    catalog
        .all_quotes_for(id)
        .any(|quote| quote.to_ascii_lowercase().contains(term))
}

// ---------------------------------------------------------------------------
// Highlighting
// ---------------------------------------------------------------------------

/// One run of text, either plain or an emphasised term match. Segments of a
/// highlighted string concatenate back to the input byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSegment {
    pub text: String,
    pub emphasised: bool,
}

impl HighlightSegment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            emphasised: false,
        }
    }

    fn emphasised(text: &str) -> Self {
        Self {
            text: text.to_string(),
            emphasised: true,
        }
    }
}

/// Mark every case-insensitive literal occurrence of `term` in `text`.
///
/// Works on a folded copy for matching but slices the original text, so
/// casing and all non-matching bytes pass through untouched. ASCII folding
/// keeps byte offsets aligned between the two.
pub fn highlight(text: &str, term: &str) -> Vec<HighlightSegment> {
    let term = normalize_term(term);
    if term.is_empty() || text.is_empty() {
        return vec![HighlightSegment::plain(text)];
    }

    let hay = text.to_ascii_lowercase();
    let mut segments = Vec::new();
    let mut i = 0;
    while let Some(rel) = hay[i..].find(&term) {
        let start = i + rel;
        let end = start + term.len();
        if start > i {
            segments.push(HighlightSegment::plain(&text[i..start]));
        }
        segments.push(HighlightSegment::emphasised(&text[start..end]));
        i = end;
    }
    if i < text.len() || segments.is_empty() {
        segments.push(HighlightSegment::plain(&text[i..]));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(segments: &[HighlightSegment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_highlight_empty_term_is_identity() {
        let segs = highlight("Fake Agility", "");
        assert_eq!(segs, vec![HighlightSegment::plain("Fake Agility")]);

        let segs = highlight("Fake Agility", "   ");
        assert_eq!(segs, vec![HighlightSegment::plain("Fake Agility")]);
    }

    #[test]
    fn test_highlight_case_insensitive() {
        let segs = highlight("Test the TEST in testing", "test");
        assert_eq!(joined(&segs), "Test the TEST in testing");
        let marked: Vec<&str> = segs
            .iter()
            .filter(|s| s.emphasised)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(marked, vec!["Test", "TEST", "test"]);
    }

    #[test]
    fn test_highlight_literal_specials() {
        // `.` and `*` must only match themselves, never act as pattern syntax.
        let segs = highlight("a.c abc", "a.c");
        let marked: Vec<&str> = segs
            .iter()
            .filter(|s| s.emphasised)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(marked, vec!["a.c"]);

        let segs = highlight("x*y or xy", "x*y");
        assert_eq!(segs.iter().filter(|s| s.emphasised).count(), 1);
    }

    #[test]
    fn test_highlight_no_match_single_plain_segment() {
        let segs = highlight("hello", "zzz");
        assert_eq!(segs, vec![HighlightSegment::plain("hello")]);
    }

    #[test]
    fn test_highlight_adjacent_matches() {
        let segs = highlight("aaaa", "aa");
        assert_eq!(joined(&segs), "aaaa");
        assert_eq!(segs.iter().filter(|s| s.emphasised).count(), 2);
    }

    #[test]
    fn test_normalize_term() {
        assert_eq!(normalize_term("  Fake "), "fake");
        assert_eq!(normalize_term("\t \n"), "");
    }
}

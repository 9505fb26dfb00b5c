//! Projection tests — display tree shape, highlighting, empty state,
//! summary ordering.

use std::collections::HashMap;

use pretty_assertions::assert_eq;

use playbook_browser::model::*;
use playbook_browser::search::{filter, highlight, HighlightSegment};
use playbook_browser::view::{project, summary, Projection};

/// The end-to-end fixture from the design notes: AP2 is referenced by the
/// structure but absent from the pattern list.
fn sample_catalog() -> Catalog {
    let structure: PlaybookStructure = serde_json::from_str(
        r#"{"Delivery": {"T1. Theme One": ["AP1", "AP2"]}}"#,
    )
    .unwrap();

    let patterns = vec![Pattern {
        id: PatternId::new("AP1"),
        name: "Rush".to_string(),
        description: "Shipping before thinking.".to_string(),
    }];

    let mut themes = HashMap::new();
    themes.insert("T1".to_string(), "The first theme.".to_string());

    Catalog::new(structure, patterns, QuotesMap::new(), themes)
}

fn plain(text: &str) -> Vec<HighlightSegment> {
    highlight(text, "")
}

// ═══════════════════════════════════════════════════════════════════════════
// Display tree shape
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_unfiltered_projection_drops_unknown_id() {
    let catalog = sample_catalog();
    let Projection::Results(phases) = project(&catalog, &catalog.structure, "") else {
        panic!("expected results");
    };

    assert_eq!(phases.len(), 1);
    assert_eq!(phases[0].name, "Delivery");
    assert_eq!(phases[0].themes.len(), 1);

    let theme = &phases[0].themes[0];
    assert_eq!(theme.code, "T1");
    assert_eq!(theme.name, "Theme One");
    assert_eq!(theme.description, "The first theme.");

    // AP2 has no pattern record, so exactly one card survives.
    assert_eq!(theme.cards.len(), 1);
    assert_eq!(theme.cards[0].pattern_id, PatternId::new("AP1"));
    assert_eq!(theme.cards[0].name, plain("Rush"));
}

#[test]
fn test_theme_label_without_separator_keeps_whole_label_as_code() {
    let structure: PlaybookStructure =
        serde_json::from_str(r#"{"Delivery": {"Uncoded": ["AP1"]}}"#).unwrap();
    let catalog = Catalog::new(
        structure,
        vec![Pattern {
            id: PatternId::new("AP1"),
            name: "Rush".to_string(),
            description: String::new(),
        }],
        QuotesMap::new(),
        HashMap::new(),
    );

    let Projection::Results(phases) = project(&catalog, &catalog.structure, "") else {
        panic!("expected results");
    };
    assert_eq!(phases[0].themes[0].code, "Uncoded");
    assert_eq!(phases[0].themes[0].name, "");
    assert_eq!(phases[0].themes[0].description, "");
}

#[test]
fn test_filtered_projection_highlights_matches() {
    let catalog = sample_catalog();
    let filtered = filter(&catalog, "rush");
    let Projection::Results(phases) = project(&catalog, &filtered, "rush") else {
        panic!("expected results");
    };

    let card = &phases[0].themes[0].cards[0];
    assert_eq!(card.name.len(), 1);
    assert!(card.name[0].emphasised);
    assert_eq!(card.name[0].text, "Rush");

    // The description has no match — a single plain segment.
    assert_eq!(card.description, plain("Shipping before thinking."));
}

#[test]
fn test_empty_structure_signals_no_results_with_literal_term() {
    let catalog = sample_catalog();
    let filtered = filter(&catalog, "zzz");
    assert_eq!(
        project(&catalog, &filtered, "zzz"),
        Projection::NoResults {
            term: "zzz".to_string()
        }
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Highlight properties
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_highlight_segments_reassemble_to_input() {
    let texts = ["Rush", "a.b*c", "Mixed CASE text", ""];
    let terms = ["", "rush", "a.b", "*", "case", "zzz", "  CASE  "];
    for text in texts {
        for term in terms {
            let joined: String = highlight(text, term)
                .iter()
                .map(|s| s.text.as_str())
                .collect();
            assert_eq!(joined, text, "term {term:?} altered text {text:?}");
        }
    }
}

#[test]
fn test_highlight_dot_is_literal() {
    // "a.c" must not match "abc" the way a regex dot would.
    let segments = highlight("abc a.c", "a.c");
    let marked: Vec<&str> = segments
        .iter()
        .filter(|s| s.emphasised)
        .map(|s| s.text.as_str())
        .collect();
    assert_eq!(marked, vec!["a.c"]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Summary listing
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_summary_orders_numerically_not_lexicographically() {
    let patterns: Vec<Pattern> = serde_json::from_str(
        r#"[
            {"id": "AP10", "name": "Ten", "description": ""},
            {"id": "AP2", "name": "Two", "description": ""},
            {"id": "AP1", "name": "One", "description": ""}
        ]"#,
    )
    .unwrap();
    let catalog = Catalog::new(
        PlaybookStructure::new(),
        patterns,
        QuotesMap::new(),
        HashMap::new(),
    );

    let ids: Vec<&str> = summary(&catalog).iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["AP1", "AP2", "AP10"]);
}

//! Projection of a (possibly filtered) playbook structure into a pure
//! display tree, independent of any terminal concern.

use crate::model::{split_theme_label, Catalog, Pattern, PatternId, PlaybookStructure};
use crate::search::{highlight, HighlightSegment};

/// One pattern card, name and description pre-highlighted for the active
/// search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub pattern_id: PatternId,
    pub name: Vec<HighlightSegment>,
    pub description: Vec<HighlightSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeView {
    pub code: String,
    pub name: String,
    pub description: String,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseView {
    pub name: String,
    pub themes: Vec<ThemeView>,
}

/// Result of projecting a structure. An empty structure is reported
/// explicitly, carrying the literal term for the empty-state message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    Results(Vec<PhaseView>),
    NoResults { term: String },
}

/// Walk `structure` in order and build the display tree. Pattern ids with
/// no entry in the catalog index are dropped silently.
pub fn project(catalog: &Catalog, structure: &PlaybookStructure, term: &str) -> Projection {
    if structure.is_empty() {
        return Projection::NoResults {
            term: term.to_string(),
        };
    }

    let phases = structure
        .iter()
        .map(|(phase_name, themes)| PhaseView {
            name: phase_name.clone(),
            themes: themes
                .iter()
                .map(|(label, ids)| {
                    let (code, name) = split_theme_label(label);
                    ThemeView {
                        code: code.to_string(),
                        name: name.to_string(),
                        description: catalog.theme_description(code).to_string(),
                        cards: ids
                            .iter()
                            .filter_map(|id| catalog.pattern(id))
                            .map(|pattern| card_view(pattern, term))
                            .collect(),
                    }
                })
                .collect(),
        })
        .collect();

    Projection::Results(phases)
}

fn card_view(pattern: &Pattern, term: &str) -> CardView {
    CardView {
        pattern_id: pattern.id.clone(),
        name: highlight(&pattern.name, term),
        description: highlight(&pattern.description, term),
    }
}

/// Flat pattern listing ordered by the numeric `AP<n>` suffix, for the
/// summary pane. Ids without a numeric suffix sort last, by id.
pub fn summary(catalog: &Catalog) -> Vec<&Pattern> {
    let mut patterns: Vec<&Pattern> = catalog.patterns.iter().collect();
    patterns.sort_by(|a, b| match (a.id.number(), b.id.number()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });
    patterns
}

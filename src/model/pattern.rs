use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// PatternId — newtype for type safety
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct PatternId(pub String);

impl PatternId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix of an `AP<n>` id, used for ordering the summary
    /// listing. Non-conforming ids sort last.
    pub fn number(&self) -> Option<u32> {
        self.0.strip_prefix("AP")?.parse().ok()
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PatternId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PatternId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Pattern — one catalog entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Pattern {
    pub id: PatternId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Pattern {
    /// The text a free-text search term is matched against, ASCII-folded.
    pub fn search_haystack(&self) -> String {
        format!("{} {} {}", self.id, self.name, self.description).to_ascii_lowercase()
    }
}

// ---------------------------------------------------------------------------
// Quote — supporting citation, parsed from "<text> - <author>"
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

impl Quote {
    /// Split a raw quote string on the *last* `" - "` occurrence.
    /// Everything after is the author; a quote with no separator keeps the
    /// whole string as text with an empty author.
    pub fn parse(raw: &str) -> Self {
        match raw.rsplit_once(" - ") {
            Some((text, author)) => Self {
                text: text.to_string(),
                author: author.to_string(),
            },
            None => Self {
                text: raw.to_string(),
                author: String::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_split_on_last_separator() {
        let q = Quote::parse("Move fast and break things - J. Smith");
        assert_eq!(q.text, "Move fast and break things");
        assert_eq!(q.author, "J. Smith");
    }

    #[test]
    fn test_quote_text_containing_separator() {
        let q = Quote::parse("Plan - then plan again - R. Jones");
        assert_eq!(q.text, "Plan - then plan again");
        assert_eq!(q.author, "R. Jones");
    }

    #[test]
    fn test_quote_without_separator() {
        let q = Quote::parse("Just ship it");
        assert_eq!(q.text, "Just ship it");
        assert_eq!(q.author, "");
    }

    #[test]
    fn test_pattern_id_number() {
        assert_eq!(PatternId::new("AP12").number(), Some(12));
        assert_eq!(PatternId::new("AP2").number(), Some(2));
        assert_eq!(PatternId::new("X9").number(), None);
        assert_eq!(PatternId::new("AP").number(), None);
    }
}

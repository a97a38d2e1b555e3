//! Search query types.

use crate::config::MatchMode;

/// What the user typed, tagged with how it should match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Key starts with the normalized text.
    Prefix(String),
    /// Key contains the normalized text at a character boundary.
    Substring(String),
    /// Label scored by the fuzzy matcher.
    ///
    /// Every whitespace-separated word must match. Characters such as `^`,
    /// `$`, `!` and `'` are matched literally, not as operators.
    Fuzzy(String),
}

impl SearchQuery {
    pub fn new(mode: MatchMode, text: impl Into<String>) -> Self {
        let text = text.into();
        match mode {
            MatchMode::Prefix => SearchQuery::Prefix(text),
            MatchMode::Substring => SearchQuery::Substring(text),
            MatchMode::Fuzzy => SearchQuery::Fuzzy(text),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            SearchQuery::Prefix(text) | SearchQuery::Substring(text) | SearchQuery::Fuzzy(text) => {
                text
            }
        }
    }

    pub fn mode(&self) -> MatchMode {
        match self {
            SearchQuery::Prefix(_) => MatchMode::Prefix,
            SearchQuery::Substring(_) => MatchMode::Substring,
            SearchQuery::Fuzzy(_) => MatchMode::Fuzzy,
        }
    }
}

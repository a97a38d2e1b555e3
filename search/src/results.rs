//! Search results types.

use doxsearch_core::types::{IndexEntry, ShardId};

/// One matched entry and the shard it was loaded from.
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub entry: &'a IndexEntry,
    pub shard: ShardId,
    /// Fuzzy score; zero for prefix and substring matches.
    pub score: u32,
}

/// One displayed line: a single target of a matched entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRow<'a> {
    pub label: &'a str,
    pub scope: &'a str,
    pub url: &'a str,
    pub parent_frame: bool,
}

/// Matched entries, borrowed from the SearchEngine.
///
/// Use `rows()` to get the flattened one-line-per-target view.
#[derive(Debug, Clone, Default)]
pub struct SearchResults<'a> {
    pub(crate) hits: Vec<SearchHit<'a>>,
}

impl<'a> SearchResults<'a> {
    pub fn hits(&self) -> &[SearchHit<'a>] {
        &self.hits
    }

    pub fn entries(&self) -> impl Iterator<Item = &'a IndexEntry> + '_ {
        self.hits.iter().map(|hit| hit.entry)
    }

    /// Entries with no targets produce no rows.
    pub fn rows(&self) -> impl Iterator<Item = SearchRow<'a>> + '_ {
        self.hits.iter().flat_map(|hit| {
            let entry = hit.entry;
            entry.targets.iter().map(move |target| SearchRow {
                label: &entry.label,
                scope: &target.scope,
                url: &target.url,
                parent_frame: target.parent_frame,
            })
        })
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

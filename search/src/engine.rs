//! Search engine over the shards of one category.

use crate::config::{CaseMatching, SearchConfig};
use crate::query::SearchQuery;
use crate::results::{SearchHit, SearchResults};
use doxsearch_core::shard::Shard;
use doxsearch_core::types::{Category, IndexEntry, SearchKey, ShardId, normalize};
use doxsearch_core::{IndexDir, IndexDirError, SearchIndex};
use nucleo::pattern::{AtomKind, Normalization, Pattern};
use nucleo::{Config as NucleoConfig, Matcher, Utf32String};
use std::collections::HashMap;

struct Loaded {
    shard: ShardId,
    entry: IndexEntry,
}

/// Holds the entries of every loaded shard in load order.
///
/// Shards of other categories are ignored, since `all` repeats every
/// entry of the specific categories.
pub struct SearchEngine {
    config: SearchConfig,
    category: Category,
    entries: Vec<Loaded>,
    by_key: HashMap<SearchKey, Vec<usize>>,
}

/// Create operations.
impl SearchEngine {
    pub fn new(category: Category, config: SearchConfig) -> Self {
        Self {
            config,
            category,
            entries: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    /// Loads every readable shard of the directory.
    ///
    /// Shards that fail to load are skipped with a warning; only a missing
    /// or broken manifest is an error.
    pub fn from_dir(
        dir: &IndexDir,
        category: Category,
        config: SearchConfig,
    ) -> Result<Self, IndexDirError> {
        let (index, failures) = dir.load()?;
        for failure in &failures {
            tracing::warn!(shard = %failure.id, error = %failure.error, "skipping shard");
        }

        let mut engine = Self::new(category, config);
        engine.load_index(index);
        Ok(engine)
    }
}

/// Load operations.
impl SearchEngine {
    /// Appends a shard's entries. Returns false if the shard belongs to
    /// another category.
    pub fn load_shard(&mut self, shard: Shard) -> bool {
        if shard.category() != self.category {
            return false;
        }
        let id = shard.id;
        for entry in shard.entries {
            self.by_key
                .entry(entry.key.clone())
                .or_default()
                .push(self.entries.len());
            self.entries.push(Loaded { shard: id, entry });
        }
        tracing::debug!(shard = %id, total = self.entries.len(), "loaded shard into engine");
        true
    }

    pub fn load_index(&mut self, index: SearchIndex) {
        for shard in index.shards {
            self.load_shard(shard);
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Number of loaded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Search operations.
impl SearchEngine {
    /// Runs a query. An empty query matches nothing.
    pub fn search(&self, query: &SearchQuery) -> SearchResults<'_> {
        if query.text().is_empty() {
            return SearchResults::default();
        }

        let mut hits = match query {
            SearchQuery::Prefix(text) => {
                let needle = normalize(text);
                self.filter(|key| key.starts_with(&needle))
            }
            SearchQuery::Substring(text) => {
                let needle = normalize(text);
                self.filter(|key| key.contains_at_boundary(&needle))
            }
            SearchQuery::Fuzzy(text) => self.fuzzy(text),
        };
        hits.truncate(self.config.result_limit);

        tracing::debug!(query = query.text(), mode = %query.mode(), hits = hits.len(), "search");
        SearchResults { hits }
    }

    /// Entries for a key, or for the key a label normalizes to.
    pub fn lookup(&self, text: &str) -> Vec<&IndexEntry> {
        let indices = SearchKey::try_new(text.to_string())
            .ok()
            .and_then(|key| self.by_key.get(&key))
            .or_else(|| {
                SearchKey::from_label(text)
                    .ok()
                    .and_then(|key| self.by_key.get(&key))
            });
        indices
            .map(|indices| indices.iter().map(|&i| &self.entries[i].entry).collect())
            .unwrap_or_default()
    }

    /// Key matches in load order. Stops once the limit is reached.
    fn filter(&self, matches: impl Fn(&SearchKey) -> bool) -> Vec<SearchHit<'_>> {
        self.entries
            .iter()
            .filter(|loaded| matches(&loaded.entry.key))
            .take(self.config.result_limit)
            .map(|loaded| SearchHit {
                entry: &loaded.entry,
                shard: loaded.shard,
                score: 0,
            })
            .collect()
    }

    /// Label matches by descending score; ties keep load order.
    fn fuzzy(&self, text: &str) -> Vec<SearchHit<'_>> {
        let case_matching = match self.config.case_matching {
            CaseMatching::Sensitive => nucleo::pattern::CaseMatching::Respect,
            CaseMatching::Insensitive => nucleo::pattern::CaseMatching::Ignore,
            CaseMatching::Smart => nucleo::pattern::CaseMatching::Smart,
        };
        let normalization = if self.config.unicode_normalization {
            Normalization::Smart
        } else {
            Normalization::Never
        };

        let pattern = Pattern::new(text, case_matching, normalization, AtomKind::Fuzzy);
        let mut matcher = Matcher::new(NucleoConfig::DEFAULT);
        let mut hits: Vec<SearchHit<'_>> = self
            .entries
            .iter()
            .filter_map(|loaded| {
                let haystack = Utf32String::from(loaded.entry.label.as_str());
                let score = pattern.score(haystack.slice(..), &mut matcher)?;
                Some(SearchHit {
                    entry: &loaded.entry,
                    shard: loaded.shard,
                    score,
                })
            })
            .collect();
        hits.sort_by(|a, b| b.score.cmp(&a.score));
        hits
    }
}

//! Generates shards and a manifest from a symbol table.
//!
//! Output is a pure function of the symbol table and the configuration:
//! - symbols sharing a label in a category become one entry
//! - targets follow declaration order, later duplicates dropped
//! - entries are ordered by key, then label; partitions by character

use crate::index::SearchIndex;
use crate::shard::Shard;
use crate::symbol::Symbol;
use crate::types::{
    Category, EntryError, IndexConfig, IndexEntry, Partition, SearchKey, SearchKeyError,
    Target,
};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("symbol {name:?} at {url:?} cannot be indexed: {source}")]
    InvalidName {
        name: String,
        url: String,
        source: SearchKeyError,
    },

    #[error("entry error: {0}")]
    Entry(#[from] EntryError),
}

/// Symbols of one label within a partition, keyed for shard order.
type Groups<'a> = BTreeMap<(SearchKey, String), Vec<&'a Symbol>>;

pub struct IndexBuilder {
    config: IndexConfig,
    symbols: Vec<Symbol>,
}

impl IndexBuilder {
    pub fn new(config: IndexConfig) -> Self {
        Self {
            config,
            symbols: Vec::new(),
        }
    }

    pub fn add(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    pub fn extend(&mut self, symbols: impl IntoIterator<Item = Symbol>) {
        self.symbols.extend(symbols);
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn build(&self) -> Result<SearchIndex, BuildError> {
        let mut categories: BTreeMap<Category, BTreeMap<Partition, Groups<'_>>> = BTreeMap::new();

        for symbol in &self.symbols {
            let key =
                SearchKey::from_label(&symbol.name).map_err(|source| BuildError::InvalidName {
                    name: symbol.name.clone(),
                    url: symbol.url.clone(),
                    source,
                })?;
            // A valid key implies a non-empty label.
            let Some(partition) = Partition::of_label(&symbol.name) else {
                continue;
            };

            for category in [Category::All, symbol.kind.category()] {
                if !self.config.emits(category) {
                    continue;
                }
                categories
                    .entry(category)
                    .or_default()
                    .entry(partition)
                    .or_default()
                    .entry((key.clone(), symbol.name.clone()))
                    .or_default()
                    .push(symbol);
            }
        }

        let mut next_id = self.config.first_id;
        let mut shards = Vec::new();
        for (category, partitions) in categories {
            for (index, (partition, groups)) in partitions.into_iter().enumerate() {
                let mut shard = Shard::new(category, index, partition);
                shard.first_id = next_id;
                for ((_, label), symbols) in groups {
                    shard.entries.push(IndexEntry::new(label, targets_for(&symbols))?);
                }
                next_id += shard.len();
                tracing::debug!(
                    shard = %shard.id,
                    %partition,
                    entries = shard.len(),
                    "built shard"
                );
                shards.push(shard);
            }
        }

        let index = SearchIndex::from_shards(shards);
        tracing::info!(
            symbols = self.symbols.len(),
            shards = index.shards.len(),
            entries = index.entry_count(),
            "built search index"
        );
        Ok(index)
    }
}

/// One declaration shows its enclosing scope; several show qualified names.
///
/// Targets keep declaration order. Repeats of an earlier target are dropped.
fn targets_for(symbols: &[&Symbol]) -> Vec<Target> {
    let plain = dedup_targets(symbols.iter().map(|s| s.target()));
    if plain.len() == 1 {
        return plain;
    }
    dedup_targets(symbols.iter().map(|s| s.qualified_target()))
}

fn dedup_targets(targets: impl Iterator<Item = Target>) -> Vec<Target> {
    let mut out: Vec<Target> = Vec::new();
    for target in targets {
        if !out.contains(&target) {
            out.push(target);
        }
    }
    out
}

#[cfg(test)]
mod tests;

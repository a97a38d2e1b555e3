//! A complete search index: manifest plus every shard.

use crate::manifest::Manifest;
use crate::shard::{Shard, ShardError, render_shard};
use crate::types::{Category, Dialect, IndexEntry, ShardId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    pub manifest: Manifest,
    /// Ordered by shard id.
    pub shards: Vec<Shard>,
}

impl SearchIndex {
    /// Builds an index from shards, deriving the manifest.
    pub fn from_shards(mut shards: Vec<Shard>) -> Self {
        shards.sort_by_key(|s| s.id);
        Self {
            manifest: Manifest::from_shards(&shards),
            shards,
        }
    }

    pub fn shard(&self, id: ShardId) -> Option<&Shard> {
        self.shards.iter().find(|s| s.id == id)
    }

    pub fn shards_of(&self, category: Category) -> impl Iterator<Item = &Shard> {
        self.shards.iter().filter(move |s| s.category() == category)
    }

    /// Entries of a category in shard order.
    pub fn entries_of(&self, category: Category) -> impl Iterator<Item = &IndexEntry> {
        self.shards_of(category).flat_map(|s| s.entries.iter())
    }

    pub fn entry_count(&self) -> usize {
        self.shards.iter().map(Shard::len).sum()
    }

    /// blake3 digest over every rendered file; equal digests mean
    /// byte-identical output.
    pub fn fingerprint(&self, dialect: Dialect) -> Result<blake3::Hash, ShardError> {
        let mut hasher = blake3::Hasher::new();
        for shard in &self.shards {
            hasher.update(shard.file_name().as_bytes());
            hasher.update(render_shard(shard, dialect)?.as_bytes());
        }
        Ok(hasher.finalize())
    }
}

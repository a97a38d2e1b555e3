//! One alphabetic partition of a category's search table.
//!
//! A shard renders to a standalone script binding `searchData` to its
//! entries, and parses back from either dialect.

mod reader;
mod writer;

pub use reader::{ShardError, detect_dialect, parse_shard};
pub use writer::render_shard;

use crate::types::{Category, IndexEntry, Partition, ShardId};

/// Name of the binding every shard file declares.
pub const SHARD_BINDING: &str = "searchData";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shard {
    pub id: ShardId,
    pub partition: Partition,
    /// Running id of the first entry, used by the doxygen dialect.
    pub first_id: usize,
    pub entries: Vec<IndexEntry>,
}

impl Shard {
    pub fn new(category: Category, index: usize, partition: Partition) -> Self {
        Self {
            id: ShardId::new(category, index),
            partition,
            first_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.id.category
    }

    pub fn file_name(&self) -> String {
        self.id.file_name()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of rows a consumer shows for the whole shard.
    pub fn target_count(&self) -> usize {
        self.entries.iter().map(|e| e.targets.len()).sum()
    }

    /// Sorts entries by key, then label.
    pub fn sort(&mut self) {
        self.entries
            .sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    }
}

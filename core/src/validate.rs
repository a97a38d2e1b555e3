//! Structural checks over shards and whole indexes.
//!
//! Checks never fail; they report every violation found.

use crate::index::SearchIndex;
use crate::shard::Shard;
use crate::types::{Category, SearchKey, ShardId};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{shard}: entry {index} ({label:?}) has no targets")]
    NoTargets {
        shard: ShardId,
        index: usize,
        label: String,
    },

    #[error("{shard}: entry {index} has key {key:?} but its label normalizes to {expected:?}")]
    KeyMismatch {
        shard: ShardId,
        index: usize,
        key: SearchKey,
        expected: String,
    },

    #[error("{shard}: entry {index} ({key}) sorts before the entry preceding it")]
    OutOfOrder {
        shard: ShardId,
        index: usize,
        key: SearchKey,
    },

    #[error("{shard}: entry {index} ({key}) does not belong to partition {partition:?}")]
    OutsidePartition {
        shard: ShardId,
        index: usize,
        key: SearchKey,
        partition: char,
    },

    #[error("{shard}: entry {index} has an empty label")]
    EmptyLabel { shard: ShardId, index: usize },

    #[error("{shard}: entry {index} ({label:?}) target {target} has an empty url")]
    EmptyUrl {
        shard: ShardId,
        index: usize,
        label: String,
        target: usize,
    },

    #[error("{shard}: label {label:?} appears more than once")]
    DuplicateLabel { shard: ShardId, label: String },

    #[error("{category}: label {label:?} appears in both {first} and {second}")]
    DuplicateAcrossShards {
        category: Category,
        label: String,
        first: ShardId,
        second: ShardId,
    },

    #[error("{0} is not listed in the manifest")]
    UnlistedShard(ShardId),

    #[error("{0} is listed in the manifest but missing")]
    MissingShard(ShardId),
}

/// Checks a single shard in isolation.
pub fn validate_shard(shard: &Shard) -> Vec<Violation> {
    let mut violations = Vec::new();
    let id = shard.id;
    let prefix = shard.partition.key_prefix();
    let mut seen: HashSet<&str> = HashSet::new();

    for (index, entry) in shard.entries.iter().enumerate() {
        if entry.label.is_empty() {
            violations.push(Violation::EmptyLabel { shard: id, index });
        } else {
            let expected = crate::types::normalize(&entry.label);
            if entry.key.as_str() != expected {
                violations.push(Violation::KeyMismatch {
                    shard: id,
                    index,
                    key: entry.key.clone(),
                    expected,
                });
            }
        }

        if !entry.key.as_str().starts_with(&prefix) {
            violations.push(Violation::OutsidePartition {
                shard: id,
                index,
                key: entry.key.clone(),
                partition: shard.partition.as_char(),
            });
        }

        if index > 0 && entry.sort_key() < shard.entries[index - 1].sort_key() {
            violations.push(Violation::OutOfOrder {
                shard: id,
                index,
                key: entry.key.clone(),
            });
        }

        if entry.targets.is_empty() {
            violations.push(Violation::NoTargets {
                shard: id,
                index,
                label: entry.label.clone(),
            });
        }
        for (target, t) in entry.targets.iter().enumerate() {
            if t.url.is_empty() {
                violations.push(Violation::EmptyUrl {
                    shard: id,
                    index,
                    label: entry.label.clone(),
                    target,
                });
            }
        }

        if !seen.insert(entry.label.as_str()) {
            violations.push(Violation::DuplicateLabel {
                shard: id,
                label: entry.label.clone(),
            });
        }
    }

    violations
}

/// Checks every shard plus the agreement between shards and manifest.
///
/// Labels must be unique within a category. Keys may repeat across
/// categories, since every symbol is also listed under `all`.
pub fn validate_index(index: &SearchIndex) -> Vec<Violation> {
    let mut violations: Vec<Violation> = index.shards.iter().flat_map(validate_shard).collect();

    let listed: HashSet<ShardId> = index.manifest.shard_ids().map(|(id, _)| id).collect();
    let present: HashSet<ShardId> = index.shards.iter().map(|s| s.id).collect();
    for shard in &index.shards {
        if !listed.contains(&shard.id) {
            violations.push(Violation::UnlistedShard(shard.id));
        }
    }
    for (id, _) in index.manifest.shard_ids() {
        if !present.contains(&id) {
            violations.push(Violation::MissingShard(id));
        }
    }

    let mut owners: HashMap<(Category, &str), ShardId> = HashMap::new();
    for shard in &index.shards {
        for entry in &shard.entries {
            let slot = (shard.category(), entry.label.as_str());
            match owners.get(&slot) {
                Some(first) if *first != shard.id => {
                    violations.push(Violation::DuplicateAcrossShards {
                        category: shard.category(),
                        label: entry.label.clone(),
                        first: *first,
                        second: shard.id,
                    });
                }
                Some(_) => {}
                None => {
                    owners.insert(slot, shard.id);
                }
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests;

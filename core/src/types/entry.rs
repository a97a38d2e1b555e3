use super::key::{SearchKey, SearchKeyError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EntryError {
    #[error("invalid label {label:?}: {source}")]
    InvalidLabel {
        label: String,
        source: SearchKeyError,
    },

    #[error("entry {0:?} has no targets")]
    NoTargets(String),
}

/// One destination a label resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub url: String,
    pub scope: String,
    /// Open the link in the parent frame rather than the search frame.
    #[serde(default = "default_true")]
    pub parent_frame: bool,
}

impl Target {
    pub fn new(url: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            scope: scope.into(),
            parent_frame: true,
        }
    }

    /// True for absolute links to an external reference site.
    pub fn is_external(&self) -> bool {
        let url = self.url.as_str();
        url.starts_with("http://") || url.starts_with("https://") || url.starts_with("//")
    }
}

fn default_true() -> bool {
    true
}

/// One `key -> (label, targets)` record of a shard.
///
/// Fields are public so a reader can hold what a file actually contains;
/// [`IndexEntry::new`] is the checked constructor used when generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub key: SearchKey,
    pub label: String,
    pub targets: Vec<Target>,
}

impl IndexEntry {
    pub fn new(label: impl Into<String>, targets: Vec<Target>) -> Result<Self, EntryError> {
        let label = label.into();
        let key = SearchKey::from_label(&label).map_err(|source| EntryError::InvalidLabel {
            label: label.clone(),
            source,
        })?;
        if targets.is_empty() {
            return Err(EntryError::NoTargets(label));
        }
        Ok(Self {
            key,
            label,
            targets,
        })
    }

    /// Ordering used inside a shard: key, then label.
    pub fn sort_key(&self) -> (&str, &str) {
        (self.key.as_str(), self.label.as_str())
    }
}

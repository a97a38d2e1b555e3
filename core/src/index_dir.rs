//! An index laid out on disk: `searchdata.js` plus one file per shard.

use crate::index::SearchIndex;
use crate::manifest::{Manifest, ManifestError};
use crate::shard::{Shard, ShardError, parse_shard, render_shard};
use crate::types::{Dialect, Partition, ShardId};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexDirError {
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("manifest: {0}")]
    Manifest(#[from] ManifestError),

    #[error("{id}: {source}")]
    Shard { id: ShardId, source: ShardError },

    #[error("no {} in {}", Manifest::FILE_NAME, .0.display())]
    MissingManifest(PathBuf),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> IndexDirError + '_ {
    move |source| IndexDirError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// What a write changed on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: Vec<String>,
    pub unchanged: Vec<String>,
    pub removed: Vec<String>,
}

impl WriteReport {
    pub fn is_noop(&self) -> bool {
        self.written.is_empty() && self.removed.is_empty()
    }
}

/// A shard the manifest lists but that could not be loaded.
#[derive(Debug)]
pub struct ShardFailure {
    pub id: ShardId,
    pub error: IndexDirError,
}

pub struct IndexDir {
    pub root: PathBuf,
}

impl IndexDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(Manifest::FILE_NAME)
    }

    pub fn shard_path(&self, id: ShardId) -> PathBuf {
        self.root.join(id.file_name())
    }

    /// Renders the index into the directory.
    ///
    /// Files whose content already matches are left untouched, and shard
    /// files no longer part of the index are removed.
    pub fn write(
        &self,
        index: &SearchIndex,
        dialect: Dialect,
    ) -> Result<WriteReport, IndexDirError> {
        std::fs::create_dir_all(&self.root).map_err(io_error(&self.root))?;
        let mut report = WriteReport::default();

        let mut files = Vec::with_capacity(index.shards.len() + 1);
        files.push((Manifest::FILE_NAME.to_string(), index.manifest.render()?));
        for shard in &index.shards {
            let text = render_shard(shard, dialect).map_err(|source| IndexDirError::Shard {
                id: shard.id,
                source,
            })?;
            files.push((shard.file_name(), text));
        }

        for (name, text) in &files {
            if self.write_if_changed(name, text)? {
                report.written.push(name.clone());
            } else {
                report.unchanged.push(name.clone());
            }
        }

        let current: HashSet<&str> = files.iter().map(|(name, _)| name.as_str()).collect();
        for name in self.shard_file_names()? {
            if !current.contains(name.as_str()) {
                let path = self.root.join(&name);
                std::fs::remove_file(&path).map_err(io_error(&path))?;
                report.removed.push(name);
            }
        }

        tracing::info!(
            root = %self.root.display(),
            %dialect,
            written = report.written.len(),
            unchanged = report.unchanged.len(),
            removed = report.removed.len(),
            "wrote search index"
        );
        Ok(report)
    }

    /// Returns true if the file was (re)written.
    fn write_if_changed(&self, name: &str, text: &str) -> Result<bool, IndexDirError> {
        let path = self.root.join(name);
        if path.exists() {
            let existing = std::fs::read(&path).map_err(io_error(&path))?;
            if blake3::hash(&existing) == blake3::hash(text.as_bytes()) {
                return Ok(false);
            }
        }

        let tmp = self.root.join(format!(".{name}.tmp"));
        std::fs::write(&tmp, text).map_err(io_error(&tmp))?;
        std::fs::rename(&tmp, &path).map_err(io_error(&path))?;
        tracing::debug!(file = name, "wrote");
        Ok(true)
    }

    /// Names of files in the directory that look like shards.
    fn shard_file_names(&self) -> Result<Vec<String>, IndexDirError> {
        let mut names = Vec::new();
        for dir_entry in std::fs::read_dir(&self.root).map_err(io_error(&self.root))? {
            let dir_entry = dir_entry.map_err(io_error(&self.root))?;
            let Ok(name) = dir_entry.file_name().into_string() else {
                continue;
            };
            if ShardId::from_file_name(&name).is_some() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn read_manifest(&self) -> Result<Manifest, IndexDirError> {
        let path = self.manifest_path();
        if !path.exists() {
            return Err(IndexDirError::MissingManifest(self.root.clone()));
        }
        let text = std::fs::read_to_string(&path).map_err(io_error(&path))?;
        Ok(Manifest::parse(&text)?)
    }

    pub fn read_shard(
        &self,
        id: ShardId,
        partition: Option<Partition>,
    ) -> Result<(Shard, Dialect), IndexDirError> {
        let path = self.shard_path(id);
        let text = std::fs::read_to_string(&path).map_err(io_error(&path))?;
        parse_shard(&text, id, partition).map_err(|source| IndexDirError::Shard { id, source })
    }

    /// Loads the manifest and every listed shard, collecting shards that
    /// fail instead of giving up.
    pub fn load(&self) -> Result<(SearchIndex, Vec<ShardFailure>), IndexDirError> {
        let manifest = self.read_manifest()?;
        let mut shards = Vec::new();
        let mut failures = Vec::new();

        for (id, partition) in manifest.shard_ids() {
            match self.read_shard(id, Some(partition)) {
                Ok((shard, dialect)) => {
                    tracing::debug!(shard = %id, %dialect, entries = shard.len(), "loaded shard");
                    shards.push(shard);
                }
                Err(error) => failures.push(ShardFailure { id, error }),
            }
        }

        shards.sort_by_key(|s| s.id);
        Ok((SearchIndex { manifest, shards }, failures))
    }

    /// Like [`IndexDir::load`], but the first failing shard is an error.
    pub fn read(&self) -> Result<SearchIndex, IndexDirError> {
        let (index, failures) = self.load()?;
        match failures.into_iter().next() {
            Some(failure) => Err(failure.error),
            None => Ok(index),
        }
    }
}

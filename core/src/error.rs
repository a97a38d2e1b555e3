use crate::builder::BuildError;
use crate::index_dir::IndexDirError;
use crate::manifest::ManifestError;
use crate::shard::ShardError;
use crate::symbol::SymbolError;
use crate::types::AppConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] AppConfigError),

    #[error("symbol table error: {0}")]
    Symbols(#[from] SymbolError),

    #[error("build error: {0}")]
    Build(#[from] BuildError),

    #[error("shard error: {0}")]
    Shard(#[from] ShardError),

    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("index directory error: {0}")]
    IndexDir(#[from] IndexDirError),
}

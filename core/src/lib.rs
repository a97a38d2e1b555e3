pub mod builder;
pub mod error;
pub mod index;
pub mod index_dir;
pub mod manifest;
pub mod markup;
pub mod script;
pub mod shard;
pub mod symbol;
pub mod types;
pub mod validate;

pub use builder::{BuildError, IndexBuilder};
pub use error::{Error, Result};
pub use index::SearchIndex;
pub use index_dir::{IndexDir, IndexDirError, ShardFailure, WriteReport};
pub use manifest::Manifest;
pub use shard::Shard;
pub use symbol::{Symbol, SymbolKind, load_symbols};
pub use validate::{Violation, validate_index, validate_shard};

use std::path::Path;

/// Builds the index for a symbol table and writes it under `out`.
pub fn generate(
    config: &types::IndexConfig,
    symbols: &Path,
    out: &Path,
) -> Result<WriteReport> {
    let mut builder = IndexBuilder::new(config.clone());
    builder.extend(load_symbols(symbols)?);
    let index = builder.build()?;
    Ok(IndexDir::new(out).write(&index, config.dialect)?)
}

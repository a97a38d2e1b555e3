use super::{SHARD_BINDING, Shard};
use crate::markup;
use crate::script::{Literal, ParseError, find_binding, parse_script};
use crate::types::{Dialect, IndexEntry, Partition, SearchKey, ShardId, Target};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShardError {
    #[error("syntax error: {0}")]
    Syntax(#[from] ParseError),

    #[error("missing `{0}` binding")]
    MissingBinding(&'static str),

    #[error("entry {index}: {reason}")]
    Shape { index: usize, reason: String },

    #[error("entry {index}: invalid key {key:?}")]
    InvalidKey { index: usize, key: String },

    #[error("cannot infer the partition of an empty shard")]
    UnknownPartition,

    #[error("render error: {0}")]
    Render(#[from] serde_json::Error),

    #[error("format error: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Parses a shard script, detecting its dialect.
///
/// `partition` is inferred from the first key when not given. Entries are
/// taken as written: empty targets or mis-keyed labels are left for
/// validation to report.
pub fn parse_shard(
    src: &str,
    id: ShardId,
    partition: Option<Partition>,
) -> Result<(Shard, Dialect), ShardError> {
    let bindings = parse_script(src)?;
    let data = find_binding(&bindings, SHARD_BINDING)
        .ok_or(ShardError::MissingBinding(SHARD_BINDING))?;
    let rows = data.as_array().ok_or_else(|| ShardError::Shape {
        index: 0,
        reason: format!("`{SHARD_BINDING}` is a {}, expected an array", data.kind()),
    })?;

    let dialect = detect_dialect(rows);
    let mut first_id = None;
    let mut entries = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let (entry, id) = match dialect {
            Dialect::Compact => (compact_entry(index, row)?, None),
            Dialect::Doxygen => doxygen_entry(index, row)?,
        };
        if index == 0 {
            first_id = id;
        }
        entries.push(entry);
    }

    let partition = match partition {
        Some(p) => p,
        None => entries
            .first()
            .and_then(|e| e.key.decoded().chars().next())
            .map(Partition::new)
            .ok_or(ShardError::UnknownPartition)?,
    };

    tracing::debug!(shard = %id, entries = entries.len(), %dialect, "parsed shard");
    let shard = Shard {
        id,
        partition,
        first_id: first_id.unwrap_or(0),
        entries,
    };
    Ok((shard, dialect))
}

/// Compact bodies are `[label, [[url, scope], ...]]`; anything else is doxygen.
pub fn detect_dialect(rows: &[Literal]) -> Dialect {
    let body = rows
        .first()
        .and_then(Literal::as_array)
        .and_then(|row| row.get(1))
        .and_then(Literal::as_array);
    match body {
        Some([_, Literal::Array(targets)])
            if targets.first().is_none_or(|t| t.as_array().is_some()) =>
        {
            Dialect::Compact
        }
        Some(_) => Dialect::Doxygen,
        None => Dialect::Compact,
    }
}

fn shape(index: usize, reason: impl Into<String>) -> ShardError {
    ShardError::Shape {
        index,
        reason: reason.into(),
    }
}

/// Splits a row into its key text and body.
fn split_row(index: usize, row: &Literal) -> Result<(&str, &[Literal]), ShardError> {
    match row.as_array() {
        Some([Literal::Str(key), Literal::Array(body)]) => Ok((key.as_str(), body.as_slice())),
        Some(_) => Err(shape(index, "expected [key, [label, ...]]")),
        None => Err(shape(index, format!("expected an array, found a {}", row.kind()))),
    }
}

fn parse_key(index: usize, key: &str) -> Result<SearchKey, ShardError> {
    SearchKey::try_new(key.to_string()).map_err(|_| ShardError::InvalidKey {
        index,
        key: key.to_string(),
    })
}

fn label_of(index: usize, body: &[Literal]) -> Result<&str, ShardError> {
    body.first()
        .and_then(Literal::as_str)
        .ok_or_else(|| shape(index, "label must be a string"))
}

fn compact_entry(index: usize, row: &Literal) -> Result<IndexEntry, ShardError> {
    let (key, body) = split_row(index, row)?;
    let label = label_of(index, body)?;
    let [_, Literal::Array(raw_targets)] = body else {
        return Err(shape(index, "expected [label, [[url, scope], ...]]"));
    };

    let targets = raw_targets
        .iter()
        .map(|t| match t.as_array() {
            Some([Literal::Str(url), Literal::Str(scope)]) => {
                Ok(Target::new(url.as_str(), scope.as_str()))
            }
            _ => Err(shape(index, "target must be [url, scope]")),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(IndexEntry {
        key: parse_key(index, key)?,
        label: label.to_string(),
        targets,
    })
}

fn doxygen_entry(index: usize, row: &Literal) -> Result<(IndexEntry, Option<usize>), ShardError> {
    let (raw_key, body) = split_row(index, row)?;
    let label = label_of(index, body)?;

    // Keys carry a running `_<id>` suffix.
    let (key, id) = match raw_key.rsplit_once('_') {
        Some((key, id)) if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) => {
            (key, id.parse().ok())
        }
        _ => (raw_key, None),
    };

    let targets = body[1..]
        .iter()
        .map(|t| -> Result<Target, ShardError> {
            match t.as_array() {
                Some([Literal::Str(url), flag, Literal::Str(scope)]) => {
                    let parent_frame = flag
                        .as_flag()
                        .ok_or_else(|| shape(index, "target flag must be 0 or 1"))?;
                    Ok(Target {
                        url: url.clone(),
                        scope: markup::unescape(scope).into_owned(),
                        parent_frame,
                    })
                }
                _ => Err(shape(index, "target must be [url, flag, scope]")),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let entry = IndexEntry {
        key: parse_key(index, key)?,
        label: markup::unescape(label).into_owned(),
        targets,
    };
    Ok((entry, id))
}

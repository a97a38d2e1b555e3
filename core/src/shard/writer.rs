use super::{SHARD_BINDING, Shard, ShardError};
use crate::markup;
use crate::script::write_single_quoted;
use crate::types::{Dialect, IndexEntry};
use std::fmt::Write as _;

/// Renders a shard as a standalone script.
///
/// Output depends only on the shard and the dialect, so regenerating an
/// unchanged shard is byte-identical.
pub fn render_shard(shard: &Shard, dialect: Dialect) -> Result<String, ShardError> {
    let mut out = String::with_capacity(shard.len() * 128 + 32);
    writeln!(out, "var {SHARD_BINDING}=")?;
    out.push_str("[\n");
    for (i, entry) in shard.entries.iter().enumerate() {
        out.push_str("  ");
        match dialect {
            Dialect::Compact => write_compact(&mut out, entry)?,
            Dialect::Doxygen => write_doxygen(&mut out, entry, shard.first_id + i)?,
        }
        if i + 1 < shard.entries.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str("];\n");
    Ok(out)
}

/// `["key",["label",[["url","scope"],...]]]`
fn write_compact(out: &mut String, entry: &IndexEntry) -> Result<(), ShardError> {
    let targets: Vec<(&str, &str)> = entry
        .targets
        .iter()
        .map(|t| (t.url.as_str(), t.scope.as_str()))
        .collect();
    let row = (entry.key.as_str(), (entry.label.as_str(), targets));
    out.push_str(&serde_json::to_string(&row)?);
    Ok(())
}

/// `['key_id',['label',['url',1,'scope'],...]]`
fn write_doxygen(out: &mut String, entry: &IndexEntry, id: usize) -> Result<(), ShardError> {
    out.push('[');
    write_single_quoted(out, &format!("{}_{id}", entry.key))?;
    out.push_str(",[");
    write_single_quoted(out, &markup::escape(&entry.label))?;
    for target in &entry.targets {
        out.push_str(",[");
        write_single_quoted(out, &target.url)?;
        write!(out, ",{},", u8::from(target.parent_frame))?;
        write_single_quoted(out, &markup::escape(&target.scope))?;
        out.push(']');
    }
    out.push_str("]]");
    Ok(())
}

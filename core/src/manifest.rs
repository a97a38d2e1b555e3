//! `searchdata.js`: which categories exist and which partitions each has.

use crate::script::{Literal, ParseError, find_binding, parse_script};
use crate::shard::Shard;
use crate::types::{Category, Partition, ShardId};
use std::fmt::Write as _;
use thiserror::Error;

const SECTIONS_BINDING: &str = "indexSectionsWithContent";
const NAMES_BINDING: &str = "indexSectionNames";
const LABELS_BINDING: &str = "indexSectionLabels";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("syntax error: {0}")]
    Syntax(#[from] ParseError),

    #[error("missing `{0}` binding")]
    MissingBinding(&'static str),

    #[error("`{binding}` is malformed: {reason}")]
    Shape {
        binding: &'static str,
        reason: String,
    },

    #[error("unknown category {0:?}")]
    UnknownCategory(String),

    #[error("section {0} has no name")]
    UnnamedSection(String),

    #[error("render error: {0}")]
    Render(#[from] serde_json::Error),

    #[error("format error: {0}")]
    Format(#[from] std::fmt::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSection {
    pub category: Category,
    /// Partition characters in shard index order.
    pub partitions: Vec<Partition>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub sections: Vec<ManifestSection>,
}

impl Manifest {
    pub const FILE_NAME: &'static str = "searchdata.js";

    /// Derives the manifest listing every given shard.
    pub fn from_shards(shards: &[Shard]) -> Self {
        let mut sections: Vec<ManifestSection> = Vec::new();
        let mut ordered: Vec<&Shard> = shards.iter().collect();
        ordered.sort_by_key(|s| s.id);

        for shard in ordered {
            match sections.last_mut() {
                Some(section) if section.category == shard.category() => {
                    section.partitions.push(shard.partition);
                }
                _ => sections.push(ManifestSection {
                    category: shard.category(),
                    partitions: vec![shard.partition],
                }),
            }
        }
        Self { sections }
    }

    pub fn section(&self, category: Category) -> Option<&ManifestSection> {
        self.sections.iter().find(|s| s.category == category)
    }

    /// Every shard the manifest lists, with its partition.
    pub fn shard_ids(&self) -> impl Iterator<Item = (ShardId, Partition)> + '_ {
        self.sections.iter().flat_map(|section| {
            section
                .partitions
                .iter()
                .enumerate()
                .map(move |(index, p)| (ShardId::new(section.category, index), *p))
        })
    }

    pub fn render(&self) -> Result<String, ManifestError> {
        let mut out = String::new();
        self.render_object(&mut out, SECTIONS_BINDING, |s| {
            s.partitions.iter().map(|p| p.as_char()).collect()
        })?;
        out.push('\n');
        self.render_object(&mut out, NAMES_BINDING, |s| s.category.name().to_string())?;
        out.push('\n');
        self.render_object(&mut out, LABELS_BINDING, |s| s.category.label().to_string())?;
        out.push('\n');
        Ok(out)
    }

    fn render_object(
        &self,
        out: &mut String,
        binding: &str,
        value: impl Fn(&ManifestSection) -> String,
    ) -> Result<(), ManifestError> {
        writeln!(out, "var {binding} =")?;
        out.push_str("{\n");
        for (i, section) in self.sections.iter().enumerate() {
            write!(out, "  {i}: {}", serde_json::to_string(&value(section))?)?;
            if i + 1 < self.sections.len() {
                out.push(',');
            }
            out.push('\n');
        }
        out.push_str("};\n");
        Ok(())
    }

    pub fn parse(src: &str) -> Result<Self, ManifestError> {
        let bindings = parse_script(src)?;
        let contents = string_object(&bindings, SECTIONS_BINDING)?;
        let names = string_object(&bindings, NAMES_BINDING)?;

        let mut sections = Vec::with_capacity(contents.len());
        for (number, chars) in contents {
            let name = names
                .iter()
                .find(|(n, _)| *n == number)
                .map(|(_, name)| *name)
                .ok_or_else(|| ManifestError::UnnamedSection(number.to_string()))?;
            let category = Category::from_name(name)
                .ok_or_else(|| ManifestError::UnknownCategory(name.to_string()))?;
            sections.push(ManifestSection {
                category,
                partitions: chars.chars().map(Partition::new).collect(),
            });
        }
        Ok(Self { sections })
    }
}

/// Reads a `{ 0: "...", 1: "..." }` binding, ordered by section number.
fn string_object<'a>(
    bindings: &'a [crate::script::Binding],
    binding: &'static str,
) -> Result<Vec<(u32, &'a str)>, ManifestError> {
    let literal = find_binding(bindings, binding).ok_or(ManifestError::MissingBinding(binding))?;
    let Literal::Object(props) = literal else {
        return Err(ManifestError::Shape {
            binding,
            reason: format!("expected an object, found a {}", literal.kind()),
        });
    };

    let mut out = props
        .iter()
        .map(|(number, value)| -> Result<(u32, &'a str), ManifestError> {
            let number = number.parse::<u32>().map_err(|_| ManifestError::Shape {
                binding,
                reason: format!("section key {number:?} is not a number"),
            })?;
            let value = value.as_str().ok_or_else(|| ManifestError::Shape {
                binding,
                reason: format!("section {number} is not a string"),
            })?;
            Ok((number, value))
        })
        .collect::<Result<Vec<_>, _>>()?;
    out.sort_by_key(|(number, _)| *number);
    Ok(out)
}

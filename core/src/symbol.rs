//! Documented symbols the index is generated from.

use crate::types::{Category, Target};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SymbolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Class,
    Struct,
    Union,
    Interface,
    Namespace,
    File,
    Function,
    Variable,
    Typedef,
    Enum,
    EnumValue,
    Related,
    Define,
    Group,
    Page,
}

impl SymbolKind {
    /// Category the symbol is listed under besides `all`.
    pub fn category(self) -> Category {
        match self {
            SymbolKind::Class | SymbolKind::Struct | SymbolKind::Union | SymbolKind::Interface => {
                Category::Classes
            }
            SymbolKind::Namespace => Category::Namespaces,
            SymbolKind::File => Category::Files,
            SymbolKind::Function => Category::Functions,
            SymbolKind::Variable => Category::Variables,
            SymbolKind::Typedef => Category::Typedefs,
            SymbolKind::Enum => Category::Enums,
            SymbolKind::EnumValue => Category::EnumValues,
            SymbolKind::Related => Category::Related,
            SymbolKind::Define => Category::Defines,
            SymbolKind::Group => Category::Groups,
            SymbolKind::Page => Category::Pages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Display label, e.g. `TaggedCache< SHAMapHash, Blob >`.
    pub name: String,
    /// Enclosing namespace/class path, e.g. `ripple`.
    #[serde(default)]
    pub scope: String,
    /// Fully qualified name shown when a label has several targets.
    #[serde(default)]
    pub qualified_name: Option<String>,
    pub url: String,
    pub kind: SymbolKind,
    #[serde(default = "default_true")]
    pub parent_frame: bool,
}

impl Symbol {
    pub fn new(
        name: impl Into<String>,
        scope: impl Into<String>,
        url: impl Into<String>,
        kind: SymbolKind,
    ) -> Self {
        Self {
            name: name.into(),
            scope: scope.into(),
            qualified_name: None,
            url: url.into(),
            kind,
            parent_frame: true,
        }
    }

    pub fn with_qualified_name(mut self, qualified_name: impl Into<String>) -> Self {
        self.qualified_name = Some(qualified_name.into());
        self
    }

    /// `scope::name`, or the explicit qualified name.
    pub fn qualified_name(&self) -> String {
        match &self.qualified_name {
            Some(name) => name.clone(),
            None if self.scope.is_empty() => self.name.clone(),
            None => format!("{}::{}", self.scope, self.name),
        }
    }

    /// Target shown when this is the label's only declaration.
    pub fn target(&self) -> Target {
        Target {
            url: self.url.clone(),
            scope: self.scope.clone(),
            parent_frame: self.parent_frame,
        }
    }

    /// Target shown next to other declarations of the same label.
    pub fn qualified_target(&self) -> Target {
        Target {
            scope: self.qualified_name(),
            ..self.target()
        }
    }
}

fn default_true() -> bool {
    true
}

/// Loads a JSON array of symbols.
pub fn load_symbols(path: &Path) -> Result<Vec<Symbol>, SymbolError> {
    let content = std::fs::read_to_string(path)?;
    let symbols: Vec<Symbol> = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.display(), count = symbols.len(), "loaded symbols");
    Ok(symbols)
}

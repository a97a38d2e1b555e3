use super::key::normalize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Section of the search index. Each category has its own shard set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    All,
    Classes,
    Namespaces,
    Files,
    Functions,
    Variables,
    Typedefs,
    Enums,
    EnumValues,
    Related,
    Defines,
    Groups,
    Pages,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Category::All,
        Category::Classes,
        Category::Namespaces,
        Category::Files,
        Category::Functions,
        Category::Variables,
        Category::Typedefs,
        Category::Enums,
        Category::EnumValues,
        Category::Related,
        Category::Defines,
        Category::Groups,
        Category::Pages,
    ];

    /// File name stem, e.g. `classes` in `classes_14.js`.
    pub fn name(self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Classes => "classes",
            Category::Namespaces => "namespaces",
            Category::Files => "files",
            Category::Functions => "functions",
            Category::Variables => "variables",
            Category::Typedefs => "typedefs",
            Category::Enums => "enums",
            Category::EnumValues => "enumvalues",
            Category::Related => "related",
            Category::Defines => "defines",
            Category::Groups => "groups",
            Category::Pages => "pages",
        }
    }

    /// Tab label shown by the search box.
    pub fn label(self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Classes => "Classes",
            Category::Namespaces => "Namespaces",
            Category::Files => "Files",
            Category::Functions => "Functions",
            Category::Variables => "Variables",
            Category::Typedefs => "Typedefs",
            Category::Enums => "Enumerations",
            Category::EnumValues => "Enumerator",
            Category::Related => "Friends",
            Category::Defines => "Macros",
            Category::Groups => "Modules",
            Category::Pages => "Pages",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// First lower-cased character of a label; one shard per partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Partition(char);

impl Partition {
    pub fn new(c: char) -> Self {
        Self(c.to_lowercase().next().unwrap_or(c))
    }

    pub fn of_label(label: &str) -> Option<Self> {
        label.chars().next().map(Self::new)
    }

    pub fn as_char(self) -> char {
        self.0
    }

    /// Prefix every key in this partition starts with.
    pub fn key_prefix(self) -> String {
        normalize(self.0.encode_utf8(&mut [0u8; 4]))
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one shard file: category plus partition position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShardId {
    pub category: Category,
    pub index: usize,
}

impl ShardId {
    pub fn new(category: Category, index: usize) -> Self {
        Self { category, index }
    }

    /// `{category}_{index:x}.js`
    pub fn file_name(&self) -> String {
        format!("{}_{:x}.js", self.category.name(), self.index)
    }

    /// Parses a shard file name back into its identity.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let stem = name.strip_suffix(".js")?;
        let (category, index) = stem.rsplit_once('_')?;
        let category = Category::from_name(category)?;
        let index = usize::from_str_radix(index, 16).ok()?;
        Some(Self { category, index })
    }
}

impl fmt::Display for ShardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

use crate::types::Category;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// User-facing configuration, persisted as doxsearch.toml.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Returns the config file path within the given directory.
    pub fn path(dir: &Path) -> PathBuf {
        dir.join("doxsearch.toml")
    }

    /// Loads config from a TOML file. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, AppConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), AppConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates config values and returns list of validation errors.
    /// Returns empty vec if config is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.search.result_limit == 0 {
            errors.push("search.result_limit must be at least 1".to_string());
        }

        if self.logging.level.trim().is_empty() {
            errors.push("logging.level must not be empty".to_string());
        }

        errors
    }

    /// Returns a validated config, replacing invalid values with defaults.
    pub fn with_defaults_for_invalid(&self) -> Self {
        let defaults = Self::default();
        Self {
            index: self.index.clone(),
            search: SearchSettings {
                result_limit: if self.search.result_limit == 0 {
                    defaults.search.result_limit
                } else {
                    self.search.result_limit
                },
                ..self.search.clone()
            },
            logging: LoggingConfig {
                level: if self.logging.level.trim().is_empty() {
                    defaults.logging.level
                } else {
                    self.logging.level.clone()
                },
            },
        }
    }
}

/// Textual rendering of a shard file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `[key, [label, [[url, scope], ...]]]`, JSON strings, raw labels.
    #[default]
    Compact,
    /// `['key_id', ['label', ['url', 1, 'scope'], ...]]`, HTML-escaped labels.
    Doxygen,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Compact => write!(f, "compact"),
            Dialect::Doxygen => write!(f, "doxygen"),
        }
    }
}

/// Index generation settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    #[serde(default)]
    pub dialect: Dialect,
    /// First running id written into doxygen-dialect keys.
    #[serde(default)]
    pub first_id: usize,
    /// Categories to emit; empty means every category with content.
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl IndexConfig {
    pub fn emits(&self, category: Category) -> bool {
        self.categories.is_empty() || self.categories.contains(&category)
    }
}

/// How a query selects entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Key starts with the normalized query.
    Prefix,
    /// Key contains the normalized query.
    #[default]
    Substring,
    /// Label scored by a fuzzy matcher.
    Fuzzy,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Prefix => write!(f, "prefix"),
            MatchMode::Substring => write!(f, "substring"),
            MatchMode::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// Case matching behavior for fuzzy search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMatching {
    /// Always case sensitive.
    Sensitive,
    /// Always case insensitive.
    Insensitive,
    /// Smart case: case-insensitive unless query contains uppercase.
    #[default]
    Smart,
}

/// Search consumer settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(default)]
    pub mode: MatchMode,
    #[serde(default)]
    pub case_matching: CaseMatching,
    #[serde(default = "default_true")]
    pub unicode_normalization: bool,
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            mode: MatchMode::default(),
            case_matching: CaseMatching::default(),
            unicode_normalization: true,
            result_limit: default_result_limit(),
        }
    }
}

/// Logging settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// A level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_result_limit() -> usize {
    50
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

/// Errors that can occur when loading or saving config.
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

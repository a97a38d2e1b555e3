//! Query side of a doxsearch index.
//!
//! Loads the shards of one category and answers queries the way the
//! documentation's search box does:
//!
//! - `Prefix`: keys starting with the normalized query
//! - `Substring`: keys containing it, starting on a character boundary
//! - `Fuzzy`: labels scored by nucleo, best first
//!
//! Results keep load order (shard order, then entry order) except in fuzzy
//! mode, and are capped at `result_limit` entries. Each entry expands to
//! one row per target.

mod config;
mod engine;
mod query;
mod results;

pub use config::{CaseMatching, MatchMode, SearchConfig};
pub use engine::SearchEngine;
pub use query::SearchQuery;
pub use results::{SearchHit, SearchResults, SearchRow};

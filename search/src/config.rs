use doxsearch_core::types::SearchSettings;

pub use doxsearch_core::types::{CaseMatching, MatchMode};

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub mode: MatchMode,
    /// Applies to fuzzy mode; keys are already lower-case.
    pub case_matching: CaseMatching,
    pub unicode_normalization: bool,
    /// Maximum number of entries returned, not rows.
    pub result_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::from(&SearchSettings::default())
    }
}

impl From<&SearchSettings> for SearchConfig {
    fn from(settings: &SearchSettings) -> Self {
        Self {
            mode: settings.mode,
            case_matching: settings.case_matching,
            unicode_normalization: settings.unicode_normalization,
            result_limit: settings.result_limit.max(1),
        }
    }
}

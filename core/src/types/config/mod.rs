mod app;

pub use app::{
    AppConfig, AppConfigError, CaseMatching, Dialect, IndexConfig, LoggingConfig, MatchMode,
    SearchSettings,
};

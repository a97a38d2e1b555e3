use doxsearch_core::types::{AppConfig, CaseMatching, Category, Dialect, MatchMode};
use tempfile::tempdir;

#[test]
fn test_missing_file_yields_defaults() {
    let tmp = tempdir().unwrap();
    let config = AppConfig::load(&AppConfig::path(tmp.path())).unwrap();

    assert_eq!(config, AppConfig::default());
    assert_eq!(config.index.dialect, Dialect::Compact);
    assert_eq!(config.search.mode, MatchMode::Substring);
    assert_eq!(config.search.result_limit, 50);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_partial_file_fills_defaults() {
    let tmp = tempdir().unwrap();
    let path = AppConfig::path(tmp.path());
    std::fs::write(
        &path,
        "[index]\ndialect = \"doxygen\"\ncategories = [\"classes\", \"enumvalues\"]\n\n[search]\nmode = \"fuzzy\"\n",
    )
    .unwrap();

    let config = AppConfig::load(&path).unwrap();

    assert_eq!(config.index.dialect, Dialect::Doxygen);
    assert_eq!(
        config.index.categories,
        vec![Category::Classes, Category::EnumValues]
    );
    assert!(config.index.emits(Category::Classes));
    assert!(!config.index.emits(Category::All));
    assert_eq!(config.search.mode, MatchMode::Fuzzy);
    assert_eq!(config.search.case_matching, CaseMatching::Smart);
    assert_eq!(config.search.result_limit, 50);
}

#[test]
fn test_save_then_load() {
    let tmp = tempdir().unwrap();
    let path = AppConfig::path(tmp.path());
    let mut config = AppConfig::default();
    config.index.first_id = 13452;
    config.search.case_matching = CaseMatching::Insensitive;
    config.logging.level = "doxsearch_core=debug".to_string();

    config.save(&path).unwrap();

    assert_eq!(AppConfig::load(&path).unwrap(), config);
}

#[test]
fn test_invalid_values_are_repaired() {
    let mut config = AppConfig::default();
    config.search.result_limit = 0;
    config.logging.level = "  ".to_string();

    assert_eq!(config.validate().len(), 2);

    let repaired = config.with_defaults_for_invalid();
    assert!(repaired.validate().is_empty());
    assert_eq!(repaired.search.result_limit, 50);
    assert_eq!(repaired.logging.level, "info");
}

#[test]
fn test_malformed_file_is_an_error() {
    let tmp = tempdir().unwrap();
    let path = AppConfig::path(tmp.path());
    std::fs::write(&path, "[search]\nmode = \"telepathy\"\n").unwrap();

    assert!(AppConfig::load(&path).is_err());
}

use super::*;
use crate::symbol::SymbolKind;
use crate::types::ShardId;

mod common {
    use super::*;

    pub(super) fn class(name: &str, scope: &str, url: &str) -> Symbol {
        Symbol::new(name, scope, url, SymbolKind::Class)
    }

    pub(super) fn build(symbols: Vec<Symbol>) -> SearchIndex {
        let mut builder = IndexBuilder::new(IndexConfig::default());
        builder.extend(symbols);
        builder.build().unwrap()
    }

    pub(super) fn tagged_symbols() -> Vec<Symbol> {
        vec![
            class("TaggedCache", "ripple", "../classripple_1_1TaggedCache.html"),
            class(
                "TaggedCache< SHAMapHash, Blob >",
                "ripple",
                "../classripple_1_1TaggedCache.html",
            ),
            class(
                "TaggedFee",
                "ripple::feeunit",
                "../classripple_1_1feeunit_1_1TaggedFee.html",
            ),
            class("Application", "ripple", "../classripple_1_1Application.html"),
        ]
    }
}

mod grouping {
    use super::common::*;
    use super::*;

    #[test]
    fn test_symbol_lands_in_all_and_its_category() {
        let index = build(tagged_symbols());

        let categories: Vec<Category> = index.manifest.sections.iter().map(|s| s.category).collect();
        assert_eq!(categories, vec![Category::All, Category::Classes]);
        assert_eq!(
            index.entries_of(Category::All).count(),
            index.entries_of(Category::Classes).count()
        );
    }

    #[test]
    fn test_partitions_and_shard_names() {
        let index = build(tagged_symbols());

        let names: Vec<String> = index.shards_of(Category::Classes).map(Shard::file_name).collect();
        assert_eq!(names, vec!["classes_0.js", "classes_1.js"]);

        let t = index.shard(ShardId::new(Category::Classes, 1)).unwrap();
        assert_eq!(t.partition, Partition::new('t'));
        let keys: Vec<&str> = t.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "taggedcache",
                "taggedcache_3c_20shamaphash_2c_20blob_20_3e",
                "taggedfee",
            ]
        );
    }

    #[test]
    fn test_single_target_keeps_enclosing_scope() {
        let index = build(tagged_symbols());

        let entry = index
            .entries_of(Category::Classes)
            .find(|e| e.label == "TaggedFee")
            .unwrap();
        assert_eq!(
            entry.targets,
            vec![Target::new(
                "../classripple_1_1feeunit_1_1TaggedFee.html",
                "ripple::feeunit"
            )]
        );
    }

    #[test]
    fn test_shared_label_lists_qualified_names() {
        let index = build(vec![
            class(
                "TestData",
                "ripple::test::detail",
                "../structripple_1_1test_1_1detail_1_1TestData.html",
            ),
            class(
                "TestData",
                "ripple::NodeStore",
                "../classripple_1_1NodeStore_1_1TestData.html",
            ),
        ]);

        let entries: Vec<&IndexEntry> = index.entries_of(Category::Classes).collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].targets,
            vec![
                Target::new(
                    "../structripple_1_1test_1_1detail_1_1TestData.html",
                    "ripple::test::detail::TestData"
                ),
                Target::new(
                    "../classripple_1_1NodeStore_1_1TestData.html",
                    "ripple::NodeStore::TestData"
                ),
            ]
        );
    }

    #[test]
    fn test_targets_keep_declaration_order() {
        let index = build(vec![
            class("Transform", "ripple::STObject", "../c.html"),
            class("Transform", "ripple::PeerFinder::Bootcache", "../d.html"),
            class("Transform", "ripple::STObject", "../c.html"),
            class("Transform", "ripple::PeerFinder::Livecache", "../a.html"),
        ]);

        let entry = index.entries_of(Category::Classes).next().unwrap();
        let urls: Vec<&str> = entry.targets.iter().map(|t| t.url.as_str()).collect();
        assert_eq!(urls, vec!["../c.html", "../d.html", "../a.html"]);
    }

    #[test]
    fn test_explicit_qualified_name_wins() {
        let index = build(vec![
            class("Tracker", "ripple::test::csf::LedgerCollector", "../a.html")
                .with_qualified_name("LedgerCollector::Tracker"),
            class("Tracker", "ripple::test::csf::TxCollector", "../b.html"),
        ]);

        let entry = index.entries_of(Category::Classes).next().unwrap();
        let scopes: Vec<&str> = entry.targets.iter().map(|t| t.scope.as_str()).collect();
        assert_eq!(
            scopes,
            vec!["LedgerCollector::Tracker", "ripple::test::csf::TxCollector::Tracker"]
        );
    }

    #[test]
    fn test_duplicate_declarations_collapse() {
        let symbol = class("TaggedCache", "ripple", "../classripple_1_1TaggedCache.html");
        let index = build(vec![symbol.clone(), symbol]);

        let entry = index.entries_of(Category::Classes).next().unwrap();
        assert_eq!(entry.targets.len(), 1);
        assert_eq!(entry.targets[0].scope, "ripple");
    }

    #[test]
    fn test_labels_differing_only_in_case_stay_separate() {
        let index = build(vec![
            class("Tx", "ripple", "../a.html"),
            class("TX", "ripple", "../b.html"),
        ]);

        let labels: Vec<&str> = index
            .entries_of(Category::Classes)
            .map(|e| e.label.as_str())
            .collect();
        assert_eq!(labels, vec!["TX", "Tx"]);
    }
}

mod config {
    use super::common::*;
    use super::*;

    #[test]
    fn test_running_ids_continue_across_shards() {
        let config = IndexConfig {
            first_id: 100,
            ..IndexConfig::default()
        };
        let mut builder = IndexBuilder::new(config);
        builder.extend(tagged_symbols());
        let index = builder.build().unwrap();

        let ids: Vec<(String, usize, usize)> = index
            .shards
            .iter()
            .map(|s| (s.file_name(), s.first_id, s.len()))
            .collect();
        assert_eq!(
            ids,
            vec![
                ("all_0.js".to_string(), 100, 1),
                ("all_1.js".to_string(), 101, 3),
                ("classes_0.js".to_string(), 104, 1),
                ("classes_1.js".to_string(), 105, 3),
            ]
        );
    }

    #[test]
    fn test_category_filter() {
        let config = IndexConfig {
            categories: vec![Category::Classes],
            ..IndexConfig::default()
        };
        let mut builder = IndexBuilder::new(config);
        builder.extend(tagged_symbols());
        let index = builder.build().unwrap();

        assert!(index.shards_of(Category::All).next().is_none());
        assert_eq!(index.entries_of(Category::Classes).count(), 4);
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut builder = IndexBuilder::new(IndexConfig::default());
        builder.add(class("", "ripple", "../x.html"));

        let err = builder.build().unwrap_err();
        assert!(matches!(err, BuildError::InvalidName { url, .. } if url == "../x.html"));
    }

    #[test]
    fn test_empty_builder_builds_empty_index() {
        let builder = IndexBuilder::new(IndexConfig::default());
        assert!(builder.is_empty());

        let index = builder.build().unwrap();
        assert!(index.shards.is_empty());
        assert!(index.manifest.sections.is_empty());
    }
}

mod determinism {
    use super::common::*;
    use crate::shard::render_shard;
    use crate::types::{Category, Dialect, IndexConfig};
    use crate::{IndexBuilder, Symbol, SymbolKind};

    const CLASSES_T: &str = include_str!("../../tests/fixtures/classes_14.js");

    #[test]
    fn test_input_order_does_not_matter() {
        let forward = build(tagged_symbols());
        let mut reversed = tagged_symbols();
        reversed.reverse();
        let backward = build(reversed);

        assert_eq!(forward, backward);
        assert_eq!(
            forward.fingerprint(Dialect::Doxygen).unwrap(),
            backward.fingerprint(Dialect::Doxygen).unwrap()
        );
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let before = build(tagged_symbols());
        let mut symbols = tagged_symbols();
        symbols.push(class("Transaction", "ripple", "../classripple_1_1Transaction.html"));
        let after = build(symbols);

        assert_ne!(
            before.fingerprint(Dialect::Compact).unwrap(),
            after.fingerprint(Dialect::Compact).unwrap()
        );
    }

    #[test]
    fn test_regenerates_reference_row() {
        let expected = CLASSES_T
            .lines()
            .find(|line| line.contains("'testdata_13489'"))
            .unwrap()
            .trim()
            .trim_end_matches(',');
        let config = IndexConfig {
            first_id: 13489,
            categories: vec![Category::Classes],
            ..IndexConfig::default()
        };
        let mut builder = IndexBuilder::new(config);
        builder.add(Symbol::new(
            "TestData",
            "ripple::test::Submit_test",
            "../structripple_1_1test_1_1Submit__test_1_1TestData.html",
            SymbolKind::Struct,
        ));
        builder.add(Symbol::new(
            "TestData",
            "ripple::NodeStore::DatabaseShard_test",
            "../structripple_1_1NodeStore_1_1DatabaseShard__test_1_1TestData.html",
            SymbolKind::Struct,
        ));
        let index = builder.build().unwrap();

        let shard = index.shards_of(Category::Classes).next().unwrap();
        let text = render_shard(shard, Dialect::Doxygen).unwrap();

        assert!(text.contains(&format!("  {expected}\n")), "{text}");
    }
}

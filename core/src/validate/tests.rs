use super::*;
use crate::shard::parse_shard;
use crate::types::{IndexEntry, Partition, Target};

const CLASSES_T: &str = include_str!("../../tests/fixtures/classes_14.js");

mod common {
    use super::*;

    pub(super) fn entry(label: &str) -> IndexEntry {
        IndexEntry::new(label, vec![Target::new(format!("../{label}.html"), "ripple")]).unwrap()
    }

    pub(super) fn shard(partition: char, entries: Vec<IndexEntry>) -> Shard {
        let mut shard = Shard::new(Category::Classes, 0, Partition::new(partition));
        shard.entries = entries;
        shard
    }
}

mod shard {
    use super::common::*;
    use super::*;

    #[test]
    fn test_reference_shard_is_clean() {
        let (shard, _) =
            parse_shard(CLASSES_T, ShardId::new(Category::Classes, 0x14), None).unwrap();
        assert_eq!(validate_shard(&shard), vec![]);
    }

    #[test]
    fn test_no_targets() {
        let mut bad = entry("Tx");
        bad.targets.clear();
        let violations = validate_shard(&shard('t', vec![bad]));
        assert!(matches!(
            violations.as_slice(),
            [Violation::NoTargets { index: 0, .. }]
        ));
    }

    #[test]
    fn test_key_mismatch() {
        let mut bad = entry("Tx");
        bad.label = "TxQ".to_string();
        let violations = validate_shard(&shard('t', vec![bad]));
        assert_eq!(
            violations,
            vec![Violation::KeyMismatch {
                shard: ShardId::new(Category::Classes, 0),
                index: 0,
                key: SearchKey::try_new("tx".to_string()).unwrap(),
                expected: "txq".to_string(),
            }]
        );
    }

    #[test]
    fn test_out_of_order() {
        let violations = validate_shard(&shard('t', vec![entry("Tz"), entry("Ta")]));
        assert!(matches!(
            violations.as_slice(),
            [Violation::OutOfOrder { index: 1, .. }]
        ));
    }

    #[test]
    fn test_outside_partition() {
        let violations = validate_shard(&shard('t', vec![entry("Application")]));
        assert!(matches!(
            violations.as_slice(),
            [Violation::OutsidePartition { partition: 't', .. }]
        ));
    }

    #[test]
    fn test_escaped_partition_prefix() {
        let violations = validate_shard(&shard('_', vec![entry("__x"), entry("_Tx")]));
        assert_eq!(violations, vec![]);
    }

    #[test]
    fn test_empty_url_and_duplicate_label() {
        let mut bad = entry("Tx");
        bad.targets[0].url.clear();
        let violations = validate_shard(&shard('t', vec![bad, entry("Tx")]));
        assert!(violations.iter().any(|v| matches!(v, Violation::EmptyUrl { index: 0, target: 0, .. })));
        assert!(violations.iter().any(|v| matches!(v, Violation::DuplicateLabel { label, .. } if label == "Tx")));
    }
}

mod index {
    use super::common::*;
    use super::*;

    #[test]
    fn test_built_index_is_clean() {
        let index = SearchIndex::from_shards(vec![shard('t', vec![entry("Ta"), entry("Tb")])]);
        assert_eq!(validate_index(&index), vec![]);
    }

    #[test]
    fn test_manifest_disagreement() {
        let mut index = SearchIndex::from_shards(vec![shard('t', vec![entry("Ta")])]);
        let mut extra = shard('u', vec![entry("Ua")]);
        extra.id = ShardId::new(Category::Classes, 1);
        index.shards.push(extra);
        index.manifest.sections[0].partitions.push(Partition::new('v'));
        index.manifest.sections[0].partitions.push(Partition::new('w'));

        let violations = validate_index(&index);

        assert!(!violations.contains(&Violation::UnlistedShard(ShardId::new(Category::Classes, 1))));
        assert!(violations.contains(&Violation::MissingShard(ShardId::new(Category::Classes, 2))));
    }

    #[test]
    fn test_unlisted_shard() {
        let mut index = SearchIndex::from_shards(vec![shard('t', vec![entry("Ta")])]);
        index.manifest.sections.clear();

        let violations = validate_index(&index);

        assert_eq!(
            violations,
            vec![Violation::UnlistedShard(ShardId::new(Category::Classes, 0))]
        );
    }

    #[test]
    fn test_label_in_two_shards_of_one_category() {
        let first = shard('t', vec![entry("Ta")]);
        let mut second = shard('t', vec![entry("Ta")]);
        second.id = ShardId::new(Category::Classes, 1);
        let index = SearchIndex::from_shards(vec![first, second]);

        let violations = validate_index(&index);

        assert!(violations.iter().any(|v| matches!(
            v,
            Violation::DuplicateAcrossShards { label, .. } if label == "Ta"
        )));
    }

    #[test]
    fn test_same_label_in_other_category_is_allowed() {
        let classes = shard('t', vec![entry("Ta")]);
        let mut all = shard('t', vec![entry("Ta")]);
        all.id = ShardId::new(Category::All, 0);
        let index = SearchIndex::from_shards(vec![classes, all]);

        assert_eq!(validate_index(&index), vec![]);
    }
}

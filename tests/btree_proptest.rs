//! Property tests for the B-tree.
//!
//! Random insertion sequences are checked against `std::collections::BTreeSet`
//! and against the structural invariants after every single insert.

use std::collections::BTreeSet;

use ordered_btree::BTree;
use proptest::collection::vec as pvec;
use proptest::prelude::*;

fn height_bound(t: usize, n: usize) -> usize {
    let levels = ((n as f64 + 1.0) / 2.0).ln() / (t as f64).ln();
    levels.ceil().max(0.0) as usize + 1
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every invariant holds after every insert, for any degree.
    #[test]
    fn prop_invariants_after_each_insert(
        t in 1usize..6,
        keys in pvec(any::<i16>(), 0..150),
    ) {
        let mut tree = BTree::new(t).unwrap();
        for key in keys {
            tree.insert(key);
            prop_assert_eq!(tree.check_invariants(), Ok(()));
        }
    }

    /// Inserted keys are found, others are not; duplicates are reported.
    #[test]
    fn prop_membership_matches_std(
        t in 1usize..6,
        keys in pvec(0i32..500, 0..400),
        probes in pvec(0i32..600, 0..100),
    ) {
        let mut tree = BTree::new(t).unwrap();
        let mut model = BTreeSet::new();

        for key in keys {
            prop_assert_eq!(tree.insert(key), model.insert(key));
        }
        prop_assert_eq!(tree.len(), model.len());

        for key in &model {
            prop_assert!(tree.contains(key));
        }
        for probe in probes {
            prop_assert_eq!(tree.contains(&probe), model.contains(&probe));
        }
    }

    /// In-order traversal is the sorted, deduplicated input.
    #[test]
    fn prop_in_order_traversal_sorted(
        t in 1usize..8,
        keys in pvec(any::<u32>(), 0..500),
    ) {
        let mut tree = BTree::new(t).unwrap();
        tree.extend(keys.iter().copied());

        let expected: Vec<u32> = keys.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        let actual: Vec<u32> = tree.iter().copied().collect();
        prop_assert_eq!(actual, expected);
    }

    /// Height stays logarithmic in the number of keys.
    #[test]
    fn prop_height_bound(
        t in 2usize..8,
        keys in pvec(any::<u16>(), 1..1000),
    ) {
        let mut tree = BTree::new(t).unwrap();
        tree.extend(keys);

        prop_assert!(
            tree.height() <= height_bound(t, tree.len()),
            "t = {}, n = {}, height = {}", t, tree.len(), tree.height()
        );
    }

    /// The level view holds each key exactly once and has `height()` levels.
    #[test]
    fn prop_levels_partition_keys(
        t in 1usize..5,
        keys in pvec(any::<i8>(), 0..200),
    ) {
        let mut tree = BTree::new(t).unwrap();
        tree.extend(keys);

        let levels: Vec<_> = tree.levels().collect();
        prop_assert_eq!(levels.len(), tree.height());

        let mut seen: Vec<i8> = levels
            .iter()
            .flat_map(|level| level.iter().flat_map(|group| group.iter().copied()))
            .collect();
        seen.sort();
        let expected: Vec<i8> = tree.iter().copied().collect();
        prop_assert_eq!(seen, expected);
    }

    /// Re-inserting stored keys is rejected and leaves the shape as it was.
    #[test]
    fn prop_duplicates_keep_shape(
        t in 1usize..5,
        keys in pvec(any::<i8>(), 1..120),
        again in pvec(any::<prop::sample::Index>(), 1..60),
    ) {
        let mut tree = BTree::new(t).unwrap();
        tree.extend(keys.iter().copied());

        let dump = tree.dump();
        let splits = tree.stats().snapshot().total_splits();
        for index in again {
            prop_assert!(!tree.insert(*index.get(&keys)));
        }
        prop_assert_eq!(tree.dump(), dump);
        prop_assert_eq!(tree.stats().snapshot().total_splits(), splits);
    }
}

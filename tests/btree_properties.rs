//! Property and randomized tests for the B-tree index.
//!
//! Every sequence of operations is mirrored on a `BTreeSet` and the tree is
//! validated after each step.

use btree_index::{BTree, TreeError};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
enum Op {
    Insert(i32),
    Delete(i32),
}

fn ops(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            (0i32..300).prop_map(Op::Insert),
            (0i32..300).prop_map(Op::Delete),
        ],
        0..max_len,
    )
}

fn apply(tree: &mut BTree<i32>, model: &mut BTreeSet<i32>, op: &Op) -> Result<(), TestCaseError> {
    let height = tree.height();
    match *op {
        Op::Insert(key) => {
            let before = tree.clone();
            let result = tree.insert(key);
            if model.insert(key) {
                prop_assert_eq!(result, Ok(()));
                prop_assert!(tree.height() == height || tree.height() == height + 1);
            } else {
                prop_assert_eq!(result, Err(TreeError::DuplicateKey));
                prop_assert_eq!(&*tree, &before);
            }
        }
        Op::Delete(key) => {
            let before = tree.clone();
            let result = tree.delete(&key);
            if model.remove(&key) {
                prop_assert_eq!(result, Ok(()));
                prop_assert!(tree.height() == height || tree.height() + 1 == height);
            } else {
                prop_assert_eq!(result, Err(TreeError::KeyNotFound));
                prop_assert_eq!(&*tree, &before);
            }
        }
    }

    prop_assert_eq!(tree.validate(), Ok(()));
    prop_assert_eq!(tree.len(), model.len());
    prop_assert_eq!(tree.is_empty(), model.is_empty());
    let keys: Vec<i32> = tree.keys().into_iter().copied().collect();
    let expected: Vec<i32> = model.iter().copied().collect();
    prop_assert_eq!(keys, expected);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128, .. ProptestConfig::default()
    })]

    #[test]
    fn matches_set_model(min_degree in 2usize..6, ops in ops(400)) {
        let mut tree = BTree::new(min_degree).unwrap();
        let mut model = BTreeSet::new();

        for op in &ops {
            apply(&mut tree, &mut model, op)?;
        }

        for key in 0..300 {
            prop_assert_eq!(tree.search(&key).is_some(), model.contains(&key));
        }
    }

    #[test]
    fn drains_to_empty(min_degree in 2usize..5, keys in prop::collection::btree_set(any::<i32>(), 0..200)) {
        let mut tree = BTree::new(min_degree).unwrap();
        for &key in &keys {
            tree.insert(key).unwrap();
        }
        prop_assert_eq!(tree.validate(), Ok(()));

        for key in keys.iter().rev() {
            tree.delete(key).unwrap();
            prop_assert_eq!(tree.validate(), Ok(()));
        }
        prop_assert_eq!(tree.height(), 0);
        prop_assert!(tree.is_empty());
    }
}

#[test]
fn test_shuffled_workload() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for min_degree in 2..8 {
        let mut keys: Vec<u32> = (0..2_000).collect();
        keys.shuffle(&mut rng);

        let mut tree = BTree::new(min_degree).unwrap();
        for &key in &keys {
            tree.insert(key).unwrap();
        }
        tree.assert_invariants();
        assert_eq!(tree.len(), keys.len());

        // Height stays logarithmic in the number of keys
        let bound = 1 + ((keys.len() + 1) as f64 / 2.0).log(min_degree as f64).floor() as usize;
        assert!(
            tree.height() <= bound,
            "height {} exceeds bound {} for t={}",
            tree.height(),
            bound,
            min_degree
        );

        keys.shuffle(&mut rng);
        let (gone, kept) = keys.split_at(keys.len() / 2);
        for key in gone {
            tree.delete(key).unwrap();
        }
        tree.assert_invariants();

        for key in gone {
            assert_eq!(tree.search(key), None);
        }
        for key in kept {
            assert_eq!(tree.search(key), Some(key));
        }
    }
}

#[test]
fn test_leaf_depth_uniform_with_string_keys() {
    let mut tree = BTree::new(2).unwrap();
    for i in 0..100 {
        tree.insert(format!("key_{:03}", i)).unwrap();
    }
    assert!(tree.leaves_same_depth());
    assert!(tree.keys_sorted());
    assert!(tree.key_counts_in_bounds());
    assert!(tree.child_counts_in_bounds());

    let leaf_depths: BTreeSet<usize> = tree
        .nodes()
        .filter(|node| node.is_leaf)
        .map(|node| node.depth)
        .collect();
    assert_eq!(leaf_depths.len(), 1);
    assert_eq!(leaf_depths.into_iter().next(), Some(tree.height() - 1));
}

#[test]
fn test_ascending_then_descending_deletes() {
    let mut tree = BTree::new(3).unwrap();
    for key in 0..500 {
        tree.insert(key).unwrap();
    }
    for key in (0..500).filter(|k| k % 2 == 0) {
        tree.delete(&key).unwrap();
        tree.assert_invariants();
    }
    for key in (0..500).rev().filter(|k| k % 2 == 1) {
        tree.delete(&key).unwrap();
        tree.assert_invariants();
    }
    assert!(tree.is_empty());
    assert_eq!(tree.delete(&1), Err(TreeError::KeyNotFound));
}

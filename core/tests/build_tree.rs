mod common;

use common::build;
use hex_literal::hex;
use sett_core::{build_trie, Blake2bHasher, Tree, EMPTY_ROOT};

use std::collections::BTreeSet;

#[test]
fn empty_set() {
    let tree = build(&[]);
    assert!(tree.is_empty());
    assert_eq!(tree.hash(), EMPTY_ROOT);
    assert_eq!(tree.size(), 0);
}

#[test]
fn singleton_set() {
    let tree = build(&[b"apple"]);
    assert_eq!(tree.size(), 1);
    assert!(matches!(tree, Tree::Leaf(_)));
    // a lone leaf hashes to the digest of its value and owns the whole key
    let digest = hex!("09ad7de5023dec71b2b4d5dc28d296327c6bbd6d47f199cbb9afafc8967d19d9");
    assert_eq!(tree.hash(), digest);
    let prefix_hex: String = tree.prefix().iter().map(|n| format!("{n:x}")).collect();
    assert_eq!(
        prefix_hex,
        "09ad7de5023dec71b2b4d5dc28d296327c6bbd6d47f199cbb9afafc8967d19d9",
    );
}

#[test]
fn two_element_set() {
    let tree = build(&[b"apple", b"banana"]);
    assert_eq!(tree.size(), 2);
    let Tree::Branch(branch) = &tree else {
        panic!("expected a branch");
    };
    assert!(branch.prefix().is_empty());
    assert_eq!(branch.children().count(), 2);
    for (_, child) in branch.children() {
        assert!(matches!(child, Tree::Leaf(_)));
    }
    assert_eq!(
        tree.hash(),
        hex!("a7156ab69db858b92e9c59aad1e4151090dfb3f97ebcdde72f34dae660c8234d"),
    );
}

#[test]
fn known_root_for_seven_values() {
    let tree = build(&[
        b"apple",
        b"banana",
        b"cherry",
        b"date",
        b"elderberry",
        b"fig",
        b"grape",
    ]);
    assert_eq!(tree.size(), 7);
    assert_eq!(
        tree.hash(),
        hex!("0de4f288c37d7c9a6bced161a9a5d08d024464f052e9ab0da2d3e3d6ae21d5a9"),
    );
}

#[test]
fn insertion_order_is_irrelevant() {
    let values = common::random_values(11, 300);
    let mut rotated = values.clone();
    rotated.rotate_left(97);
    let mut reversed = values.clone();
    reversed.reverse();

    let root = build_trie::<Blake2bHasher>(values.clone()).hash();
    assert_eq!(build_trie::<Blake2bHasher>(rotated).hash(), root);
    assert_eq!(build_trie::<Blake2bHasher>(reversed).hash(), root);
}

#[test]
fn size_counts_distinct_values() {
    let mut values = common::random_values(23, 200);
    let distinct: BTreeSet<Vec<u8>> = values.iter().cloned().collect();
    // feed every value twice; the builder treats the input as a set
    values.extend(values.clone());
    let tree = build_trie::<Blake2bHasher>(values);
    assert_eq!(tree.size(), distinct.len());
}

#[test]
fn child_at_reaches_every_leaf() {
    let values = common::random_values(37, 64);
    let tree = build_trie::<Blake2bHasher>(values.clone());
    for value in &values {
        let key = <Blake2bHasher as sett_core::TrieHasher>::hash(value);
        let path: String = key.iter().map(|b| format!("{b:02x}")).collect();
        let node = tree.child_at(&path).expect("key path leads to a node");
        let Tree::Leaf(leaf) = node else {
            panic!("full key path must end at a leaf");
        };
        assert_eq!(leaf.value(), &value[..]);
    }
    assert!(tree.child_at("").is_some());
}

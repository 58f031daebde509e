//! Canonical tree construction.
//!
//! A set of values folds into exactly one tree: keys are the digests of the
//! values, the working set is sorted by key, and each recursion level hoists
//! the common prefix of its keys and partitions on the nibble after it.
//! Neither the common prefix nor the bucket order depends on insertion
//! order, so the root hash is a function of the set alone.

use crate::hasher::TrieHasher;
use crate::nibbles::{Nibbles, KEY_NIBBLES};
use crate::trie::{Tree, BRANCH_WIDTH};

use alloc::boxed::Box;
use alloc::vec::Vec;

/// Build a tree from an iterable of values.
///
/// Each value is keyed by the 64 nibbles of its digest. Duplicate values
/// are deduplicated: equal keys imply equal values under the digest, so the
/// input is treated as a set.
pub fn build_trie<H: TrieHasher>(values: impl IntoIterator<Item = Vec<u8>>) -> Tree {
    let mut items: Vec<(Nibbles, Vec<u8>)> = values
        .into_iter()
        .map(|value| (Nibbles::unpack(&H::hash(&value)), value))
        .collect();
    items.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    items.dedup_by(|a, b| a.0 == b.0);
    build_range::<H>(0, items)
}

impl Tree {
    /// Build a tree from a list of values. Equivalent to [`build_trie`].
    pub fn from_list<H: TrieHasher>(values: impl IntoIterator<Item = Vec<u8>>) -> Tree {
        build_trie::<H>(values)
    }
}

// Build the sub-tree for `items`, whose keys are sorted, distinct, and agree
// on their first `depth` nibbles.
fn build_range<H: TrieHasher>(depth: usize, mut items: Vec<(Nibbles, Vec<u8>)>) -> Tree {
    if items.is_empty() {
        return Tree::empty();
    }
    if items.len() == 1 {
        let (key, value) = items.pop().expect("length checked above");
        return Tree::leaf::<H>(key.slice(depth..KEY_NIBBLES), value);
    }

    // sorted keys: the common prefix of the run is the common prefix of its
    // first and last keys.
    let split = {
        let first = &items[0].0;
        let last = &items[items.len() - 1].0;
        first.common_prefix_len(last)
    };
    let prefix = items[0].0.slice(depth..split);

    // distinct keys diverge before nibble 64, so every key has a nibble at
    // `split` and at least two buckets end up occupied.
    let mut buckets: [Vec<(Nibbles, Vec<u8>)>; BRANCH_WIDTH] = Default::default();
    for (key, value) in items {
        buckets[key.at(split) as usize].push((key, value));
    }

    let mut children: [Option<Box<Tree>>; BRANCH_WIDTH] = Default::default();
    for (slot, bucket) in buckets.into_iter().enumerate() {
        if !bucket.is_empty() {
            children[slot] = Some(Box::new(build_range::<H>(split + 1, bucket)));
        }
    }
    Tree::branch::<H>(prefix, children)
}

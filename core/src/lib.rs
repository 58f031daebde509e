//! Core operations and types of the sett authenticated set.
//!
//! This crate defines a radix-16 Merkle Patricia tree over opaque byte-string
//! values, together with a compact witness mechanism for proving that a value
//! is a member of the set committed to by a root hash.
//!
//! ## Schema
//!
//! Every value is keyed by the 64-nibble rendering of its 256-bit digest, so
//! the structure behaves as an authenticated *set*: inserting the same values
//! in any order yields the same root hash.
//!
//! There are three kinds of nodes:
//!   1. [`Empty`](trie::Tree::Empty), whose hash is the all-zero
//!      [`EMPTY_ROOT`](trie::EMPTY_ROOT).
//!   2. Leaves, which carry a value and the suffix of its key not consumed by
//!      ancestors. A leaf hashes to the digest of its value alone; the suffix
//!      is implied by the value and the ancestry.
//!   3. Branches, which carry a shared prefix and sixteen child slots, one
//!      per nibble, at least two of which are occupied. A branch hashes to
//!      the digest of its packed prefix followed by the hashes of its present
//!      children in ascending slot order.
//!
//! Trees are immutable once built. A [`PathProof`](proof::PathProof) records,
//! for each branch between the root and a value's leaf, the branch's prefix
//! length and the hashes of the siblings not on the path. The same witness
//! verifies in two modes: recomputing the root *with* the value (an inclusion
//! proof) or *without* it (a deletion witness).

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod build;
pub mod hasher;
pub mod nibbles;
pub mod proof;
pub mod trie;

pub use build::build_trie;
pub use hasher::{Blake2bHasher, TrieHasher};
pub use nibbles::{KeyPath, Nibbles, KEY_NIBBLES};
pub use proof::{PathProof, ProofStep, VerifyError, WalkError, WireError, WireProof, WireStep};
pub use trie::{branch_hash, leaf_hash, Branch, Leaf, NodeHash, Tree, BRANCH_WIDTH, EMPTY_ROOT};

//! The three node kinds of the tree and their hashing rule.
//!
//! All nodes hash to 256 bits. A leaf hashes to the digest of its value
//! alone: its prefix is determined by the value's key and whatever the
//! ancestors consumed, and the ancestry is committed to through branch
//! prefixes along the path from the root. A branch hashes to the digest of
//! its packed prefix followed by the hashes of its present children in
//! ascending slot order. The empty tree has the special all-zero hash.

use crate::hasher::TrieHasher;
use crate::nibbles::Nibbles;

use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;
use core::fmt;

/// The hash of a node. In this schema, it is always 256 bits.
pub type NodeHash = [u8; 32];

/// The hash of the empty tree.
pub const EMPTY_ROOT: NodeHash = [0u8; 32];

/// The number of child slots in a branch, one per nibble value.
pub const BRANCH_WIDTH: usize = 16;

/// Hash a leaf holding `value`.
///
/// The hash commits to the value alone; a leaf's prefix never enters it.
pub fn leaf_hash<H: TrieHasher>(value: &[u8]) -> NodeHash {
    H::hash(value)
}

/// Hash a branch from its prefix and the hashes of its present children,
/// given in ascending slot order.
pub fn branch_hash<H: TrieHasher>(
    prefix: &Nibbles,
    child_hashes: impl IntoIterator<Item = NodeHash>,
) -> NodeHash {
    let mut preimage = prefix.pack();
    for hash in child_hashes {
        preimage.extend_from_slice(&hash);
    }
    H::hash(&preimage)
}

/// A node of the tree. Immutable once constructed; hashes are computed
/// eagerly by the constructors.
#[derive(Clone, PartialEq, Eq)]
pub enum Tree {
    /// The empty tree. Hashes to [`EMPTY_ROOT`].
    Empty,
    /// A single value and the suffix of its key not consumed by ancestors.
    Leaf(Leaf),
    /// Sixteen child slots behind a shared prefix, at least two occupied.
    Branch(Branch),
}

/// A leaf node carrying a value.
#[derive(Clone, PartialEq, Eq)]
pub struct Leaf {
    prefix: Nibbles,
    value: Vec<u8>,
    hash: NodeHash,
}

impl Leaf {
    /// The suffix of the value's key owned by this leaf.
    pub fn prefix(&self) -> &Nibbles {
        &self.prefix
    }

    /// The value carried by this leaf.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// The hash of this leaf: the digest of its value.
    pub fn hash(&self) -> NodeHash {
        self.hash
    }
}

/// A branch node dispatching on one nibble.
#[derive(Clone, PartialEq, Eq)]
pub struct Branch {
    prefix: Nibbles,
    children: [Option<Box<Tree>>; BRANCH_WIDTH],
    hash: NodeHash,
    size: usize,
}

impl Branch {
    /// The nibbles shared by every key below this branch and not consumed
    /// by its ancestors.
    pub fn prefix(&self) -> &Nibbles {
        &self.prefix
    }

    /// The child at `slot`, if present.
    pub fn child(&self, slot: u8) -> Option<&Tree> {
        self.children[slot as usize].as_deref()
    }

    /// The present children, in ascending slot order.
    pub fn children(&self) -> impl Iterator<Item = (u8, &Tree)> {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(slot, child)| child.as_deref().map(|c| (slot as u8, c)))
    }

    /// The hash of this branch.
    pub fn hash(&self) -> NodeHash {
        self.hash
    }

    /// The number of leaves below this branch.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Tree {
    /// The empty tree.
    pub fn empty() -> Self {
        Tree::Empty
    }

    /// Construct a leaf. The value may be any byte string, including empty.
    pub fn leaf<H: TrieHasher>(prefix: Nibbles, value: Vec<u8>) -> Self {
        let hash = leaf_hash::<H>(&value);
        Tree::Leaf(Leaf {
            prefix,
            value,
            hash,
        })
    }

    /// Construct a branch from exactly sixteen child slots.
    ///
    /// Panics if fewer than two slots are occupied or if any child is the
    /// empty tree: a one-child branch must be represented as the child
    /// alone, and absent sub-trees as absent slots.
    pub fn branch<H: TrieHasher>(
        prefix: Nibbles,
        children: [Option<Box<Tree>>; BRANCH_WIDTH],
    ) -> Self {
        let mut present = 0usize;
        let mut size = 0usize;
        for child in children.iter().flatten() {
            assert!(!child.is_empty(), "branch child must not be the empty tree");
            present += 1;
            size += child.size();
        }
        assert!(
            present >= 2,
            "branch requires at least two children, got {present}"
        );
        let hash = branch_hash::<H>(&prefix, children.iter().flatten().map(|c| c.hash()));
        Tree::Branch(Branch {
            prefix,
            children,
            hash,
            size,
        })
    }

    /// Whether this is the empty tree.
    pub fn is_empty(&self) -> bool {
        matches!(self, Tree::Empty)
    }

    /// The root hash of this sub-tree.
    pub fn hash(&self) -> NodeHash {
        match self {
            Tree::Empty => EMPTY_ROOT,
            Tree::Leaf(leaf) => leaf.hash,
            Tree::Branch(branch) => branch.hash,
        }
    }

    /// The number of leaves in this sub-tree.
    pub fn size(&self) -> usize {
        match self {
            Tree::Empty => 0,
            Tree::Leaf(_) => 1,
            Tree::Branch(branch) => branch.size,
        }
    }

    /// The path segment owned by this node. Empty for the empty tree.
    pub fn prefix(&self) -> &[u8] {
        match self {
            Tree::Empty => &[],
            Tree::Leaf(leaf) => leaf.prefix.as_slice(),
            Tree::Branch(branch) => branch.prefix.as_slice(),
        }
    }

    /// Whether `value` is a member of the set committed to by this tree.
    pub fn contains<H: TrieHasher>(&self, value: &[u8]) -> bool {
        let path = Nibbles::unpack(&H::hash(value));
        match self.descend(path.as_slice()) {
            Some(Tree::Leaf(leaf)) => leaf.value == value,
            _ => false,
        }
    }

    /// Walk `path` (a hex string, one character per nibble) from this node,
    /// consuming each branch's prefix and dispatching on the nibble after
    /// it. Returns the deepest node reached, or `None` when the path leaves
    /// the tree or is not valid hex.
    ///
    /// This is an inspection helper; the proof machinery records paths with
    /// [`Tree::prove`](crate::proof::PathProof).
    pub fn child_at(&self, path: &str) -> Option<&Tree> {
        let path = Nibbles::from_hex(path)?;
        self.descend(path.as_slice())
    }

    fn descend(&self, path: &[u8]) -> Option<&Tree> {
        if path.is_empty() {
            return Some(self);
        }
        match self {
            Tree::Empty => None,
            Tree::Leaf(leaf) => leaf.prefix.as_slice().starts_with(path).then_some(self),
            Tree::Branch(branch) => {
                let prefix = branch.prefix.as_slice();
                if path.len() <= prefix.len() {
                    return prefix.starts_with(path).then_some(self);
                }
                if !path.starts_with(prefix) {
                    return None;
                }
                let rest = &path[prefix.len()..];
                let child = branch.children[rest[0] as usize].as_deref()?;
                child.descend(&rest[1..])
            }
        }
    }
}

struct HexFmt<'a>(&'a [u8]);

impl fmt::Debug for HexFmt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tree::Empty => write!(f, "Empty"),
            Tree::Leaf(leaf) => leaf.fmt(f),
            Tree::Branch(branch) => branch.fmt(f),
        }
    }
}

impl fmt::Debug for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaf")
            .field("prefix", &self.prefix)
            .field("hash", &HexFmt(&self.hash))
            .finish()
    }
}

impl fmt::Debug for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Branch");
        s.field("prefix", &self.prefix)
            .field("hash", &HexFmt(&self.hash))
            .field("size", &self.size);
        for (slot, child) in self.children() {
            s.field(&format!("{slot:x}"), child);
        }
        s.finish()
    }
}

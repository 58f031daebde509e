//! Proving membership of a single value and verifying the resulting witness.

use crate::hasher::TrieHasher;
use crate::nibbles::{Nibbles, KEY_NIBBLES};
use crate::trie::{branch_hash, leaf_hash, NodeHash, Tree, BRANCH_WIDTH};

use alloc::vec::Vec;
use core::fmt;

/// One recorded branch level along a proven path, root-to-leaf.
///
/// The nibble the path descends on is not stored; a verifier recovers it
/// from the proven value's key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofStep {
    /// The length, in nibbles, of the branch's own prefix.
    pub skip: usize,
    /// Hashes of the branch's other children, keyed by slot. The slot the
    /// path descends into and absent slots are `None`.
    pub neighbors: [Option<NodeHash>; BRANCH_WIDTH],
}

impl ProofStep {
    /// The number of recorded neighbor hashes.
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.iter().flatten().count()
    }
}

/// A witness that a value sits at its keyed path in a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathProof {
    /// The proven value.
    pub value: Vec<u8>,
    /// One step per branch between the root and the value's leaf.
    pub steps: Vec<ProofStep>,
}

/// Errors when walking a path that is not present in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkError {
    /// The tree is empty.
    EmptyTree,
    /// A node's prefix disagrees with the remaining path.
    PrefixMismatch {
        /// The path left to consume at the mismatching node.
        remaining: Nibbles,
    },
    /// The branch slot for the next path nibble holds no child.
    AbsentChild {
        /// The path left to consume at the branch.
        remaining: Nibbles,
    },
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkError::EmptyTree => write!(f, "no value in empty tree"),
            WalkError::PrefixMismatch { remaining } => {
                write!(f, "non-matching prefix at {remaining}")
            }
            WalkError::AbsentChild { remaining } => {
                write!(f, "no child at branch for {remaining}")
            }
        }
    }
}

/// Errors in path proof verification.
///
/// These are structural only. A tampered or mismatched witness is *not* an
/// error: verification still yields a hash, and the caller detects the
/// tampering by comparing it against a trusted root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    /// A proof with no steps cannot be verified without its element: there
    /// is no neighbor to collapse to.
    AmbiguousEmptyProof,
    /// The steps' combined depth overruns the 64-nibble key.
    PathOverrun,
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyError::AmbiguousEmptyProof => {
                write!(f, "empty proof cannot be verified without its element")
            }
            VerifyError::PathOverrun => write!(f, "proof depth exceeds key length"),
        }
    }
}

impl Tree {
    /// Extract a witness that `value` is a member of the set committed to
    /// by this tree. Fails when it is not.
    pub fn prove<H: TrieHasher>(&self, value: &[u8]) -> Result<PathProof, WalkError> {
        let path = Nibbles::unpack(&H::hash(value));
        let steps = walk(self, path.as_slice())?;
        Ok(PathProof {
            value: value.to_vec(),
            steps,
        })
    }
}

// Record the branch levels along `path`, which must lead to a leaf.
fn walk(node: &Tree, path: &[u8]) -> Result<Vec<ProofStep>, WalkError> {
    match node {
        Tree::Empty => Err(WalkError::EmptyTree),
        Tree::Leaf(leaf) => {
            if path.starts_with(leaf.prefix().as_slice()) {
                Ok(Vec::new())
            } else {
                Err(WalkError::PrefixMismatch {
                    remaining: Nibbles::from_slice(path),
                })
            }
        }
        Tree::Branch(branch) => {
            let prefix = branch.prefix().as_slice();
            if !path.starts_with(prefix) {
                return Err(WalkError::PrefixMismatch {
                    remaining: Nibbles::from_slice(path),
                });
            }
            let rest = &path[prefix.len()..];
            let slot = rest[0];
            let child = branch.child(slot).ok_or_else(|| WalkError::AbsentChild {
                remaining: Nibbles::from_slice(rest),
            })?;

            let mut steps = walk(child, &rest[1..])?;
            let mut neighbors = [None; BRANCH_WIDTH];
            for (i, sibling) in branch.children() {
                if i != slot {
                    neighbors[i as usize] = Some(sibling.hash());
                }
            }
            steps.insert(
                0,
                ProofStep {
                    skip: prefix.len(),
                    neighbors,
                },
            );
            Ok(steps)
        }
    }
}

impl PathProof {
    /// Recompute a candidate root hash from this witness.
    ///
    /// With `with_element`, the result is the root of the tree containing
    /// the proven value. Without it, the result is the root of the same
    /// tree with the value removed: a branch left with a single surviving
    /// child collapses onto that child.
    ///
    /// The caller compares the returned hash against a trusted root.
    pub fn verify<H: TrieHasher>(&self, with_element: bool) -> Result<NodeHash, VerifyError> {
        let path = Nibbles::unpack(&H::hash(&self.value));
        let mut cursor: usize = self.steps.iter().map(|step| 1 + step.skip).sum();
        if cursor > KEY_NIBBLES {
            return Err(VerifyError::PathOverrun);
        }

        let mut acc = if with_element {
            Some(leaf_hash::<H>(&self.value))
        } else if self.steps.is_empty() {
            return Err(VerifyError::AmbiguousEmptyProof);
        } else {
            None
        };

        for step in self.steps.iter().rev() {
            cursor -= 1 + step.skip;
            let prefix = path.slice(cursor..cursor + step.skip);
            let slot = path.at(cursor + step.skip) as usize;

            if acc.is_none() && step.neighbor_count() == 1 {
                // the branch had exactly two children; removing the value
                // collapses it onto the surviving sibling.
                acc = step.neighbors.iter().flatten().next().copied();
                continue;
            }

            let mut hashes: Vec<NodeHash> = Vec::with_capacity(step.neighbor_count() + 1);
            for i in 0..BRANCH_WIDTH {
                if i == slot {
                    if let Some(acc) = acc {
                        hashes.push(acc);
                    }
                } else if let Some(neighbor) = step.neighbors[i] {
                    hashes.push(neighbor);
                }
            }
            acc = Some(branch_hash::<H>(&prefix, hashes));
        }

        // with the element the accumulator is seeded; without it, the first
        // step either collapses or hashes, and the steps list is non-empty.
        Ok(acc.expect("accumulator set by seed or first step"))
    }
}

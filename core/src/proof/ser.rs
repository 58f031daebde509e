//! Wire format for path proofs.
//!
//! A step serializes to three fields: `skip`, the branch-prefix length in
//! nibbles; `neighbors`, the concatenation of the present neighbor hashes
//! in ascending slot order, 32 raw bytes each; and `lookup`, one byte per
//! branch slot giving the running index into `neighbors` at which that
//! slot's hash sits when present. Presence of slot `i` is recovered by
//! comparing `lookup[i]` against the next entry (or the blob length for the
//! last slot), so no separate bitmap is needed.
//!
//! The rendering is pretty-printed JSON. Round-tripping a proof through
//! `serialise`/`deserialise` preserves its verification result.

use super::path_proof::{PathProof, ProofStep};
use crate::trie::{NodeHash, BRANCH_WIDTH};

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

/// The serialized form of a [`PathProof`].
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshDeserialize, borsh::BorshSerialize)
)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireProof {
    /// The proven value.
    pub value: Vec<u8>,
    /// The recorded branch levels, root-to-leaf.
    pub steps: Vec<WireStep>,
}

/// The serialized form of a [`ProofStep`].
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshDeserialize, borsh::BorshSerialize)
)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireStep {
    /// The branch-prefix length in nibbles.
    pub skip: u64,
    /// Present neighbor hashes, concatenated in ascending slot order.
    pub neighbors: Vec<u8>,
    /// Per-slot running index into `neighbors`.
    pub lookup: [u8; BRANCH_WIDTH],
}

/// Errors when decoding a wire proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// The buffer is not the JSON rendering of a proof.
    Json(String),
    /// A step's neighbor blob is not a whole number of 32-byte hashes, or
    /// holds more hashes than a branch has slots.
    UnalignedNeighbors,
    /// A step's lookup table disagrees with its neighbor blob.
    BadLookup,
    /// A step's skip does not fit a 64-nibble key.
    SkipOutOfRange,
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::Json(err) => write!(f, "malformed proof encoding: {err}"),
            WireError::UnalignedNeighbors => write!(f, "neighbor blob is not whole hashes"),
            WireError::BadLookup => write!(f, "lookup table disagrees with neighbors"),
            WireError::SkipOutOfRange => write!(f, "skip does not fit a key"),
        }
    }
}

impl From<&ProofStep> for WireStep {
    fn from(step: &ProofStep) -> Self {
        let mut neighbors = Vec::with_capacity(32 * step.neighbor_count());
        let mut lookup = [0u8; BRANCH_WIDTH];
        let mut index = 0u8;
        for slot in 0..BRANCH_WIDTH {
            lookup[slot] = index;
            if let Some(hash) = &step.neighbors[slot] {
                neighbors.extend_from_slice(hash);
                index += 1;
            }
        }
        WireStep {
            skip: step.skip as u64,
            neighbors,
            lookup,
        }
    }
}

impl TryFrom<&WireStep> for ProofStep {
    type Error = WireError;

    fn try_from(wire: &WireStep) -> Result<Self, WireError> {
        if wire.neighbors.len() % 32 != 0 {
            return Err(WireError::UnalignedNeighbors);
        }
        let total = wire.neighbors.len() / 32;
        if total >= BRANCH_WIDTH {
            // a step records at most 15 neighbors: one slot is the path's
            return Err(WireError::UnalignedNeighbors);
        }
        let skip = usize::try_from(wire.skip).map_err(|_| WireError::SkipOutOfRange)?;
        if skip >= crate::nibbles::KEY_NIBBLES {
            return Err(WireError::SkipOutOfRange);
        }
        if wire.lookup[0] != 0 {
            return Err(WireError::BadLookup);
        }

        let mut neighbors = [None; BRANCH_WIDTH];
        for slot in 0..BRANCH_WIDTH {
            let start = wire.lookup[slot] as usize;
            let end = if slot + 1 < BRANCH_WIDTH {
                wire.lookup[slot + 1] as usize
            } else {
                total
            };
            match end.checked_sub(start) {
                Some(0) => {}
                Some(1) => {
                    let mut hash: NodeHash = [0u8; 32];
                    hash.copy_from_slice(&wire.neighbors[start * 32..start * 32 + 32]);
                    neighbors[slot] = Some(hash);
                }
                _ => return Err(WireError::BadLookup),
            }
        }
        Ok(ProofStep { skip, neighbors })
    }
}

impl From<&PathProof> for WireProof {
    fn from(proof: &PathProof) -> Self {
        WireProof {
            value: proof.value.clone(),
            steps: proof.steps.iter().map(WireStep::from).collect(),
        }
    }
}

impl TryFrom<&WireProof> for PathProof {
    type Error = WireError;

    fn try_from(wire: &WireProof) -> Result<Self, WireError> {
        let steps = wire
            .steps
            .iter()
            .map(ProofStep::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PathProof {
            value: wire.value.clone(),
            steps,
        })
    }
}

impl PathProof {
    /// Render this proof as pretty-printed JSON bytes.
    pub fn serialise(&self) -> Vec<u8> {
        serde_json::to_vec_pretty(&WireProof::from(self))
            .expect("wire types serialize without error")
    }

    /// Decode a proof from its [`serialise`](PathProof::serialise) rendering.
    pub fn deserialise(bytes: &[u8]) -> Result<PathProof, WireError> {
        let wire: WireProof =
            serde_json::from_slice(bytes).map_err(|err| WireError::Json(err.to_string()))?;
        PathProof::try_from(&wire)
    }
}

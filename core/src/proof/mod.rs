//! Path proofs and proof verification.
//!
//! A tree is an authenticated structure: a small witness extracted from it
//! lets an independent verifier recompute the root hash from the proven
//! value alone. The same witness serves two statements. Verified *with* the
//! element it reproduces the root of the tree containing the value; *without*
//! the element it reproduces the root of the tree from which the value was
//! removed, so one proof witnesses both an insertion and a deletion.

mod path_proof;
mod ser;

pub use path_proof::{PathProof, ProofStep, VerifyError, WalkError};
pub use ser::{WireError, WireProof, WireStep};

#![no_main]

use libfuzzer_sys::fuzz_target;
use sett_core::{Blake2bHasher, PathProof};

fuzz_target!(|data: &[u8]| {
    let Ok(proof) = PathProof::deserialise(data) else {
        return;
    };

    // decoded proofs re-encode canonically
    let bytes = proof.serialise();
    let again = PathProof::deserialise(&bytes).expect("re-encoded proof must decode");
    assert_eq!(proof, again);

    // verification of adversarial witnesses yields a hash or a structural
    // error, never a panic
    let _ = proof.verify::<Blake2bHasher>(true);
    let _ = proof.verify::<Blake2bHasher>(false);
});

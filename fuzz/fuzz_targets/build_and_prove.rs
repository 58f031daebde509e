#![no_main]

use libfuzzer_sys::fuzz_target;
use sett_core::{build_trie, Blake2bHasher};

fuzz_target!(|values: Vec<Vec<u8>>| {
    let tree = build_trie::<Blake2bHasher>(values.clone());
    let root = tree.hash();

    for value in &values {
        assert!(tree.contains::<Blake2bHasher>(value));
        let proof = tree
            .prove::<Blake2bHasher>(value)
            .expect("built values are present");
        assert!(proof.steps.len() <= 64);
        assert_eq!(proof.verify::<Blake2bHasher>(true).unwrap(), root);
    }
});

use rand::{Rng, SeedableRng};
use sett_core::{build_trie, Blake2bHasher, PathProof, Tree};

pub fn build(values: &[&[u8]]) -> Tree {
    build_trie::<Blake2bHasher>(values.iter().map(|v| v.to_vec()))
}

#[allow(dead_code)]
pub fn prove(tree: &Tree, value: &[u8]) -> PathProof {
    tree.prove::<Blake2bHasher>(value).expect("value is present")
}

/// Deterministic pseudo-random values. Reproducibility matters more than
/// distribution quality here, so a seeded PRNG stands in for real data.
#[allow(dead_code)]
pub fn random_values(seed: u64, count: usize) -> Vec<Vec<u8>> {
    let mut seed_bytes = [0u8; 16];
    seed_bytes[0..8].copy_from_slice(&seed.to_le_bytes());
    let mut rng = rand_pcg::Lcg64Xsh32::from_seed(seed_bytes);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(0..64);
            (0..len).map(|_| rng.gen()).collect()
        })
        .collect()
}

//! Hashers and utilities for implementing them.

/// A hash function over arbitrary-length byte strings, producing 32 bytes.
///
/// The digest is the sole source of cryptographic binding in the tree: value
/// keys and node hashes all flow through it.
///
/// Note that it is illegal for the produced hash to equal `[0; 32]`, as this
/// value is reserved for the empty tree.
pub trait TrieHasher {
    /// Hash an arbitrary-length byte string.
    fn hash(input: &[u8]) -> [u8; 32];
}

/// Blanket implementation for all implementations of `Digest`.
impl<H: digest::Digest<OutputSize = digest::typenum::U32> + Send + Sync> TrieHasher for H {
    fn hash(input: &[u8]) -> [u8; 32] {
        H::digest(input).into()
    }
}

/// The protocol hasher: Blake2b with a 256-bit output, unkeyed and unsalted.
///
/// Root hashes are only comparable between parties using the same hasher;
/// substituting another breaks all compatibility.
pub type Blake2bHasher = blake2::Blake2b<digest::typenum::U32>;

#[cfg(test)]
mod tests {
    use super::{Blake2bHasher, TrieHasher};
    use hex_literal::hex;

    #[test]
    fn blake2b_256_known_answer() {
        assert_eq!(
            Blake2bHasher::hash(b"apple"),
            hex!("09ad7de5023dec71b2b4d5dc28d296327c6bbd6d47f199cbb9afafc8967d19d9"),
        );
        assert_eq!(
            Blake2bHasher::hash(b"banana"),
            hex!("54d4442917baba24a7c417d805221f1751d33a2cf914d6131724c80668b79f76"),
        );
    }
}

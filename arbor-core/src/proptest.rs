//! Property-based tests for Merkle inclusion proofs.
//!
//! Checks generation and verification invariants over arbitrary trees.

use proptest::prelude::*;

use crate::crypto::{Blake3Hasher, Hash, HashAlgorithm};
use crate::merkle::{
    compute_root, fast_log2_ceil, generate_inclusion_proof, verify_inclusion_proof, MAX_PROOF_LEN,
};

// ============================================================================
// Arbitrary Implementations
// ============================================================================

/// Generate arbitrary hash values (simulating leaf data).
fn arb_hash() -> impl Strategy<Value = Hash> {
    prop::array::uniform32(any::<u8>()).prop_map(Hash::from_bytes)
}

/// Generate a non-empty tree and an index inside it.
fn arb_tree_and_index(max_leaves: usize) -> impl Strategy<Value = (Vec<Hash>, u32)> {
    prop::collection::vec(arb_hash(), 1..max_leaves).prop_flat_map(|leaves| {
        let n = leaves.len() as u32;
        (Just(leaves), 0..n)
    })
}

/// Generate an arbitrary hash algorithm.
fn arb_algorithm() -> impl Strategy<Value = HashAlgorithm> {
    prop_oneof![
        Just(HashAlgorithm::Blake3),
        Just(HashAlgorithm::Sha256),
        Just(HashAlgorithm::DoubleSha256),
    ]
}

// ============================================================================
// Property Tests: Log2
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// fast_log2_ceil agrees with leading_zeros
    #[test]
    fn prop_log2_ceil_matches_leading_zeros(n in 2u32..=u32::MAX) {
        prop_assert_eq!(fast_log2_ceil(n), (32 - (n - 1).leading_zeros()) as u8);
    }

    /// 2^(result-1) < n <= 2^result
    #[test]
    fn prop_log2_ceil_brackets_input(n in 1u32..=u32::MAX) {
        let levels = u32::from(fast_log2_ceil(n));
        prop_assert!(u64::from(n) <= 1u64 << levels);
        if levels > 0 {
            prop_assert!(u64::from(n) > 1u64 << (levels - 1));
        }
    }
}

// ============================================================================
// Property Tests: Generation and Verification
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every generated proof verifies against the tree's root
    #[test]
    fn prop_roundtrip((leaves, index) in arb_tree_and_index(80), algorithm in arb_algorithm()) {
        let root = compute_root(&algorithm, &leaves);
        let proof = generate_inclusion_proof(&algorithm, &leaves, index).expect("index is in range");
        prop_assert!(verify_inclusion_proof(&algorithm, &root, &leaves[index as usize], index, &proof));
    }

    /// Proof length is exactly ceil(log2(n))
    #[test]
    fn prop_proof_length((leaves, index) in arb_tree_and_index(200)) {
        let proof = generate_inclusion_proof(&Blake3Hasher, &leaves, index).expect("index is in range");
        prop_assert_eq!(proof.len(), usize::from(fast_log2_ceil(leaves.len() as u32)));
    }

    /// Flipping any bit of the leaf breaks verification
    #[test]
    fn prop_tampered_leaf_rejected(
        (leaves, index) in arb_tree_and_index(64),
        byte in 0usize..32,
        bit in 0u8..8,
    ) {
        let root = compute_root(&Blake3Hasher, &leaves);
        let proof = generate_inclusion_proof(&Blake3Hasher, &leaves, index).expect("index is in range");

        let mut bytes = *leaves[index as usize].as_bytes();
        bytes[byte] ^= 1 << bit;
        prop_assert!(!verify_inclusion_proof(&Blake3Hasher, &root, &Hash::from_bytes(bytes), index, &proof));
    }

    /// Flipping any bit of the root breaks verification
    #[test]
    fn prop_tampered_root_rejected(
        (leaves, index) in arb_tree_and_index(64),
        byte in 0usize..32,
        bit in 0u8..8,
    ) {
        let root = compute_root(&Blake3Hasher, &leaves);
        let proof = generate_inclusion_proof(&Blake3Hasher, &leaves, index).expect("index is in range");

        let mut bytes = *root.as_bytes();
        bytes[byte] ^= 1 << bit;
        prop_assert!(!verify_inclusion_proof(&Blake3Hasher, &Hash::from_bytes(bytes), &leaves[index as usize], index, &proof));
    }

    /// Flipping any bit of any sibling breaks verification
    #[test]
    fn prop_tampered_sibling_rejected(
        (leaves, index) in arb_tree_and_index(64),
        entry in any::<prop::sample::Index>(),
        byte in 0usize..32,
        bit in 0u8..8,
    ) {
        prop_assume!(leaves.len() > 1);

        let root = compute_root(&Blake3Hasher, &leaves);
        let mut proof = generate_inclusion_proof(&Blake3Hasher, &leaves, index).expect("index is in range");

        let entry = entry.index(proof.len());
        let mut bytes = *proof[entry].as_bytes();
        bytes[byte] ^= 1 << bit;
        proof[entry] = Hash::from_bytes(bytes);

        prop_assert!(!verify_inclusion_proof(&Blake3Hasher, &root, &leaves[index as usize], index, &proof));
    }

    /// Generation is pure and leaves the input untouched
    #[test]
    fn prop_generate_is_pure((leaves, index) in arb_tree_and_index(64)) {
        let before = leaves.clone();
        let first = generate_inclusion_proof(&Blake3Hasher, &leaves, index);
        let second = generate_inclusion_proof(&Blake3Hasher, &leaves, index);

        prop_assert_eq!(&leaves, &before);
        prop_assert_eq!(first, second);
    }

    /// Indices at or past the leaf count never yield a proof
    #[test]
    fn prop_out_of_range_rejected(leaves in prop::collection::vec(arb_hash(), 0..64), extra in 0u32..1000) {
        let index = leaves.len() as u32 + extra;
        prop_assert!(generate_inclusion_proof(&Blake3Hasher, &leaves, index).is_none());
    }

    /// Proofs longer than 32 siblings never verify
    #[test]
    fn prop_overlong_proof_rejected(
        siblings in prop::collection::vec(arb_hash(), (MAX_PROOF_LEN + 1)..(MAX_PROOF_LEN + 8)),
        leaf in arb_hash(),
        root in arb_hash(),
        index in any::<u32>(),
    ) {
        prop_assert!(!verify_inclusion_proof(&Blake3Hasher, &root, &leaf, index, &siblings));
    }

    /// Indices the proof depth cannot represent never verify, even with the true root
    #[test]
    fn prop_index_beyond_depth_rejected((leaves, index) in arb_tree_and_index(64), high in 1u32..1024) {
        let root = compute_root(&Blake3Hasher, &leaves);
        let proof = generate_inclusion_proof(&Blake3Hasher, &leaves, index).expect("index is in range");

        let aliased = index | (high << proof.len());
        prop_assert!(!verify_inclusion_proof(&Blake3Hasher, &root, &leaves[index as usize], aliased, &proof));
    }
}

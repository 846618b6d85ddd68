//! Arbor Core - Merkle tree inclusion proofs.
//!
//! This crate builds and checks compact proofs that a leaf (for example a
//! transaction digest) belongs to a Merkle tree identified by its root:
//!
//! - [`crypto`] - 32-byte digests and pluggable hash primitives
//! - [`merkle`] - root computation, proof generation and verification
//! - [`proof`] - an owned inclusion proof value
//! - [`config`] - hash algorithm and batch settings
//!
//! # Example
//!
//! ```rust
//! use arbor_core::{
//!     crypto::{hash, Blake3Hasher},
//!     merkle::{compute_root, generate_inclusion_proof, verify_inclusion_proof},
//! };
//!
//! let leaves: Vec<_> = (0u32..5).map(|i| hash(&i.to_le_bytes())).collect();
//! let root = compute_root(&Blake3Hasher, &leaves);
//!
//! // Prove the leaf at index 3 is in the tree
//! let proof = generate_inclusion_proof(&Blake3Hasher, &leaves, 3).unwrap();
//! assert_eq!(proof.len(), 3);
//! assert!(verify_inclusion_proof(&Blake3Hasher, &root, &leaves[3], 3, &proof));
//!
//! // Out-of-range indices yield no proof
//! assert!(generate_inclusion_proof(&Blake3Hasher, &leaves, 5).is_none());
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod merkle;
pub mod proof;

#[cfg(test)]
mod proptest;

// Re-exports for convenience
pub use config::MerkleConfig;
pub use crypto::{
    hash, hash_pair, Blake3Hasher, DoubleSha256Hasher, Hash, HashAlgorithm, MerkleHasher,
    Sha256Hasher, HASH_SIZE,
};
pub use error::{Error, ErrorCode, Result};
pub use merkle::{
    combined_root, compute_root, fast_log2_ceil, generate_inclusion_proof,
    generate_inclusion_proofs, verify_inclusion_proof, verify_inclusion_proofs, MAX_PROOF_LEN,
};
pub use proof::InclusionProof;

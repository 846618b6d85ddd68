//! Inclusion proof values.
//!
//! [`InclusionProof`] bundles a leaf, its index, and its siblings so a proof
//! can be carried around and checked as one value. The algorithms live in
//! [`crate::merkle`].

use serde::{Deserialize, Serialize};

use crate::crypto::{Hash, MerkleHasher};
use crate::error::{Error, Result};
use crate::merkle::{generate_inclusion_proof, verify_inclusion_proof, MAX_PROOF_LEN};

/// Proof that a leaf is a member of a Merkle tree at a given position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionProof {
    /// The leaf being proved.
    pub leaf: Hash,
    /// Original 0-based index of the leaf.
    pub leaf_index: u32,
    /// Sibling hashes, lowest level first.
    pub siblings: Vec<Hash>,
}

impl InclusionProof {
    /// Generate a proof for the leaf at `leaf_index`.
    ///
    /// Returns `None` when the index is out of range or `leaves` is empty.
    pub fn generate<H: MerkleHasher + ?Sized>(
        hasher: &H,
        leaves: &[Hash],
        leaf_index: u32,
    ) -> Option<Self> {
        let siblings = generate_inclusion_proof(hasher, leaves, leaf_index)?;
        Some(Self {
            leaf: leaves[leaf_index as usize],
            leaf_index,
            siblings,
        })
    }

    /// Number of tree levels this proof spans.
    pub fn depth(&self) -> usize {
        self.siblings.len()
    }

    /// Largest leaf index a proof of this depth can represent.
    ///
    /// `None` when the proof is longer than any `u32` index needs.
    pub fn max_leaf_index(&self) -> Option<u32> {
        if self.siblings.len() > MAX_PROOF_LEN {
            return None;
        }
        u32::try_from((1u64 << self.siblings.len()) - 1).ok()
    }

    /// Check this proof against a trusted root.
    pub fn verify<H: MerkleHasher + ?Sized>(&self, hasher: &H, root: &Hash) -> bool {
        verify_inclusion_proof(hasher, root, &self.leaf, self.leaf_index, &self.siblings)
    }

    /// Check this proof against a trusted root, as a `Result`.
    ///
    /// The error does not say why verification failed.
    pub fn verify_against_root<H: MerkleHasher + ?Sized>(
        &self,
        hasher: &H,
        root: &Hash,
    ) -> Result<()> {
        if self.verify(hasher, root) {
            Ok(())
        } else {
            Err(Error::invalid_proof("inclusion proof does not match root"))
        }
    }
}

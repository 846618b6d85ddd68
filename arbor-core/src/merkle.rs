//! Binary Merkle trees with compact inclusion proofs.
//!
//! Trees are folded bottom-up. When a level has an odd number of nodes, the
//! last node is paired with a copy of itself. For 5 leaves:
//!
//! ```text
//! [0 1 2 3 4]                               (5 entries)
//! 1st level: [h(0||1) h(2||3) h(4||4)]      (3 entries)
//! 2nd level: [h(h01||h23) h(h44||h44)]      (2 entries)
//! 3rd level: [h(h0123||h4444)]              (1 entry)
//! ```
//!
//! An inclusion proof is the list of siblings met on the way from a leaf to
//! the root, lowest level first. Together with the leaf and its original
//! index it is enough to recompute the root:
//!
//! ```text
//!          root = h(h12 || h34)
//!         /                    \
//!   h12 = h(h1 || h2)     h34 = h(h3 || h4)
//!    /        \             /        \
//!   h1        h2           h3        h4
//! ```
//!
//! Proving `h3` (index 2) yields `[h4, h12]`; proving `h2` (index 1) yields
//! `[h1, h34]`.
//!
//! Every function here is pure. Scratch buffers belong to the call, so all of
//! them can run concurrently on shared inputs.

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::config::MerkleConfig;
use crate::crypto::{Hash, MerkleHasher};
use crate::proof::InclusionProof;

/// Longest proof a `u32` leaf index can need.
pub const MAX_PROOF_LEN: usize = 32;

/// Masks for computing floor(log2(x)) of a `u32` in log2(32) = 5 steps.
///
/// Derived from (2^(2^x) - 1) * 2^(2^x) for x in 4..=0.
const LOG2_FLOOR_MASKS: [u32; 5] = [0xffff_0000, 0xff00, 0xf0, 0xc, 0x2];

/// Compute `ceil(log2(n))` in a constant 5 steps.
///
/// This is the exact length of an inclusion proof for a tree with `n` leaves.
/// `n` must be non-zero; zero trips a debug assertion and yields 0 in
/// release builds.
pub fn fast_log2_ceil(n: u32) -> u8 {
    debug_assert!(n != 0, "log2 of zero is undefined");

    // One more than floor(log2(n)) when n is not a power of two.
    let mut result = u8::from(n & n.wrapping_sub(1) != 0);
    let mut n = n;
    let mut exponent = 16u8;
    for mask in LOG2_FLOOR_MASKS {
        if n & mask != 0 {
            result += exponent;
            n >>= exponent;
        }
        exponent >>= 1;
    }
    result
}

/// Pair an unbalanced last node with itself.
fn pad_level(level: &mut Vec<Hash>) {
    if level.len() & 1 != 0 {
        if let Some(&last) = level.last() {
            level.push(last);
        }
    }
}

/// Replace `level` with its parents, in place.
fn fold_level<H: MerkleHasher + ?Sized>(hasher: &H, level: &mut Vec<Hash>) {
    pad_level(level);
    let parents = level.len() >> 1;
    for i in 0..parents {
        let left = level[i << 1];
        let right = level[(i << 1) + 1];
        level[i] = hasher.hash_pair(&left, &right);
    }
    level.truncate(parents);
}

/// Private copy of the leaves, with room for the padding node.
fn working_copy(leaves: &[Hash]) -> Vec<Hash> {
    let mut level = Vec::with_capacity(leaves.len() + (leaves.len() & 1));
    level.extend_from_slice(leaves);
    level
}

/// Compute the Merkle root of `leaves`.
///
/// An empty tree has root [`Hash::ZERO`]; a single leaf is its own root.
pub fn compute_root<H: MerkleHasher + ?Sized>(hasher: &H, leaves: &[Hash]) -> Hash {
    match leaves {
        [] => Hash::ZERO,
        [leaf] => *leaf,
        _ => {
            let mut level = working_copy(leaves);
            while level.len() > 1 {
                fold_level(hasher, &mut level);
            }
            level[0]
        }
    }
}

/// Combine the roots of two trees into one commitment.
///
/// The result is the root of the two-leaf tree `[root(first), root(second)]`,
/// as used by headers that commit to a regular and a stake transaction tree.
pub fn combined_root<H: MerkleHasher + ?Sized>(hasher: &H, first: &[Hash], second: &[Hash]) -> Hash {
    hasher.hash_pair(&compute_root(hasher, first), &compute_root(hasher, second))
}

/// Generate an inclusion proof for the leaf at `leaf_index`.
///
/// Returns the sibling hashes from the leaf's level up to, but excluding, the
/// root. The proof has exactly [`fast_log2_ceil`]`(leaves.len())` entries and
/// is empty for a single-leaf tree.
///
/// Returns `None` when `leaves` is empty, when `leaf_index` is out of range,
/// or when there are more leaves than a `u32` index can address.
pub fn generate_inclusion_proof<H: MerkleHasher + ?Sized>(
    hasher: &H,
    leaves: &[Hash],
    leaf_index: u32,
) -> Option<Vec<Hash>> {
    let Ok(count) = u32::try_from(leaves.len()) else {
        debug!(leaves = leaves.len(), "too many leaves for a u32 index");
        return None;
    };
    if count == 0 || leaf_index >= count {
        debug!(leaves = count, leaf_index, "no proof for out-of-range leaf");
        return None;
    }

    let mut level = working_copy(leaves);
    let mut proof = Vec::with_capacity(usize::from(fast_log2_ceil(count)));
    let mut index = leaf_index;

    while level.len() > 1 {
        pad_level(&mut level);

        // The sibling is on the left when the index is odd at this level.
        proof.push(level[(index ^ 1) as usize]);

        fold_level(hasher, &mut level);
        index >>= 1;
    }

    Some(proof)
}

/// Verify that `leaf` sits at `leaf_index` in the tree with root `root`.
///
/// Returns `false` for any proof that does not reproduce `root`, including
/// proofs longer than [`MAX_PROOF_LEN`] and indices that a proof of this
/// length cannot represent. Never panics.
pub fn verify_inclusion_proof<H: MerkleHasher + ?Sized>(
    hasher: &H,
    root: &Hash,
    leaf: &Hash,
    leaf_index: u32,
    proof: &[Hash],
) -> bool {
    // The bound must hold before shifting by the proof length.
    if proof.len() > MAX_PROOF_LEN {
        trace!(len = proof.len(), "proof longer than any u32 index needs");
        return false;
    }
    let max_leaf_index = (1u64 << proof.len()) - 1;
    if u64::from(leaf_index) > max_leaf_index {
        trace!(leaf_index, max_leaf_index, "leaf index beyond proof depth");
        return false;
    }

    let mut index = leaf_index;
    let mut intermediate = *leaf;
    for sibling in proof {
        intermediate = if index & 1 != 0 {
            hasher.hash_pair(sibling, &intermediate)
        } else {
            hasher.hash_pair(&intermediate, sibling)
        };
        index >>= 1;
    }

    intermediate == *root
}

/// Generate one proof per requested index, in request order.
///
/// Hashes with the configured algorithm and runs in parallel once the batch
/// reaches the configured threshold.
pub fn generate_inclusion_proofs(
    leaves: &[Hash],
    indices: &[u32],
    config: &MerkleConfig,
) -> Vec<Option<Vec<Hash>>> {
    let hasher = config.hasher();
    let parallel = config.is_parallel(indices.len());
    trace!(
        leaves = leaves.len(),
        proofs = indices.len(),
        algorithm = %hasher,
        parallel,
        "generating proofs"
    );

    if parallel {
        indices
            .par_iter()
            .map(|&index| generate_inclusion_proof(&hasher, leaves, index))
            .collect()
    } else {
        indices
            .iter()
            .map(|&index| generate_inclusion_proof(&hasher, leaves, index))
            .collect()
    }
}

/// Verify many proofs against one root, returning one verdict per proof.
///
/// Hashes with the configured algorithm and runs in parallel once the batch
/// reaches the configured threshold.
pub fn verify_inclusion_proofs(
    root: &Hash,
    proofs: &[InclusionProof],
    config: &MerkleConfig,
) -> Vec<bool> {
    let hasher = config.hasher();
    let parallel = config.is_parallel(proofs.len());
    trace!(proofs = proofs.len(), algorithm = %hasher, parallel, "verifying proofs");

    if parallel {
        proofs.par_iter().map(|p| p.verify(&hasher, root)).collect()
    } else {
        proofs.iter().map(|p| p.verify(&hasher, root)).collect()
    }
}

//! Arbor benchmark support.
//!
//! Linking this crate installs mimalloc as the global allocator, so proof
//! generation (one scratch buffer per call) is measured against the same
//! allocator a node would ship with. It also provides the deterministic leaf
//! fixtures shared by every benchmark.
//!
//! # Usage
//!
//! ```ignore
//! use arbor_bench as _;
//! ```

use arbor_core::{Hash, HashAlgorithm, MerkleHasher};
use mimalloc::MiMalloc;

/// Global allocator using mimalloc.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Re-export mimalloc for direct access if needed.
pub use mimalloc;

/// Tree sizes exercised by the benchmarks: balanced and one-past-balanced.
pub const TREE_SIZES: [u32; 6] = [16, 17, 256, 257, 4096, 4097];

/// Deterministic leaf digest for position `i`.
pub fn make_leaf(algorithm: HashAlgorithm, i: u32) -> Hash {
    algorithm.hash(&i.to_le_bytes())
}

/// Deterministic leaf set of size `n`.
pub fn make_leaves(algorithm: HashAlgorithm, n: u32) -> Vec<Hash> {
    (0..n).map(|i| make_leaf(algorithm, i)).collect()
}

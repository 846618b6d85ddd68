//! Digests and hash primitives for Arbor.
//!
//! The Merkle algorithms never call a hash function directly. They take a
//! [`MerkleHasher`], so the primitive is chosen by the caller:
//! - [`Blake3Hasher`] for BLAKE3 (the default, also behind [`hash`] and [`hash_pair`])
//! - [`Sha256Hasher`] for a single SHA-256
//! - [`DoubleSha256Hasher`] for SHA-256d, as used by Bitcoin-family nodes
//! - [`HashAlgorithm`] to pick one of the above from configuration

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Width of every digest in bytes.
pub const HASH_SIZE: usize = 32;

/// A 32-byte hash value.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    /// The zero hash (used as a sentinel).
    pub const ZERO: Self = Self([0u8; HASH_SIZE]);

    /// Create a hash from raw bytes.
    pub const fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Create from hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)?;
        let arr: [u8; HASH_SIZE] = bytes.as_slice().try_into().map_err(|_| {
            Error::invalid_hash(format!("expected {} bytes, got {}", HASH_SIZE, bytes.len()))
        })?;
        Ok(Self(arr))
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Check if this is the zero hash.
    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

/// A collision-resistant hash primitive with a 32-byte output.
///
/// Implementations must be deterministic and total. The Merkle code only
/// relies on [`MerkleHasher::hash_pair`], whose byte order (left first) is
/// part of the proof format: producers and verifiers must agree on it.
pub trait MerkleHasher: Send + Sync {
    /// Hash an arbitrary byte string.
    fn hash(&self, data: &[u8]) -> Hash;

    /// Hash the concatenation `left || right`.
    fn hash_pair(&self, left: &Hash, right: &Hash) -> Hash {
        let mut buf = [0u8; 2 * HASH_SIZE];
        buf[..HASH_SIZE].copy_from_slice(left.as_bytes());
        buf[HASH_SIZE..].copy_from_slice(right.as_bytes());
        self.hash(&buf)
    }
}

impl<H: MerkleHasher + ?Sized> MerkleHasher for &H {
    fn hash(&self, data: &[u8]) -> Hash {
        (**self).hash(data)
    }

    fn hash_pair(&self, left: &Hash, right: &Hash) -> Hash {
        (**self).hash_pair(left, right)
    }
}

/// BLAKE3 hasher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake3Hasher;

impl MerkleHasher for Blake3Hasher {
    fn hash(&self, data: &[u8]) -> Hash {
        Hash(*blake3::hash(data).as_bytes())
    }

    fn hash_pair(&self, left: &Hash, right: &Hash) -> Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(left.as_bytes());
        hasher.update(right.as_bytes());
        Hash(*hasher.finalize().as_bytes())
    }
}

/// Single SHA-256 hasher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Hasher;

impl MerkleHasher for Sha256Hasher {
    fn hash(&self, data: &[u8]) -> Hash {
        Hash(Sha256::digest(data).into())
    }
}

/// SHA-256 applied twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DoubleSha256Hasher;

impl MerkleHasher for DoubleSha256Hasher {
    fn hash(&self, data: &[u8]) -> Hash {
        let first = Sha256::digest(data);
        Hash(Sha256::digest(first).into())
    }
}

/// Runtime selection of a hash primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// BLAKE3.
    #[default]
    Blake3,
    /// Single SHA-256.
    Sha256,
    /// SHA-256 applied twice.
    DoubleSha256,
}

impl HashAlgorithm {
    /// Get the algorithm name.
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Blake3 => "blake3",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::DoubleSha256 => "double_sha256",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl MerkleHasher for HashAlgorithm {
    fn hash(&self, data: &[u8]) -> Hash {
        match self {
            HashAlgorithm::Blake3 => Blake3Hasher.hash(data),
            HashAlgorithm::Sha256 => Sha256Hasher.hash(data),
            HashAlgorithm::DoubleSha256 => DoubleSha256Hasher.hash(data),
        }
    }

    fn hash_pair(&self, left: &Hash, right: &Hash) -> Hash {
        match self {
            HashAlgorithm::Blake3 => Blake3Hasher.hash_pair(left, right),
            HashAlgorithm::Sha256 => Sha256Hasher.hash_pair(left, right),
            HashAlgorithm::DoubleSha256 => DoubleSha256Hasher.hash_pair(left, right),
        }
    }
}

/// Hash arbitrary data with BLAKE3.
pub fn hash(data: &[u8]) -> Hash {
    Blake3Hasher.hash(data)
}

/// Hash two child hashes with BLAKE3 to produce a parent hash.
pub fn hash_pair(left: Hash, right: Hash) -> Hash {
    Blake3Hasher.hash_pair(&left, &right)
}

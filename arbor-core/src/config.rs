//! Configuration for Merkle proof operations.

use serde::{Deserialize, Serialize};

use crate::crypto::HashAlgorithm;
use crate::error::{Error, Result};

/// Default batch size at which batch operations switch to rayon.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Configuration for Merkle proof generation and verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MerkleConfig {
    /// Hash primitive used to combine nodes.
    pub algorithm: HashAlgorithm,

    /// Batch size at which batch operations run in parallel.
    pub parallel_threshold: usize,
}

impl MerkleConfig {
    /// Create a new configuration.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Parse and validate a JSON configuration.
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the parallel threshold.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Never run batch operations in parallel.
    pub fn sequential(mut self) -> Self {
        self.parallel_threshold = usize::MAX;
        self
    }

    /// The configured hash primitive.
    pub fn hasher(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Whether a batch of `len` items runs in parallel.
    pub fn is_parallel(&self, len: usize) -> bool {
        len >= self.parallel_threshold
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.parallel_threshold == 0 {
            return Err(Error::invalid_config(
                "parallel threshold must be at least 1",
            ));
        }

        Ok(())
    }
}

impl Default for MerkleConfig {
    fn default() -> Self {
        Self::new(HashAlgorithm::default())
    }
}

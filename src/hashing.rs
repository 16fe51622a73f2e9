//! Feature hashing: named features to sparse instances.
//!
//! Streams of text-like records rarely come with a fixed feature index.
//! [`FeatureHasher`] maps each feature name to an index deterministically,
//! so the same name always lands on the same index for a given seed.

use crate::error::{InstanceError, Result};
use crate::sparse::SparseInstance;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Deterministic name → index mapping into a fixed number of buckets.
#[derive(Clone, Debug)]
pub struct FeatureHasher {
    dimensions: usize,
    seed: u64,
}

impl FeatureHasher {
    /// Create a hasher with the default seed.
    pub fn new(dimensions: usize) -> Result<Self> {
        Self::with_seed(dimensions, 0)
    }

    /// Create a hasher with a specific seed; zero buckets is an error.
    pub fn with_seed(dimensions: usize, seed: u64) -> Result<Self> {
        if dimensions == 0 {
            return Err(InstanceError::EmptyInput(
                "feature hasher needs at least one bucket".to_string(),
            ));
        }
        Ok(Self { dimensions, seed })
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Bucket for a feature name.
    ///
    /// First 8 bytes of SHA-256(seed || name), little endian, modulo the
    /// bucket count.
    pub fn index_of(&self, name: &str) -> usize {
        let mut hasher = Sha256::new();
        hasher.update(self.seed.to_le_bytes());
        hasher.update(name.as_bytes());
        let hash = hasher.finalize();

        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash[..8]);
        (u64::from_le_bytes(bytes) % self.dimensions as u64) as usize
    }

    /// Hash `(name, value)` features into a sparse instance.
    ///
    /// Features that collide on one bucket have their values summed.
    pub fn hash(&self, features: &[(&str, f64)]) -> SparseInstance {
        let mut buckets: BTreeMap<usize, f64> = BTreeMap::new();
        for &(name, value) in features {
            *buckets.entry(self.index_of(name)).or_insert(0.0) += value;
        }
        let (indices, values) = buckets.into_iter().unzip();
        SparseInstance::from_sorted(indices, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let h1 = FeatureHasher::with_seed(1000, 42).unwrap();
        let h2 = FeatureHasher::with_seed(1000, 42).unwrap();
        assert_eq!(h1.index_of("hello"), h2.index_of("hello"));
    }

    #[test]
    fn test_within_dimensions() {
        let h = FeatureHasher::new(16).unwrap();
        for name in ["a", "b", "protocol=tcp", "src_port=53", ""] {
            assert!(h.index_of(name) < 16);
        }
    }

    #[test]
    fn test_different_seeds() {
        let h1 = FeatureHasher::with_seed(1 << 20, 1).unwrap();
        let h2 = FeatureHasher::with_seed(1 << 20, 2).unwrap();

        let names = ["alpha", "beta", "gamma", "delta"];
        let same = names
            .iter()
            .filter(|n| h1.index_of(n) == h2.index_of(n))
            .count();
        assert!(same < names.len());
    }

    #[test]
    fn test_hash_sorted_and_summed() {
        let h = FeatureHasher::new(1 << 30).unwrap();
        let v = h.hash(&[("word=the", 1.0), ("word=cat", 2.0), ("word=the", 1.0)]);

        assert!(v.indices().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(v.at(h.index_of("word=the")), 2.0);
        assert_eq!(v.at(h.index_of("word=cat")), 2.0);
    }

    #[test]
    fn test_collisions_sum() {
        let h = FeatureHasher::new(1).unwrap();
        let v = h.hash(&[("a", 1.0), ("b", 2.5)]);
        assert_eq!(v.indices(), &[0]);
        assert_eq!(v.values(), &[3.5]);
    }

    #[test]
    fn test_zero_dimensions() {
        assert!(matches!(
            FeatureHasher::new(0),
            Err(InstanceError::EmptyInput(_))
        ));
        assert!(FeatureHasher::with_seed(0, 9).is_err());
    }
}

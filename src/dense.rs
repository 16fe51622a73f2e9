//! Dense instances: every position stored explicitly.
//!
//! Index `i` maps directly to position `i` of the backing vector, and the
//! length is fixed at construction. Updates return a fresh instance.

use crate::error::{InstanceError, Result};
use crate::parser;
use crate::sparse::SparseInstance;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A vector stored as a complete ordered sequence of values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DenseInstance {
    values: Vec<f64>,
}

impl DenseInstance {
    /// Create a dense instance from its values.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Create an all-zero instance of the given length.
    pub fn zeros(len: usize) -> Self {
        Self {
            values: vec![0.0; len],
        }
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the raw values as a slice.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over `(index, value)` for every position.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values.iter().copied().enumerate()
    }

    /// Value at `index`; fails past the end.
    pub fn at(&self, index: usize) -> Result<f64> {
        self.values
            .get(index)
            .copied()
            .ok_or(InstanceError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Return a copy with position `index` replaced by `value`.
    pub fn set(&self, index: usize, value: f64) -> Result<Self> {
        if index >= self.len() {
            return Err(InstanceError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        let mut values = self.values.clone();
        values[index] = value;
        Ok(Self { values })
    }

    /// Apply `f` to every position.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            values: self.values.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Dot product over the index range shared by both operands.
    #[cfg(feature = "simd")]
    pub fn dot(&self, other: &DenseInstance) -> f64 {
        use simsimd::SpatialSimilarity;
        let n = self.len().min(other.len());
        if n == 0 {
            return 0.0;
        }
        f64::dot(&self.values[..n], &other.values[..n]).unwrap_or(0.0)
    }

    /// Dot product over the index range shared by both operands.
    #[cfg(not(feature = "simd"))]
    pub fn dot(&self, other: &DenseInstance) -> f64 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(&a, &b)| a * b)
            .sum()
    }

    /// Dot product against a sparse operand, visiting only its stored indices.
    pub fn dot_sparse(&self, other: &SparseInstance) -> f64 {
        other.dot_dense(self)
    }

    /// Element-wise sum with another dense instance of equal length.
    pub fn add(&self, other: &DenseInstance) -> Result<Self> {
        if self.len() != other.len() {
            return Err(InstanceError::DimensionMismatch {
                expected: self.len(),
                got: other.len(),
            });
        }
        let values = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(&a, &b)| a + b)
            .collect();
        Ok(Self { values })
    }

    /// Element-wise sum with a sparse instance whose indices fit this length.
    ///
    /// A sparse operand reaching past the end is a `DimensionMismatch`, the
    /// same as an unequal dense operand.
    pub fn add_sparse(&self, other: &SparseInstance) -> Result<Self> {
        if other.len() > self.len() {
            return Err(InstanceError::DimensionMismatch {
                expected: self.len(),
                got: other.len(),
            });
        }
        let mut values = self.values.clone();
        for (index, value) in other.iter() {
            values[index] += value;
        }
        Ok(Self { values })
    }

    /// Compute the L2 norm.
    pub fn norm(&self) -> f64 {
        self.values.iter().map(|&v| v * v).sum::<f64>().sqrt()
    }
}

impl fmt::Display for DenseInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:?}", value)?;
        }
        Ok(())
    }
}

impl FromStr for DenseInstance {
    type Err = InstanceError;

    /// Parse space-separated values, e.g. `"3.5 0.0 2.1"`.
    fn from_str(s: &str) -> Result<Self> {
        parser::dense_from_tokens(s.split_whitespace())
    }
}

impl From<Vec<f64>> for DenseInstance {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

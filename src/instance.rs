//! Instance: the dense/sparse vector sum type.
//!
//! Every operation is defined for every pairing of variants. Mixed pairings
//! work through the stored entries of the sparse side, so a sparse operand
//! is never densified implicitly.
//!
//! ```rust
//! use streamvec::{DenseInstance, Instance, SparseInstance};
//!
//! let dense = Instance::from(DenseInstance::new(vec![1.0, 2.0, 3.0]));
//! let sparse = Instance::from(SparseInstance::from_pairs(vec![(0, 2.0), (2, 1.0)])?);
//!
//! assert_eq!(dense.dot(&sparse), 5.0);
//! assert_eq!(sparse.at(1)?, 0.0);
//! # Ok::<(), streamvec::InstanceError>(())
//! ```

use crate::dense::DenseInstance;
use crate::error::{InstanceError, Result};
use crate::sparse::SparseInstance;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage representation selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Every position stored
    #[default]
    Dense,
    /// Only `(index, value)` pairs stored
    Sparse,
}

impl FromStr for Variant {
    type Err = InstanceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" => Ok(Variant::Dense),
            "sparse" => Ok(Variant::Sparse),
            _ => Err(InstanceError::UnknownVariant(s.to_string())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Dense => f.write_str("dense"),
            Variant::Sparse => f.write_str("sparse"),
        }
    }
}

/// An immutable numeric vector, dense or sparse.
///
/// Operations that look like updates (`set`, `map`, `add`) return a new
/// instance and leave the receiver untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum Instance {
    Dense(DenseInstance),
    Sparse(SparseInstance),
}

impl Instance {
    /// Which representation this instance uses.
    pub fn variant(&self) -> Variant {
        match self {
            Instance::Dense(_) => Variant::Dense,
            Instance::Sparse(_) => Variant::Sparse,
        }
    }

    /// Dense length, or one past the largest stored sparse index.
    pub fn len(&self) -> usize {
        match self {
            Instance::Dense(d) => d.len(),
            Instance::Sparse(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Instance::Dense(d) => d.is_empty(),
            Instance::Sparse(s) => s.is_empty(),
        }
    }

    /// Number of explicitly stored values.
    pub fn nnz(&self) -> usize {
        match self {
            Instance::Dense(d) => d.len(),
            Instance::Sparse(s) => s.nnz(),
        }
    }

    /// Compute the L2 norm.
    pub fn norm(&self) -> f64 {
        match self {
            Instance::Dense(d) => d.norm(),
            Instance::Sparse(s) => s.norm(),
        }
    }

    /// Iterate over explicitly stored `(index, value)` pairs in index order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (usize, f64)> + '_> {
        match self {
            Instance::Dense(d) => Box::new(d.iter()),
            Instance::Sparse(s) => Box::new(s.iter()),
        }
    }

    pub fn as_dense(&self) -> Option<&DenseInstance> {
        match self {
            Instance::Dense(d) => Some(d),
            Instance::Sparse(_) => None,
        }
    }

    pub fn as_sparse(&self) -> Option<&SparseInstance> {
        match self {
            Instance::Dense(_) => None,
            Instance::Sparse(s) => Some(s),
        }
    }

    /// Materialize as a dense instance.
    pub fn to_dense(&self) -> DenseInstance {
        match self {
            Instance::Dense(d) => d.clone(),
            Instance::Sparse(s) => s.to_dense(),
        }
    }

    /// Value at `index`.
    ///
    /// Dense instances fail past their length; sparse instances return 0.0
    /// for any absent index.
    pub fn at(&self, index: usize) -> Result<f64> {
        match self {
            Instance::Dense(d) => d.at(index),
            Instance::Sparse(s) => Ok(s.at(index)),
        }
    }

    /// Return a copy with `index` holding `value`.
    pub fn set(&self, index: usize, value: f64) -> Result<Instance> {
        match self {
            Instance::Dense(d) => d.set(index, value).map(Instance::Dense),
            Instance::Sparse(s) => s.set(index, value).map(Instance::Sparse),
        }
    }

    /// Dot product.
    ///
    /// Dense pairs use their shared index range, sparse pairs the
    /// intersection of their index sets, and mixed pairs the sparse side's
    /// indices probed against the dense side.
    pub fn dot(&self, other: &Instance) -> f64 {
        match (self, other) {
            (Instance::Dense(a), Instance::Dense(b)) => a.dot(b),
            (Instance::Dense(a), Instance::Sparse(b)) => a.dot_sparse(b),
            (Instance::Sparse(a), Instance::Dense(b)) => a.dot_dense(b),
            (Instance::Sparse(a), Instance::Sparse(b)) => a.dot(b),
        }
    }

    /// Element-wise sum in the receiver's representation.
    pub fn add(&self, other: &Instance) -> Result<Instance> {
        match (self, other) {
            (Instance::Dense(a), Instance::Dense(b)) => a.add(b).map(Instance::Dense),
            (Instance::Dense(a), Instance::Sparse(b)) => a.add_sparse(b).map(Instance::Dense),
            (Instance::Sparse(a), Instance::Dense(b)) => Ok(Instance::Sparse(a.add_dense(b))),
            (Instance::Sparse(a), Instance::Sparse(b)) => Ok(Instance::Sparse(a.add(b))),
        }
    }

    /// Apply `f` to every stored value. Implicit sparse zeros are skipped.
    pub fn map<F>(&self, f: F) -> Instance
    where
        F: Fn(f64) -> f64,
    {
        match self {
            Instance::Dense(d) => Instance::Dense(d.map(f)),
            Instance::Sparse(s) => Instance::Sparse(s.map(f)),
        }
    }

    /// Serialize to a JSON snapshot tagged with the variant.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore from a snapshot written by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instance::Dense(d) => fmt::Display::fmt(d, f),
            Instance::Sparse(s) => fmt::Display::fmt(s, f),
        }
    }
}

impl From<DenseInstance> for Instance {
    fn from(dense: DenseInstance) -> Self {
        Instance::Dense(dense)
    }
}

impl From<SparseInstance> for Instance {
    fn from(sparse: SparseInstance) -> Self {
        Instance::Sparse(sparse)
    }
}

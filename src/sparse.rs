//! Sparse instances: `(index, value)` pairs with implicit zeros.
//!
//! Indices are kept unique and strictly increasing through every operation,
//! so pairwise operations are linear merge walks over the stored entries and
//! never materialize the implicit zeros.

use crate::dense::DenseInstance;
use crate::error::{InstanceError, Result};
use crate::parser;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Peekable;
use std::str::FromStr;

/// Largest storable index; `usize::MAX` is reserved so `len` never overflows.
pub const MAX_INDEX: usize = usize::MAX - 1;

/// A vector stored as sorted `(index, value)` pairs; absent indices are 0.0.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSparse")]
pub struct SparseInstance {
    indices: Vec<usize>,
    values: Vec<f64>,
}

/// Unvalidated wire form, checked on deserialization.
#[derive(Deserialize)]
struct RawSparse {
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl TryFrom<RawSparse> for SparseInstance {
    type Error = InstanceError;

    fn try_from(raw: RawSparse) -> Result<Self> {
        Self::new(raw.indices, raw.values)
    }
}

impl SparseInstance {
    /// Create a sparse instance from parallel index and value lists.
    ///
    /// Fails if the lists differ in length, the indices are not strictly
    /// increasing, or an index exceeds [`MAX_INDEX`].
    pub fn new(indices: Vec<usize>, values: Vec<f64>) -> Result<Self> {
        if indices.len() != values.len() {
            return Err(InstanceError::DimensionMismatch {
                expected: indices.len(),
                got: values.len(),
            });
        }
        if let Some(w) = indices.windows(2).find(|w| w[0] >= w[1]) {
            return Err(InstanceError::MalformedInput(format!(
                "sparse indices must be strictly increasing, found {} then {}",
                w[0], w[1]
            )));
        }
        if let Some(&last) = indices.last().filter(|&&i| i > MAX_INDEX) {
            return Err(InstanceError::MalformedInput(format!(
                "sparse index {} exceeds the largest index {}",
                last, MAX_INDEX
            )));
        }
        Ok(Self { indices, values })
    }

    /// Create a sparse instance from `(index, value)` pairs in index order.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let (indices, values) = pairs.into_iter().unzip();
        Self::new(indices, values)
    }

    /// An instance with no stored entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from pairs already known to be strictly increasing.
    pub(crate) fn from_sorted(indices: Vec<usize>, values: Vec<f64>) -> Self {
        debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        debug_assert_eq!(indices.len(), values.len());
        Self { indices, values }
    }

    /// Smallest dense length able to hold every stored index.
    pub fn len(&self) -> usize {
        self.indices.last().map_or(0, |&i| i + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over the stored `(index, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Value at `index`, 0.0 when absent.
    pub fn at(&self, index: usize) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    /// Return a copy with `index` holding `value`, inserting it if absent.
    ///
    /// Fails only for an index past [`MAX_INDEX`].
    pub fn set(&self, index: usize, value: f64) -> Result<Self> {
        if index > MAX_INDEX {
            return Err(InstanceError::IndexOutOfRange {
                index,
                len: MAX_INDEX + 1,
            });
        }
        let mut indices = self.indices.clone();
        let mut values = self.values.clone();
        match indices.binary_search(&index) {
            Ok(pos) => values[pos] = value,
            Err(pos) => {
                indices.insert(pos, index);
                values.insert(pos, value);
            }
        }
        Ok(Self { indices, values })
    }

    /// Apply `f` to stored values only; implicit zeros stay implicit.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            indices: self.indices.clone(),
            values: self.values.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Dot product over the intersection of both index sets.
    pub fn dot(&self, other: &SparseInstance) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Dot product against a dense operand, probing it at each stored index.
    pub fn dot_dense(&self, other: &DenseInstance) -> f64 {
        let dense = other.values();
        self.iter()
            .take_while(|&(index, _)| index < dense.len())
            .map(|(index, value)| value * dense[index])
            .sum()
    }

    /// Element-wise sum over the union of both index sets.
    pub fn add(&self, other: &SparseInstance) -> Self {
        union_sum(self.iter(), other.iter())
    }

    /// Element-wise sum with a dense operand; every dense position joins the
    /// index set.
    pub fn add_dense(&self, other: &DenseInstance) -> Self {
        union_sum(self.iter(), other.iter())
    }

    /// Compute the L2 norm of the stored values.
    pub fn norm(&self) -> f64 {
        self.values.iter().map(|&v| v * v).sum::<f64>().sqrt()
    }

    /// Materialize as a dense instance of length [`len`](Self::len).
    pub fn to_dense(&self) -> DenseInstance {
        let mut values = vec![0.0; self.len()];
        for (index, value) in self.iter() {
            values[index] = value;
        }
        DenseInstance::new(values)
    }
}

/// Merge two index-ordered entry streams, summing values at shared indices.
fn union_sum<A, B>(a: A, b: B) -> SparseInstance
where
    A: Iterator<Item = (usize, f64)>,
    B: Iterator<Item = (usize, f64)>,
{
    let mut a: Peekable<A> = a.peekable();
    let mut b: Peekable<B> = b.peekable();
    let mut indices = Vec::new();
    let mut values = Vec::new();

    loop {
        let next = match (a.peek(), b.peek()) {
            (Some(&(i, x)), Some(&(j, y))) => match i.cmp(&j) {
                Ordering::Less => {
                    a.next();
                    (i, x)
                }
                Ordering::Greater => {
                    b.next();
                    (j, y)
                }
                Ordering::Equal => {
                    a.next();
                    b.next();
                    (i, x + y)
                }
            },
            (Some(_), None) => match a.next() {
                Some(entry) => entry,
                None => break,
            },
            (None, Some(_)) => match b.next() {
                Some(entry) => entry,
                None => break,
            },
            (None, None) => break,
        };
        indices.push(next.0);
        values.push(next.1);
    }

    SparseInstance::from_sorted(indices, values)
}

impl fmt::Display for SparseInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, (index, value)) in self.iter().enumerate() {
            if n > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}:{:?}", index, value)?;
        }
        Ok(())
    }
}

impl FromStr for SparseInstance {
    type Err = InstanceError;

    /// Parse `index:value` pairs, e.g. `"0:3.5 2:2.1"`.
    fn from_str(s: &str) -> Result<Self> {
        parser::sparse_from_tokens(s.split_whitespace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(v: &SparseInstance) -> Vec<(usize, f64)> {
        v.iter().collect()
    }

    #[test]
    fn test_new_validates_order() {
        assert!(SparseInstance::new(vec![0, 2, 5], vec![1.0, 2.0, 3.0]).is_ok());
        assert!(matches!(
            SparseInstance::new(vec![0, 5, 2], vec![1.0, 2.0, 3.0]),
            Err(InstanceError::MalformedInput(_))
        ));
        assert!(matches!(
            SparseInstance::new(vec![1, 1], vec![1.0, 2.0]),
            Err(InstanceError::MalformedInput(_))
        ));
        assert!(matches!(
            SparseInstance::new(vec![1], vec![1.0, 2.0]),
            Err(InstanceError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_at_implicit_zero() {
        let v = SparseInstance::from_pairs(vec![(0, 3.5), (2, 2.1)]).unwrap();
        assert_eq!(v.at(0), 3.5);
        assert_eq!(v.at(1), 0.0);
        assert_eq!(v.at(1000), 0.0);
        assert_eq!(v.len(), 3);
        assert_eq!(v.nnz(), 2);
    }

    #[test]
    fn test_set_update_and_insert() {
        let v = SparseInstance::from_pairs(vec![(1, 1.0), (4, 4.0)]).unwrap();

        let updated = v.set(4, 9.0).unwrap();
        assert_eq!(pairs(&updated), vec![(1, 1.0), (4, 9.0)]);

        let inserted = v.set(2, 2.0).unwrap();
        assert_eq!(pairs(&inserted), vec![(1, 1.0), (2, 2.0), (4, 4.0)]);

        let grown = v.set(10, 0.0).unwrap();
        assert_eq!(pairs(&grown), vec![(1, 1.0), (4, 4.0), (10, 0.0)]);

        // Receiver untouched
        assert_eq!(pairs(&v), vec![(1, 1.0), (4, 4.0)]);
    }

    #[test]
    fn test_largest_index() {
        let top = SparseInstance::from_pairs(vec![(MAX_INDEX, 1.0)]).unwrap();
        assert_eq!(top.len(), usize::MAX);

        assert!(matches!(
            SparseInstance::from_pairs(vec![(0, 1.0), (usize::MAX, 1.0)]),
            Err(InstanceError::MalformedInput(_))
        ));
        assert!(matches!(
            "18446744073709551615:1.0".parse::<SparseInstance>(),
            Err(InstanceError::MalformedInput(_))
        ));
        assert!(matches!(
            SparseInstance::empty().set(usize::MAX, 2.0),
            Err(InstanceError::IndexOutOfRange { index: usize::MAX, .. })
        ));
        assert_eq!(SparseInstance::empty().set(MAX_INDEX, 2.0).unwrap().len(), usize::MAX);
    }

    #[test]
    fn test_add_union() {
        let a = SparseInstance::from_pairs(vec![(0, 2.0), (3, 1.0)]).unwrap();
        let b = SparseInstance::from_pairs(vec![(3, 4.0), (5, 2.0)]).unwrap();
        assert_eq!(pairs(&a.add(&b)), vec![(0, 2.0), (3, 5.0), (5, 2.0)]);
        assert_eq!(pairs(&b.add(&a)), vec![(0, 2.0), (3, 5.0), (5, 2.0)]);
    }

    #[test]
    fn test_add_dense() {
        let s = SparseInstance::from_pairs(vec![(1, 1.0), (4, 4.0)]).unwrap();
        let d = DenseInstance::new(vec![1.0, 1.0, 1.0]);
        assert_eq!(
            pairs(&s.add_dense(&d)),
            vec![(0, 1.0), (1, 2.0), (2, 1.0), (4, 4.0)]
        );
    }

    #[test]
    fn test_dot_intersection() {
        let a = SparseInstance::from_pairs(vec![(0, 2.0), (3, 1.0), (7, 5.0)]).unwrap();
        let b = SparseInstance::from_pairs(vec![(3, 4.0), (5, 2.0), (7, 1.0)]).unwrap();
        assert_eq!(a.dot(&b), 9.0);
        assert_eq!(a.dot(&SparseInstance::empty()), 0.0);
    }

    #[test]
    fn test_dot_dense_probes_in_range() {
        let s = SparseInstance::from_pairs(vec![(0, 2.0), (2, 3.0), (9, 100.0)]).unwrap();
        let d = DenseInstance::new(vec![1.0, 10.0, 2.0]);
        assert_eq!(s.dot_dense(&d), 8.0);
        assert_eq!(d.dot_sparse(&s), 8.0);
    }

    #[test]
    fn test_map_preserves_sparsity() {
        let v = SparseInstance::from_pairs(vec![(0, 1.0), (1, 2.0), (3, 3.0), (4, 4.0)]).unwrap();
        let mapped = v.map(|x| x + 1.0);
        assert_eq!(mapped.indices(), &[0, 1, 3, 4]);
        assert_eq!(mapped.at(2), 0.0);
        assert_eq!(mapped.at(5), 0.0);
        assert_eq!(mapped.values(), &[2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_to_dense() {
        let v = SparseInstance::from_pairs(vec![(1, 1.5), (3, -1.0)]).unwrap();
        assert_eq!(v.to_dense().values(), &[0.0, 1.5, 0.0, -1.0]);
        assert!(SparseInstance::empty().to_dense().is_empty());
    }

    #[test]
    fn test_display_from_str() {
        let v = SparseInstance::from_pairs(vec![(0, 3.5), (2, 2.1)]).unwrap();
        assert_eq!(v.to_string(), "0:3.5 2:2.1");
        assert_eq!("0:3.5 2:2.1".parse::<SparseInstance>().unwrap(), v);
        assert!("2:1.0 0:1.0".parse::<SparseInstance>().is_err());
    }

    #[test]
    fn test_deserialize_rejects_unsorted() {
        let ok: SparseInstance =
            serde_json::from_str(r#"{"indices":[1,3],"values":[1.0,2.0]}"#).unwrap();
        assert_eq!(ok.at(3), 2.0);

        let bad = serde_json::from_str::<SparseInstance>(r#"{"indices":[3,1],"values":[1.0,2.0]}"#);
        assert!(bad.is_err());
    }
}

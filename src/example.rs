//! Example: one labeled observation.
//!
//! An [`Example`] pairs an input instance (features) with an output instance
//! (label). Both halves sit behind an [`Arc`], so deriving a new example with
//! different features reuses the label instead of copying it.

use crate::error::Result;
use crate::instance::Instance;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// An immutable `(input, output)` pair of instances.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Example {
    input: Arc<Instance>,
    output: Arc<Instance>,
}

impl Example {
    /// Create an example from its feature and label instances.
    pub fn new(input: Instance, output: Instance) -> Self {
        Self {
            input: Arc::new(input),
            output: Arc::new(output),
        }
    }

    /// The feature instance.
    pub fn input(&self) -> &Instance {
        &self.input
    }

    /// The label instance.
    pub fn output(&self) -> &Instance {
        &self.output
    }

    /// Feature value at `index`.
    pub fn feature_at(&self, index: usize) -> Result<f64> {
        self.input.at(index)
    }

    /// Label value at `index`.
    pub fn label_at(&self, index: usize) -> Result<f64> {
        self.output.at(index)
    }

    /// New example with one feature replaced; the label is shared.
    pub fn set_feature(&self, index: usize, value: f64) -> Result<Example> {
        let input = self.input.set(index, value)?;
        Ok(self.with_input(input))
    }

    /// Dot product of the features with `other`.
    pub fn dot(&self, other: &Instance) -> f64 {
        self.input.dot(other)
    }

    /// Element-wise sum of the features with `other`.
    pub fn add(&self, other: &Instance) -> Result<Instance> {
        self.input.add(other)
    }

    /// New example with `f` applied to the stored features; the label is shared.
    pub fn map_features<F>(&self, f: F) -> Example
    where
        F: Fn(f64) -> f64,
    {
        self.with_input(self.input.map(f))
    }

    fn with_input(&self, input: Instance) -> Example {
        Example {
            input: Arc::new(input),
            output: Arc::clone(&self.output),
        }
    }

    /// Serialize to a JSON snapshot.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore from a snapshot written by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Renders the label first, then the features, in the line format read by
/// [`parse`](crate::parser::parse).
impl fmt::Display for Example {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.output, self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::DenseInstance;
    use crate::error::InstanceError;
    use crate::sparse::SparseInstance;

    fn example() -> Example {
        Example::new(
            Instance::from(DenseInstance::new(vec![3.5, 0.0, 2.1])),
            Instance::from(DenseInstance::new(vec![1.0])),
        )
    }

    #[test]
    fn test_accessors() {
        let ex = example();
        assert_eq!(ex.feature_at(0).unwrap(), 3.5);
        assert_eq!(ex.feature_at(1).unwrap(), 0.0);
        assert_eq!(ex.label_at(0).unwrap(), 1.0);
        assert!(matches!(
            ex.label_at(1),
            Err(InstanceError::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_set_feature_shares_output() {
        let ex = example();
        let updated = ex.set_feature(1, 7.0).unwrap();

        assert_eq!(updated.feature_at(1).unwrap(), 7.0);
        assert_eq!(ex.feature_at(1).unwrap(), 0.0);
        assert!(Arc::ptr_eq(&ex.output, &updated.output));
        assert!(ex.set_feature(3, 1.0).is_err());
    }

    #[test]
    fn test_map_features_shares_output() {
        let ex = example();
        let doubled = ex.map_features(|x| x * 2.0);

        assert_eq!(doubled.input(), &Instance::from(DenseInstance::new(vec![7.0, 0.0, 4.2])));
        assert_eq!(doubled.output(), ex.output());
        assert!(Arc::ptr_eq(&ex.output, &doubled.output));
    }

    #[test]
    fn test_dot_and_add_forward_to_input() {
        let ex = example();
        let w = Instance::from(SparseInstance::from_pairs(vec![(0, 2.0), (2, 10.0)]).unwrap());

        assert!((ex.dot(&w) - 28.0).abs() < 1e-10);
        let sum = ex.add(&w).unwrap();
        assert_eq!(sum.at(0).unwrap(), 5.5);
        assert_eq!(sum.at(1).unwrap(), 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(example().to_string(), "1.0 3.5 0.0 2.1");

        let sparse = Example::new(
            Instance::from(SparseInstance::from_pairs(vec![(0, 3.5), (2, 2.1)]).unwrap()),
            Instance::from(DenseInstance::new(vec![-1.0])),
        );
        assert_eq!(sparse.to_string(), "-1.0 0:3.5 2:2.1");
    }

    #[test]
    fn test_json_round_trip() {
        let ex = example();
        let restored = Example::from_json(&ex.to_json().unwrap()).unwrap();
        assert_eq!(restored, ex);
    }
}

//! # streamvec: immutable instances for streaming learners
//!
//! streamvec provides the unit of data that flows through a streaming
//! learning pipeline: an [`Instance`] is a numeric vector stored densely or
//! sparsely, and an [`Example`] pairs an input instance with an output
//! instance to form one labeled observation.
//!
//! ## Quick Start
//!
//! ```rust
//! use streamvec::{parse, DenseInstance, Instance};
//!
//! // Label first, then features
//! let example = parse("1.0 3.5 0.0 2.1", "dense", "dense")?;
//! assert_eq!(example.feature_at(1)?, 0.0);
//! assert_eq!(example.label_at(0)?, 1.0);
//!
//! // Vector algebra works across representations
//! let weights = parse("0 0:2.0 2:1.0", "sparse", "dense")?;
//! let score = example.dot(weights.input());
//! assert!((score - 9.1).abs() < 1e-10);
//!
//! // Updates return new values
//! let shifted = example.map_features(|x| x + 1.0);
//! assert_eq!(shifted.feature_at(0)?, 4.5);
//! assert_eq!(example.feature_at(0)?, 3.5);
//!
//! let zeros = Instance::from(DenseInstance::zeros(3));
//! assert_eq!(example.add(&zeros)?, *example.input());
//! # Ok::<(), streamvec::InstanceError>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Dense**: every position stored, fixed length
//! - **Sparse**: strictly increasing `(index, value)` pairs, absent indices are zero
//! - **Immutability**: `set`, `map` and `add` never touch the receiver
//! - **Line format**: `<label> <feature> ...`, see [`parser`]

pub mod dense;
pub mod error;
pub mod example;
pub mod hashing;
pub mod instance;
pub mod parser;
pub mod sparse;

// Re-exports for convenience
pub use dense::DenseInstance;
pub use error::{InstanceError, Result};
pub use example::Example;
pub use hashing::FeatureHasher;
pub use instance::{Instance, Variant};
pub use parser::{parse, Parser};
pub use sparse::SparseInstance;

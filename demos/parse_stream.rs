//! Parse a small labeled stream and score it with a weight vector.
//!
//! Lines arrive in both line formats; each becomes an `Example`, gets
//! scored against a sparse weight vector, and is rescaled without copying
//! its label.
//!
//! Run: cargo run --example parse_stream

use streamvec::{DenseInstance, Example, FeatureHasher, Instance, Parser, SparseInstance};

// =============================================================================
// CONFIGURATION
// =============================================================================

const DENSE_LINES: &[&str] = &["1.0 3.5 0.0 2.1", "-1.0 0.2 1.5 0.0", "1.0 2.9 0.1 1.8"];
const SPARSE_LINES: &[&str] = &["1.0 0:3.5 2:2.1", "-1.0 1:1.5 7:4.0", "1.0 0:2.9 2:1.8 5:0.3"];

fn score(example: &Example, weights: &Instance) -> f64 {
    example.dot(weights)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let weights = Instance::from(SparseInstance::from_pairs(vec![(0, 0.5), (2, 1.0), (7, -0.25)])?);

    println!("=== dense features ===");
    let dense = Parser::from_types("dense", "dense")?;
    for line in DENSE_LINES {
        let example = dense.parse_line(line)?;
        println!(
            "{:<24} label={:+.1} score={:+.3}",
            line,
            example.label_at(0)?,
            score(&example, &weights)
        );
    }

    println!("\n=== sparse features ===");
    let sparse = Parser::from_types("sparse", "dense")?;
    let mut total = Instance::from(DenseInstance::zeros(8));
    for line in SPARSE_LINES {
        let example = sparse.parse_line(line)?;
        let norm = example.input().norm().max(1e-12);
        let scaled = example.map_features(|x| x / norm);
        total = total.add(scaled.input())?;
        println!(
            "{:<24} nnz={} score={:+.3} scaled={}",
            line,
            example.input().nnz(),
            score(&example, &weights),
            scaled
        );
    }
    println!("sum of normalized features: {}", total);

    println!("\n=== hashed features ===");
    let hasher = FeatureHasher::new(1 << 10)?;
    let features = hasher.hash(&[("protocol=TCP", 1.0), ("dst_port=443", 1.0), ("bytes", 1200.0)]);
    let example = Example::new(Instance::from(features), Instance::from(DenseInstance::new(vec![1.0])));
    println!("{}", example);
    println!("json: {}", example.to_json()?);

    Ok(())
}

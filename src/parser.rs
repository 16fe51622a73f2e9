//! Parser: text lines to examples.
//!
//! A line holds a label token followed by feature tokens, separated by
//! whitespace:
//!
//! ```text
//! <label> <feature> <feature> ...
//! ```
//!
//! Dense features are bare float literals whose position is their index.
//! Sparse features are `index:value` pairs in strictly increasing index
//! order. The label uses whichever grammar the output variant selects.
//!
//! ```rust
//! use streamvec::parse;
//!
//! let ex = parse("1.0 0:3.5 2:2.1", "sparse", "dense")?;
//! assert_eq!(ex.feature_at(1)?, 0.0);
//! assert_eq!(ex.label_at(0)?, 1.0);
//! # Ok::<(), streamvec::InstanceError>(())
//! ```

use crate::dense::DenseInstance;
use crate::error::{InstanceError, Result};
use crate::example::Example;
use crate::instance::{Instance, Variant};
use crate::sparse::SparseInstance;

/// Parse one line using variant names such as `"dense"` or `"sparse"`.
pub fn parse(line: &str, in_type: &str, out_type: &str) -> Result<Example> {
    Parser::from_types(in_type, out_type)?.parse_line(line)
}

/// Line parser configured with the input and output representations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Parser {
    input: Variant,
    output: Variant,
}

impl Parser {
    pub fn new(input: Variant, output: Variant) -> Self {
        Self { input, output }
    }

    /// Build from variant names; unknown names fail with `UnknownVariant`.
    pub fn from_types(in_type: &str, out_type: &str) -> Result<Self> {
        Ok(Self::new(in_type.parse()?, out_type.parse()?))
    }

    pub fn input(&self) -> Variant {
        self.input
    }

    pub fn output(&self) -> Variant {
        self.output
    }

    /// Parse a line: the first token is the label, the rest are features.
    pub fn parse_line(&self, line: &str) -> Result<Example> {
        let mut tokens = line.split_whitespace();
        let label = tokens
            .next()
            .ok_or_else(|| InstanceError::MalformedInput("empty line".to_string()))?;

        let output = instance_from_tokens(self.output, std::iter::once(label))?;
        let input = instance_from_tokens(self.input, tokens)?;
        Ok(Example::new(input, output))
    }
}

/// Build an instance of the given variant from its feature tokens.
pub fn instance_from_tokens<'a, I>(variant: Variant, tokens: I) -> Result<Instance>
where
    I: Iterator<Item = &'a str>,
{
    match variant {
        Variant::Dense => dense_from_tokens(tokens).map(Instance::Dense),
        Variant::Sparse => sparse_from_tokens(tokens).map(Instance::Sparse),
    }
}

pub(crate) fn dense_from_tokens<'a, I>(tokens: I) -> Result<DenseInstance>
where
    I: Iterator<Item = &'a str>,
{
    let values = tokens.map(parse_value).collect::<Result<Vec<f64>>>()?;
    Ok(DenseInstance::new(values))
}

pub(crate) fn sparse_from_tokens<'a, I>(tokens: I) -> Result<SparseInstance>
where
    I: Iterator<Item = &'a str>,
{
    let pairs = tokens.map(parse_pair).collect::<Result<Vec<(usize, f64)>>>()?;
    SparseInstance::from_pairs(pairs)
}

fn parse_value(token: &str) -> Result<f64> {
    token
        .parse()
        .map_err(|_| InstanceError::MalformedInput(format!("invalid value {:?}", token)))
}

fn parse_pair(token: &str) -> Result<(usize, f64)> {
    let (index, value) = token.split_once(':').ok_or_else(|| {
        InstanceError::MalformedInput(format!("expected index:value, got {:?}", token))
    })?;
    let index = index
        .parse()
        .map_err(|_| InstanceError::MalformedInput(format!("invalid index in {:?}", token)))?;
    Ok((index, parse_value(value)?))
}

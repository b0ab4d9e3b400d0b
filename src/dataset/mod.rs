//! Labelled match datasets.
//!
//! Match records are assembled into fixed-shape matrices with an outcome
//! label, collected into a [`Dataset`], and optionally standardized and
//! class-balanced before being written out for training.

pub mod assemble;
pub mod balance;
pub mod jsonl;
pub mod label;
pub mod matrix;
pub mod scale;

pub use assemble::{AssembledMatch, MatchError, MatchVectorAssembler, ScalingMode};
pub use balance::{balance, BalanceError};
pub use jsonl::write_jsonl;
pub use label::{OutcomeLabel, ScoreError, ALL_LABELS};
pub use matrix::MatchVector;
pub use scale::{standardize, Standardizer};

use thiserror::Error;

/// Dataset-level invariant violations.
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("example shape {found:?} does not match dataset shape {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("split fraction {0} is outside 0..=1")]
    InvalidSplit(f64),
}

/// One training example.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    pub features: MatchVector,
    pub label: OutcomeLabel,
}

/// Ordered examples sharing one matrix shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    examples: Vec<Example>,
}

impl Dataset {
    pub fn new() -> Self {
        Dataset::default()
    }

    /// Collects examples, rejecting any whose shape differs from the first.
    pub fn from_examples(examples: Vec<Example>) -> Result<Self, DatasetError> {
        let mut dataset = Dataset::new();
        for example in examples {
            dataset.push(example)?;
        }
        Ok(dataset)
    }

    /// Appends an example. Every example must have the same shape.
    pub fn push(&mut self, example: Example) -> Result<(), DatasetError> {
        if let Some(expected) = self.shape() {
            let found = example.features.shape();
            if found != expected {
                return Err(DatasetError::ShapeMismatch { expected, found });
            }
        }
        self.examples.push(example);
        Ok(())
    }

    /// Shape shared by every example, or `None` while empty.
    pub fn shape(&self) -> Option<(usize, usize)> {
        self.examples.first().map(|e| e.features.shape())
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Example> {
        self.examples.iter()
    }

    pub fn into_examples(self) -> Vec<Example> {
        self.examples
    }

    pub(crate) fn examples_mut(&mut self) -> &mut [Example] {
        &mut self.examples
    }

    /// Example count per label, indexed by [`OutcomeLabel::index`].
    pub fn class_counts(&self) -> [usize; 3] {
        let mut counts = [0usize; 3];
        for e in &self.examples {
            counts[e.label.index()] += 1;
        }
        counts
    }

    /// Splits in order: the first `round(len * fraction)` examples become
    /// the training part, the rest the validation part.
    pub fn split(self, fraction: f64) -> Result<(Dataset, Dataset), DatasetError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(DatasetError::InvalidSplit(fraction));
        }
        let at = ((self.len() as f64) * fraction).round() as usize;
        let mut train = self.examples;
        let validation = train.split_off(at.min(train.len()));
        Ok((
            Dataset { examples: train },
            Dataset {
                examples: validation,
            },
        ))
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Example;
    type IntoIter = std::slice::Iter<'a, Example>;

    fn into_iter(self) -> Self::IntoIter {
        self.examples.iter()
    }
}

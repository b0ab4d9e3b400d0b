//! Class balancing by oversampling.
//!
//! Smaller classes are topped up with uniform draws (with replacement) from
//! their own examples until every class matches the largest one; the
//! result is then shuffled. Class proportions are not preserved.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use super::label::{OutcomeLabel, ALL_LABELS};
use super::{Dataset, Example};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BalanceError {
    #[error("cannot balance: no examples labelled {0}")]
    EmptyClass(OutcomeLabel),
}

/// Oversamples every class to the size of the largest and shuffles.
///
/// Returns exactly `3 * max_class_size` examples, each a copy of an input
/// example.
pub fn balance<R: Rng + ?Sized>(dataset: Dataset, rng: &mut R) -> Result<Dataset, BalanceError> {
    let mut groups: [Vec<Example>; 3] = Default::default();
    for example in dataset.into_examples() {
        groups[example.label.index()].push(example);
    }

    for label in ALL_LABELS {
        if groups[label.index()].is_empty() {
            return Err(BalanceError::EmptyClass(label));
        }
    }

    let target = groups.iter().map(Vec::len).max().unwrap_or(0);
    let mut balanced = Vec::with_capacity(target * groups.len());
    for mut group in groups {
        let original = group.len();
        while group.len() < target {
            let pick = rng.gen_range(0..original);
            group.push(group[pick].clone());
        }
        balanced.append(&mut group);
    }
    balanced.shuffle(rng);

    Ok(Dataset { examples: balanced })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::example;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    /// 10 home wins, 4 draws, 7 away wins; each feature value is unique.
    fn skewed() -> Dataset {
        let mut examples = Vec::new();
        let mut id = 0.0;
        for (label, n) in [
            (OutcomeLabel::HomeWin, 10),
            (OutcomeLabel::Draw, 4),
            (OutcomeLabel::AwayWin, 7),
        ] {
            for _ in 0..n {
                examples.push(example(2, id, label));
                id += 1.0;
            }
        }
        Dataset::from_examples(examples).unwrap()
    }

    #[test]
    fn equalizes_class_sizes() {
        let mut rng = SmallRng::seed_from_u64(7);
        let balanced = balance(skewed(), &mut rng).unwrap();
        assert_eq!(balanced.len(), 30);
        assert_eq!(balanced.class_counts(), [10, 10, 10]);
    }

    #[test]
    fn only_copies_existing_examples() {
        let input = skewed();
        let mut rng = SmallRng::seed_from_u64(11);
        let balanced = balance(input.clone(), &mut rng).unwrap();
        for e in &balanced {
            assert!(
                input.iter().any(|orig| orig == e),
                "balanced set contains a fabricated example"
            );
        }
        // Every original example survives.
        for orig in &input {
            assert!(balanced.iter().any(|e| e == orig));
        }
    }

    #[test]
    fn order_is_shuffled() {
        let mut rng = SmallRng::seed_from_u64(3);
        let balanced = balance(skewed(), &mut rng).unwrap();
        let labels: Vec<OutcomeLabel> = balanced.iter().map(|e| e.label).collect();
        let mut grouped = labels.clone();
        grouped.sort();
        assert_ne!(labels, grouped);
    }

    #[test]
    fn same_seed_same_result() {
        let a = balance(skewed(), &mut SmallRng::seed_from_u64(5)).unwrap();
        let b = balance(skewed(), &mut SmallRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn already_balanced_keeps_size() {
        let ds = Dataset::from_examples(vec![
            example(1, 0.0, OutcomeLabel::HomeWin),
            example(1, 1.0, OutcomeLabel::Draw),
            example(1, 2.0, OutcomeLabel::AwayWin),
        ])
        .unwrap();
        let balanced = balance(ds, &mut SmallRng::seed_from_u64(1)).unwrap();
        assert_eq!(balanced.class_counts(), [1, 1, 1]);
    }

    #[test]
    fn empty_class_is_an_error() {
        let ds = Dataset::from_examples(vec![
            example(1, 0.0, OutcomeLabel::HomeWin),
            example(1, 1.0, OutcomeLabel::AwayWin),
        ])
        .unwrap();
        assert_eq!(
            balance(ds, &mut SmallRng::seed_from_u64(1)),
            Err(BalanceError::EmptyClass(OutcomeLabel::Draw))
        );
        assert_eq!(
            balance(Dataset::new(), &mut SmallRng::seed_from_u64(1)),
            Err(BalanceError::EmptyClass(OutcomeLabel::HomeWin))
        );
    }
}

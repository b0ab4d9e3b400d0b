//! Dataset-level standardization.
//!
//! Each of the `rows * 34` features is shifted to zero mean and scaled to
//! unit (population) variance across all examples. Features that never
//! vary are mapped to 0.

use super::Dataset;

/// Per-feature mean and standard deviation fitted on a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Standardizer {
    mean: Vec<f64>,
    std: Vec<f64>,
}

impl Standardizer {
    /// Fits mean and std per feature. An empty dataset yields an empty
    /// standardizer, which leaves anything it is applied to untouched.
    pub fn fit(dataset: &Dataset) -> Self {
        let width = dataset
            .examples()
            .first()
            .map_or(0, |e| e.features.as_slice().len());
        let n = dataset.len() as f64;
        let mut mean = vec![0.0f64; width];
        let mut std = vec![0.0f64; width];
        if width == 0 {
            return Standardizer { mean, std };
        }

        for example in dataset {
            for (m, &v) in mean.iter_mut().zip(example.features.as_slice()) {
                *m += v as f64;
            }
        }
        for m in mean.iter_mut() {
            *m /= n;
        }

        for example in dataset {
            for ((s, &m), &v) in std.iter_mut().zip(&mean).zip(example.features.as_slice()) {
                let d = v as f64 - m;
                *s += d * d;
            }
        }
        for s in std.iter_mut() {
            *s = (*s / n).sqrt();
        }

        Standardizer { mean, std }
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn std(&self) -> &[f64] {
        &self.std
    }

    /// Rescales every example in place.
    pub fn apply(&self, dataset: &mut Dataset) {
        if self.mean.is_empty() {
            return;
        }
        for example in dataset.examples_mut() {
            let values = example.features.as_mut_slice();
            for ((v, &m), &s) in values.iter_mut().zip(&self.mean).zip(&self.std) {
                *v = if s > 0.0 {
                    ((*v as f64 - m) / s) as f32
                } else {
                    0.0
                };
            }
        }
    }
}

/// Fits a [`Standardizer`] on `dataset`, applies it, and returns it.
pub fn standardize(dataset: &mut Dataset) -> Standardizer {
    let scaler = Standardizer::fit(dataset);
    scaler.apply(dataset);
    scaler
}

//! Per-match feature matrix.

use crate::grid::TeamGrid;
use crate::skill::SKILL_LEN;

/// Row-major `[rows, 34]` matrix: home grid rows, then away grid rows.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchVector {
    rows: usize,
    data: Vec<f32>,
}

impl MatchVector {
    /// Number of columns (skill attributes per slot).
    pub const COLS: usize = SKILL_LEN;

    /// Stacks the home grid on top of the away grid.
    pub fn from_grids(home: &TeamGrid, away: &TeamGrid) -> Self {
        let rows = home.len() + away.len();
        let mut data = Vec::with_capacity(rows * Self::COLS);
        for slot in home.slots().iter().chain(away.slots()) {
            data.extend_from_slice(slot);
        }
        MatchVector { rows, data }
    }

    /// Wraps flat row-major data. Returns `None` if the length is not a
    /// whole number of rows.
    pub fn from_flat(data: Vec<f32>) -> Option<Self> {
        if data.len() % Self::COLS != 0 {
            return None;
        }
        Some(MatchVector {
            rows: data.len() / Self::COLS,
            data,
        })
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, Self::COLS)
    }

    pub fn row(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(Self::COLS)?;
        self.data.get(start..start + Self::COLS)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Divides every entry by `divisor`.
    pub fn scale_down(&mut self, divisor: f32) {
        for v in self.data.iter_mut() {
            *v /= divisor;
        }
    }
}

//! Match assembly: two team grids plus a label.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::label::{OutcomeLabel, ScoreError};
use super::matrix::MatchVector;
use super::Example;
use crate::grid::{GridError, GridEvent, TeamGridBuilder};
use crate::record::{MatchRecord, Side};

/// How match matrices are rescaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingMode {
    /// Raw ratings.
    #[default]
    None,
    /// Every entry divided by 100, mapping 0-100 ratings onto 0-1.
    DivideBy100,
    /// Zero mean and unit variance per feature, computed over the whole
    /// dataset. Applied after all matches are assembled.
    Standardize,
}

impl ScalingMode {
    /// True when the mode needs the full dataset and cannot run per match.
    pub fn is_dataset_level(self) -> bool {
        matches!(self, ScalingMode::Standardize)
    }
}

impl FromStr for ScalingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(ScalingMode::None),
            "divide_by_100" | "divide-by-100" => Ok(ScalingMode::DivideBy100),
            "standardize" => Ok(ScalingMode::Standardize),
            other => Err(format!(
                "unknown scaling mode '{}' (expected none, divide_by_100, standardize)",
                other
            )),
        }
    }
}

impl fmt::Display for ScalingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalingMode::None => write!(f, "none"),
            ScalingMode::DivideBy100 => write!(f, "divide_by_100"),
            ScalingMode::Standardize => write!(f, "standardize"),
        }
    }
}

/// Errors that make a single match unusable.
#[derive(Debug, Error, PartialEq)]
pub enum MatchError {
    #[error(transparent)]
    Score(#[from] ScoreError),

    #[error("{side} lineup: {source}")]
    Grid {
        side: Side,
        #[source]
        source: GridError,
    },
}

/// One assembled match and the grid events of both sides.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledMatch {
    pub example: Example,
    pub events: Vec<(Side, GridEvent)>,
}

impl AssembledMatch {
    /// Players missing from either grid.
    pub fn dropped(&self) -> usize {
        self.events.iter().filter(|(_, e)| e.is_drop()).count()
    }
}

/// Turns match records into labelled feature matrices.
#[derive(Debug, Clone)]
pub struct MatchVectorAssembler {
    builder: TeamGridBuilder,
    include_bench: bool,
}

impl MatchVectorAssembler {
    pub fn new(builder: TeamGridBuilder, include_bench: bool) -> Self {
        MatchVectorAssembler {
            builder,
            include_bench,
        }
    }

    /// Matrix shape every assembled match will have.
    pub fn shape(&self) -> (usize, usize) {
        (
            2 * self.builder.layout(self.include_bench).len(),
            MatchVector::COLS,
        )
    }

    /// Builds the home and away grids, stacks them, and labels the match.
    ///
    /// `Standardize` is left to the dataset pass; the matrix comes back
    /// unscaled in that mode.
    pub fn assemble(
        &self,
        record: &MatchRecord,
        scaling: ScalingMode,
    ) -> Result<AssembledMatch, MatchError> {
        let label = OutcomeLabel::from_score(&record.score)?;

        let mut events = Vec::new();
        let mut grids = Vec::with_capacity(2);
        for side in [Side::Home, Side::Away] {
            let build = self
                .builder
                .build(record.roster(side), self.include_bench)
                .map_err(|source| MatchError::Grid { side, source })?;
            events.extend(build.events.into_iter().map(|e| (side, e)));
            grids.push(build.grid);
        }

        let mut features = MatchVector::from_grids(&grids[0], &grids[1]);
        if scaling == ScalingMode::DivideBy100 {
            features.scale_down(100.0);
        }

        Ok(AssembledMatch {
            example: Example { features, label },
            events,
        })
    }
}

//! Match outcome labels derived from final scores.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parsing a `"<home>-<away>"` score string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("score '{0}' is not of the form '<home>-<away>'")]
    Malformed(String),

    #[error("score '{score}' has a non-numeric goal count '{part}'")]
    InvalidGoals { score: String, part: String },
}

/// Three-way match outcome, from the home side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeLabel {
    HomeWin,
    Draw,
    AwayWin,
}

/// All labels in class-index order.
pub const ALL_LABELS: [OutcomeLabel; 3] = [
    OutcomeLabel::HomeWin,
    OutcomeLabel::Draw,
    OutcomeLabel::AwayWin,
];

impl OutcomeLabel {
    /// Class index: 0 home win, 1 draw, 2 away win.
    pub const fn index(self) -> usize {
        match self {
            OutcomeLabel::HomeWin => 0,
            OutcomeLabel::Draw => 1,
            OutcomeLabel::AwayWin => 2,
        }
    }

    pub fn one_hot(self) -> [f32; 3] {
        let mut v = [0.0; 3];
        v[self.index()] = 1.0;
        v
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            OutcomeLabel::HomeWin => "home_win",
            OutcomeLabel::Draw => "draw",
            OutcomeLabel::AwayWin => "away_win",
        }
    }

    pub fn from_goals(home: u32, away: u32) -> Self {
        match home.cmp(&away) {
            std::cmp::Ordering::Greater => OutcomeLabel::HomeWin,
            std::cmp::Ordering::Less => OutcomeLabel::AwayWin,
            std::cmp::Ordering::Equal => OutcomeLabel::Draw,
        }
    }

    /// Labels a final score such as `"3-1"`.
    ///
    /// Goal counts are compared as numbers, so `"10-2"` is a home win.
    /// Scraped scores sometimes use an en dash as the separator.
    pub fn from_score(score: &str) -> Result<Self, ScoreError> {
        let normalized = score.trim().replace('\u{2013}', "-");
        let (home, away) = normalized
            .split_once('-')
            .ok_or_else(|| ScoreError::Malformed(score.to_string()))?;
        let goals = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| ScoreError::InvalidGoals {
                    score: score.to_string(),
                    part: part.trim().to_string(),
                })
        };
        Ok(OutcomeLabel::from_goals(goals(home)?, goals(away)?))
    }
}

impl fmt::Display for OutcomeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

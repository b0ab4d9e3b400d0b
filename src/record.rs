//! Parsed match and player records, as handed over by the scraping side.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pitch::Position;
use crate::skill::SkillPayload;

/// One roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub number: u32,
    /// Formation-diagram spot; absent for substitutes not drawn on the pitch.
    #[serde(default)]
    pub position: Option<Position>,
    /// Raw ratings; absent when no ratings snapshot was found.
    #[serde(default)]
    pub skill: Option<SkillPayload>,
}

impl PlayerRecord {
    pub fn new(name: impl Into<String>, number: u32) -> Self {
        PlayerRecord {
            name: name.into(),
            number,
            position: None,
            skill: None,
        }
    }

    pub fn at(mut self, top: f64, left: f64) -> Self {
        self.position = Some(Position::new(top, left));
        self
    }

    pub fn with_skill(mut self, skill: SkillPayload) -> Self {
        self.skill = Some(skill);
        self
    }
}

/// Which side of a match a roster belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Home => write!(f, "home"),
            Side::Away => write!(f, "away"),
        }
    }
}

/// One played match: both lineups and the final score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub home: Vec<PlayerRecord>,
    pub away: Vec<PlayerRecord>,
    /// Final score as `"<home goals>-<away goals>"`.
    pub score: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_team: Option<String>,
}

impl MatchRecord {
    pub fn new(home: Vec<PlayerRecord>, away: Vec<PlayerRecord>, score: impl Into<String>) -> Self {
        MatchRecord {
            home,
            away,
            score: score.into(),
            date: None,
            home_team: None,
            away_team: None,
        }
    }

    pub fn roster(&self, side: Side) -> &[PlayerRecord] {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    /// Human-readable label for diagnostics, e.g. `Bremen vs Mainz (2019-03-02)`.
    pub fn describe(&self) -> String {
        let home = self.home_team.as_deref().unwrap_or("home");
        let away = self.away_team.as_deref().unwrap_or("away");
        match &self.date {
            Some(date) => format!("{} vs {} ({})", home, away, date),
            None => format!("{} vs {}", home, away),
        }
    }
}

/// Errors from reading a match file.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse match records: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loads a JSON array of match records.
pub fn load_matches(path: &Path) -> Result<Vec<MatchRecord>, RecordError> {
    let data = fs::read_to_string(path).map_err(|source| RecordError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_matches_from_str(&data)
}

pub fn load_matches_from_str(json: &str) -> Result<Vec<MatchRecord>, RecordError> {
    Ok(serde_json::from_str(json)?)
}

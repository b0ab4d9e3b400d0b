//! Composition settings.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```json
//! { "include_bench": false, "scaling": "divide_by_100", "seed": 7 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::{MatchVectorAssembler, ScalingMode};
use crate::grid::{FallbackTable, TeamGridBuilder, DEFAULT_BENCH_SLOTS};
use crate::pitch::ZoneTable;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON, or a zone/fallback table that fails validation.
    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings for turning match records into a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Append bench slots for players without a pitch position.
    pub include_bench: bool,
    /// Number of bench slots per team when the bench is included.
    pub bench_slots: usize,
    pub scaling: ScalingMode,
    /// Oversample minority outcomes after assembly.
    pub balance: bool,
    /// Worker threads for assembly (1 = run on the calling thread).
    pub threads: usize,
    /// Random seed for balancing (0 = use entropy).
    pub seed: u64,
    pub zones: ZoneTable,
    pub fallback: FallbackTable,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        ComposeConfig {
            include_bench: true,
            bench_slots: DEFAULT_BENCH_SLOTS,
            scaling: ScalingMode::None,
            balance: false,
            threads: 1,
            seed: 0,
            zones: ZoneTable::default(),
            fallback: FallbackTable::default(),
        }
    }
}

impl ComposeConfig {
    /// Reads and validates a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&data)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn builder(&self) -> TeamGridBuilder {
        TeamGridBuilder::new(self.zones.clone(), self.fallback.clone(), self.bench_slots)
    }

    pub fn assembler(&self) -> MatchVectorAssembler {
        MatchVectorAssembler::new(self.builder(), self.include_bench)
    }
}
